//! Детерминированная послойная раскладка сверху вниз.
//!
//! Ранг узла — длина самого длинного пути от корней (узлов без входящих
//! рёбер); внутри ранга узлы идут в порядке появления во входном списке,
//! ряды центрируются относительно нуля. Один и тот же граф всегда даёт
//! одни и те же позиции.

use std::collections::{HashMap, VecDeque};

/// Футпринт узла на канве.
pub const NODE_WIDTH: f64 = 220.0;
pub const NODE_HEIGHT: f64 = 70.0;
/// Вертикальный зазор между рангами.
pub const RANK_SEP: f64 = 80.0;
/// Горизонтальный зазор между соседями в ранге.
pub const NODE_SEP: f64 = 55.0;

/// Вычислить позиции всех узлов (левый верхний угол футпринта).
///
/// Рёбра с неизвестными концами и петли игнорируются; узлы, оставшиеся в
/// циклах, получают ранг 0.
pub fn layered_top_to_bottom(
    node_ids: &[String],
    edges: &[(String, String)],
) -> HashMap<String, (f64, f64)> {
    let index: HashMap<&str, usize> = node_ids
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), i))
        .collect();

    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); node_ids.len()];
    let mut indegree = vec![0usize; node_ids.len()];
    for (from, to) in edges {
        if let (Some(&f), Some(&t)) = (index.get(from.as_str()), index.get(to.as_str())) {
            if f != t {
                adjacency[f].push(t);
                indegree[t] += 1;
            }
        }
    }

    // Ранги по обходу Кана: самый длинный путь от корней
    let mut rank = vec![0usize; node_ids.len()];
    let mut remaining = indegree;
    let mut queue: VecDeque<usize> = (0..node_ids.len()).filter(|&i| remaining[i] == 0).collect();
    while let Some(i) = queue.pop_front() {
        for &j in &adjacency[i] {
            if rank[j] < rank[i] + 1 {
                rank[j] = rank[i] + 1;
            }
            remaining[j] -= 1;
            if remaining[j] == 0 {
                queue.push_back(j);
            }
        }
    }

    // Ряды в порядке появления узлов
    let max_rank = rank.iter().copied().max().unwrap_or(0);
    let mut rows: Vec<Vec<usize>> = vec![Vec::new(); max_rank + 1];
    for (i, &r) in rank.iter().enumerate() {
        rows[r].push(i);
    }

    let mut positions = HashMap::new();
    for (r, row) in rows.iter().enumerate() {
        let row_width = row.len() as f64 * NODE_WIDTH
            + row.len().saturating_sub(1) as f64 * NODE_SEP;
        let mut x = -row_width / 2.0;
        let y = r as f64 * (NODE_HEIGHT + RANK_SEP);
        for &i in row {
            positions.insert(node_ids[i].clone(), (x, y));
            x += NODE_WIDTH + NODE_SEP;
        }
    }

    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_owned()).collect()
    }

    fn edge(from: &str, to: &str) -> (String, String) {
        (from.to_owned(), to.to_owned())
    }

    #[test]
    fn test_chain_ranks_top_to_bottom() {
        let nodes = ids(&["a", "b", "c"]);
        let edges = vec![edge("a", "b"), edge("b", "c")];

        let positions = layered_top_to_bottom(&nodes, &edges);

        let (_, ya) = positions["a"];
        let (_, yb) = positions["b"];
        let (_, yc) = positions["c"];
        assert_eq!(ya, 0.0);
        assert_eq!(yb, NODE_HEIGHT + RANK_SEP, "ранг 1 на фиксированном шаге");
        assert_eq!(yc, 2.0 * (NODE_HEIGHT + RANK_SEP));
    }

    #[test]
    fn test_siblings_spaced_in_insertion_order() {
        let nodes = ids(&["root", "left", "right"]);
        let edges = vec![edge("root", "left"), edge("root", "right")];

        let positions = layered_top_to_bottom(&nodes, &edges);

        let (xl, yl) = positions["left"];
        let (xr, yr) = positions["right"];
        assert_eq!(yl, yr, "соседи по рангу на одной высоте");
        assert_eq!(xr - xl, NODE_WIDTH + NODE_SEP, "фиксированный зазор в ранге");
        assert!(xl < xr, "порядок появления сохраняется");
    }

    #[test]
    fn test_deterministic_for_same_input() {
        let nodes = ids(&["a", "b", "c", "d"]);
        let edges = vec![edge("a", "b"), edge("a", "c"), edge("c", "d")];

        let first = layered_top_to_bottom(&nodes, &edges);
        let second = layered_top_to_bottom(&nodes, &edges);
        assert_eq!(first, second);
    }

    #[test]
    fn test_cycles_and_self_links_are_safe() {
        let nodes = ids(&["a", "b"]);
        let edges = vec![edge("a", "b"), edge("b", "a"), edge("a", "a")];

        let positions = layered_top_to_bottom(&nodes, &edges);
        assert_eq!(positions.len(), 2, "все узлы получают позицию");
    }

    #[test]
    fn test_empty_graph() {
        assert!(layered_top_to_bottom(&[], &[]).is_empty());
    }
}
