//! Контроллер канвы: владеет точечной копией графа и сверяет жесты
//! пользователя (drag, выбор, соединение, удаление, поиск, авто-раскладка)
//! с хранилищем через HTTP-клиент.
//!
//! Ни один вызов клиента не роняет контроллер: сбой сводится к одной строке
//! и показывается транзиентным уведомлением, локальное состояние не
//! откатывается.

use std::time::Duration;

use futures_util::future::join_all;
use tracing::warn;

use crate::client::TopologyClient;
use crate::error::Error;
use crate::layout;
use crate::notify::Notifier;
use crate::types::{DeviceCreate, DeviceUpdate, GraphNode, LinkCreate, LinkUpdate, TopologyView};
use crate::viewport::Viewport;

/// Текущий выбор на канве: узел и ребро взаимоисключающи.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Node(String),
    Edge(String),
}

/// Действие по нажатию клавиши.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Открыть подтверждение удаления выбранной сущности
    ConfirmDelete,
    /// Перевести фокус в поле поиска
    FocusSearch,
    /// Ничего
    Ignore,
}

/// Маппинг клавиатуры: Delete/Backspace — удаление при активном выборе,
/// Ctrl+K — фокус поиска.
pub fn key_action(selection: &Selection, key: &str, ctrl: bool) -> KeyAction {
    match key {
        "Delete" | "Backspace" if *selection != Selection::None => KeyAction::ConfirmDelete,
        "k" | "K" if ctrl => KeyAction::FocusSearch,
        _ => KeyAction::Ignore,
    }
}

const TOAST_DISMISS: Duration = Duration::from_secs(4);

/// Контроллер канвы.
///
/// Граф — всегда снимок хранилища на момент последней загрузки: после каждой
/// успешной мутации выполняется полная перезагрузка. Исключения — два узких
/// оптимистичных обновления: позиция узла после drag (её уже изменил сам
/// жест) и статус после подтверждения сервером.
pub struct CanvasController {
    client: TopologyClient,
    pub view: TopologyView,
    pub viewport: Viewport,
    pub selection: Selection,
    pub notifier: Notifier,
}

impl CanvasController {
    pub fn new(client: TopologyClient) -> Self {
        Self {
            client,
            view: TopologyView::default(),
            viewport: Viewport::default(),
            selection: Selection::None,
            notifier: Notifier::new(TOAST_DISMISS),
        }
    }

    fn report(&mut self, action: &str, err: Error) {
        warn!("{action}: {err}");
        self.notifier.error(format!("{action}: {err}"));
    }

    /// Полная перезагрузка графа из хранилища.
    pub async fn reload(&mut self) -> Result<(), Error> {
        self.view = self.client.topology().await?;

        // Выбор сбрасывается, если выбранной сущности больше нет
        match &self.selection {
            Selection::Node(id) if !self.view.nodes.iter().any(|n| &n.id == id) => {
                self.selection = Selection::None;
            }
            Selection::Edge(id) if !self.view.edges.iter().any(|e| &e.id == id) => {
                self.selection = Selection::None;
            }
            _ => {}
        }
        Ok(())
    }

    /// Перезагрузка с уведомлением об ошибке вместо Result.
    pub async fn refresh(&mut self) {
        if let Err(e) = self.reload().await {
            self.report("Не удалось обновить граф", e);
        }
    }

    /// Событие выбора от канвы: берётся первый из отмеченных узлов, иначе
    /// первое из отмеченных рёбер.
    pub fn on_selection_change(&mut self, node_ids: &[String], edge_ids: &[String]) {
        self.selection = if let Some(id) = node_ids.first() {
            Selection::Node(id.clone())
        } else if let Some(id) = edge_ids.first() {
            Selection::Edge(id.clone())
        } else {
            Selection::None
        };
    }

    /// Отпускание узла после перетаскивания: ровно один вызов сохранения
    /// позиции. Локальная позиция уже изменена самим жестом и при ошибке не
    /// откатывается — показывается только уведомление.
    pub async fn on_drag_release(&mut self, node_id: &str, x: f64, y: f64) {
        if let Some(node) = self.view.nodes.iter_mut().find(|n| n.id == node_id) {
            node.position.x = x;
            node.position.y = y;
        }

        if let Err(e) = self.client.update_position(node_id, x, y).await {
            self.report("Не удалось сохранить позицию", e);
        }
    }

    /// Смена статуса выбранной сущности: один PATCH только по полю status;
    /// локальное поле меняется после подтверждения сервером, не раньше.
    pub async fn set_selected_status(&mut self, status: &str) {
        match self.selection.clone() {
            Selection::Node(id) => {
                let patch = DeviceUpdate {
                    status: Some(status.to_owned()),
                    ..Default::default()
                };
                match self.client.update_device(&id, &patch).await {
                    Ok(_) => {
                        if let Some(node) = self.view.nodes.iter_mut().find(|n| n.id == id) {
                            node.data.status = status.to_owned();
                        }
                    }
                    Err(e) => self.report("Не удалось сменить статус", e),
                }
            }
            Selection::Edge(id) => {
                let patch = LinkUpdate {
                    status: Some(status.to_owned()),
                    ..Default::default()
                };
                match self.client.update_link(&id, &patch).await {
                    Ok(_) => {
                        if let Some(edge) = self.view.edges.iter_mut().find(|e| e.id == id) {
                            edge.status = status.to_owned();
                        }
                    }
                    Err(e) => self.report("Не удалось сменить статус", e),
                }
            }
            Selection::None => {}
        }
    }

    /// Создать устройство в центре видимой области (экранный центр,
    /// переведённый в координаты канвы), затем полная перезагрузка.
    pub async fn create_device_at_center(&mut self, name: &str, device_type: &str) {
        let (x, y) = self.viewport.view_center();
        let data = DeviceCreate {
            name: name.to_owned(),
            device_type: device_type.to_owned(),
            x: Some(x),
            y: Some(y),
            ..Default::default()
        };

        match self.client.create_device(&data).await {
            Ok(device) => {
                self.refresh().await;
                self.notifier.info(format!("Устройство {} создано", device.name));
            }
            Err(e) => self.report("Не удалось создать устройство", e),
        }
    }

    /// Соединить два устройства. Петля отклоняется локально, до похода на
    /// сервер (хранилище её не блокирует).
    pub async fn connect(
        &mut self,
        from_id: &str,
        to_id: &str,
        from_handle: Option<String>,
        to_handle: Option<String>,
    ) {
        if from_id == to_id {
            self.notifier
                .error("Нельзя соединить устройство с самим собой");
            return;
        }

        let data = LinkCreate {
            from_id: from_id.to_owned(),
            to_id: to_id.to_owned(),
            from_handle,
            to_handle,
            ..Default::default()
        };
        match self.client.create_link(&data).await {
            Ok(_) => self.refresh().await,
            Err(e) => self.report("Не удалось создать связь", e),
        }
    }

    /// Удалить выбранную сущность. Каскад связей при удалении узла выполняет
    /// хранилище, клиент граф не пересчитывает.
    pub async fn delete_selected(&mut self) {
        match self.selection.clone() {
            Selection::Node(id) => match self.client.delete_device(&id).await {
                Ok(()) => {
                    self.selection = Selection::None;
                    self.refresh().await;
                }
                Err(e) => self.report("Не удалось удалить устройство", e),
            },
            Selection::Edge(id) => match self.client.delete_link(&id).await {
                Ok(()) => {
                    self.selection = Selection::None;
                    self.refresh().await;
                }
                Err(e) => self.report("Не удалось удалить связь", e),
            },
            Selection::None => {}
        }
    }

    /// Авто-раскладка: детерминированная послойная схема сверху вниз,
    /// сохранение позиций конкурентными вызовами (по одному на узел) без
    /// гарантий порядка. Операция завершена, когда осели все вызовы;
    /// индивидуальные сбои агрегируются в одно уведомление, успевшие
    /// сохранения не откатываются. В конце вид вписывается в новые границы.
    pub async fn auto_layout(&mut self) {
        let node_ids: Vec<String> = self.view.nodes.iter().map(|n| n.id.clone()).collect();
        let edges: Vec<(String, String)> = self
            .view
            .edges
            .iter()
            .map(|e| (e.source.clone(), e.target.clone()))
            .collect();
        let positions = layout::layered_top_to_bottom(&node_ids, &edges);

        for node in &mut self.view.nodes {
            if let Some(&(x, y)) = positions.get(&node.id) {
                node.position.x = x;
                node.position.y = y;
            }
        }

        let updates = positions
            .iter()
            .map(|(id, &(x, y))| self.client.update_position(id, x, y));
        let results = join_all(updates).await;

        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            self.notifier.error(format!(
                "Авто-раскладка: не сохранились позиции {failed} узлов"
            ));
        }

        self.fit_view();
    }

    /// Вписать вид в границы текущих узлов.
    pub fn fit_view(&mut self) {
        let Some(first) = self.view.nodes.first() else {
            return;
        };

        let mut min_x = first.position.x;
        let mut min_y = first.position.y;
        let mut max_x = first.position.x + layout::NODE_WIDTH;
        let mut max_y = first.position.y + layout::NODE_HEIGHT;
        for node in &self.view.nodes {
            min_x = min_x.min(node.position.x);
            min_y = min_y.min(node.position.y);
            max_x = max_x.max(node.position.x + layout::NODE_WIDTH);
            max_y = max_y.max(node.position.y + layout::NODE_HEIGHT);
        }

        self.viewport.fit_bounds(min_x, min_y, max_x, max_y);
    }

    /// Поиск по локальному графу без похода на сервер: регистронезависимая
    /// подстрока в name, ip, type и идентификаторе. Пустой запрос — пустой
    /// результат, а не «все узлы».
    pub fn search(&self, query: &str) -> Vec<&GraphNode> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        self.view
            .nodes
            .iter()
            .filter(|n| {
                n.data.name.to_lowercase().contains(&query)
                    || n.data
                        .ip
                        .as_deref()
                        .is_some_and(|ip| ip.to_lowercase().contains(&query))
                    || n.data.device_type.to_lowercase().contains(&query)
                    || n.id.to_lowercase().contains(&query)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::DEFAULT_BASE_URL;
    use crate::notify::ToastLevel;
    use crate::types::{NodeData, Position};

    fn node(id: &str, name: &str, device_type: &str, ip: Option<&str>) -> GraphNode {
        GraphNode {
            id: id.to_owned(),
            position: Position { x: 0.0, y: 0.0 },
            data: NodeData {
                name: name.to_owned(),
                device_type: device_type.to_owned(),
                ip: ip.map(str::to_owned),
                status: "up".to_owned(),
            },
        }
    }

    fn controller_with_nodes(nodes: Vec<GraphNode>) -> CanvasController {
        let client = TopologyClient::new(DEFAULT_BASE_URL).unwrap();
        let mut controller = CanvasController::new(client);
        controller.view = TopologyView {
            nodes,
            edges: Vec::new(),
        };
        controller
    }

    #[test]
    fn test_selection_is_mutually_exclusive() {
        let mut controller = controller_with_nodes(vec![node("n1", "SW1", "switch", None)]);

        controller.on_selection_change(&["n1".into()], &[]);
        assert_eq!(controller.selection, Selection::Node("n1".into()));

        // Выбор ребра снимает выбор узла
        controller.on_selection_change(&[], &["e1".into()]);
        assert_eq!(controller.selection, Selection::Edge("e1".into()));

        // Узел имеет приоритет, берётся первый из перечисленных
        controller.on_selection_change(&["n1".into(), "n2".into()], &["e1".into()]);
        assert_eq!(controller.selection, Selection::Node("n1".into()));

        controller.on_selection_change(&[], &[]);
        assert_eq!(controller.selection, Selection::None);
    }

    #[tokio::test]
    async fn test_self_link_rejected_locally() {
        let mut controller = controller_with_nodes(vec![node("n1", "SW1", "switch", None)]);

        // Сервер не вызывается: у клиента нет живого сервера, но ошибки
        // транспорта нет — отказ произошёл до запроса
        controller.connect("n1", "n1", None, None).await;

        let toast = controller.notifier.current().expect("уведомление показано");
        assert_eq!(toast.level, ToastLevel::Error);
        assert!(toast.message.contains("самим собой"));
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let controller = controller_with_nodes(vec![
            node("aaa-1", "Core-SW", "switch", Some("10.0.0.1")),
            node("bbb-2", "Edge-R", "router", Some("192.168.1.1")),
            node("ccc-3", "Office AP", "ap", None),
        ]);

        let by_name: Vec<&str> = controller.search("core").iter().map(|n| n.id.as_str()).collect();
        assert_eq!(by_name, vec!["aaa-1"]);

        let by_ip: Vec<&str> = controller.search("192.168").iter().map(|n| n.id.as_str()).collect();
        assert_eq!(by_ip, vec!["bbb-2"]);

        let by_type: Vec<&str> = controller.search("AP").iter().map(|n| n.id.as_str()).collect();
        assert_eq!(by_type, vec!["ccc-3"], "тип тоже участвует в поиске");

        let by_id: Vec<&str> = controller.search("bbb").iter().map(|n| n.id.as_str()).collect();
        assert_eq!(by_id, vec!["bbb-2"]);
    }

    #[test]
    fn test_empty_query_yields_no_results() {
        let controller = controller_with_nodes(vec![node("n1", "SW1", "switch", None)]);
        assert!(controller.search("").is_empty());
        assert!(controller.search("   ").is_empty());
    }

    #[test]
    fn test_key_action_mapping() {
        let selected = Selection::Node("n1".into());
        assert_eq!(key_action(&selected, "Delete", false), KeyAction::ConfirmDelete);
        assert_eq!(key_action(&selected, "Backspace", false), KeyAction::ConfirmDelete);
        assert_eq!(
            key_action(&Selection::None, "Delete", false),
            KeyAction::Ignore,
            "без выбора удалять нечего"
        );
        assert_eq!(key_action(&Selection::None, "k", true), KeyAction::FocusSearch);
        assert_eq!(key_action(&selected, "k", false), KeyAction::Ignore);
    }

    #[test]
    fn test_fit_view_covers_all_nodes() {
        let mut controller = controller_with_nodes(vec![
            node("n1", "SW1", "switch", None),
            node("n2", "R1", "router", None),
        ]);
        controller.view.nodes[1].position = Position { x: 500.0, y: 300.0 };

        controller.fit_view();

        // Оба угла графа должны оказаться внутри видимой области
        let vp = controller.viewport;
        let (left, top) = vp.screen_to_canvas(0.0, 0.0);
        let (right, bottom) = vp.screen_to_canvas(vp.width, vp.height);
        assert!(left <= 0.0 && top <= 0.0);
        assert!(right >= 500.0 + layout::NODE_WIDTH);
        assert!(bottom >= 300.0 + layout::NODE_HEIGHT);
    }
}
