//! Видовая трансформация канвы: пан/зум и преобразования координат.

/// Пан/зум, применяемый ко всей видимой области канвы.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    /// Коэффициент зума (1.0 = 100%, ограничен 0.1..10.0)
    pub k: f64,
    /// Размер видимой области в экранных пикселях
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            k: 1.0,
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl Viewport {
    /// Экранные координаты → координаты канвы.
    pub fn screen_to_canvas(&self, sx: f64, sy: f64) -> (f64, f64) {
        ((sx - self.x) / self.k, (sy - self.y) / self.k)
    }

    /// Центр видимой области в координатах канвы.
    pub fn view_center(&self) -> (f64, f64) {
        self.screen_to_canvas(self.width / 2.0, self.height / 2.0)
    }

    /// Вписать прямоугольник в видимую область с отступом.
    pub fn fit_bounds(&mut self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) {
        const PADDING: f64 = 40.0;

        let w = (max_x - min_x).max(1.0);
        let h = (max_y - min_y).max(1.0);
        let k = ((self.width - PADDING * 2.0) / w)
            .min((self.height - PADDING * 2.0) / h)
            .clamp(0.1, 10.0);

        self.k = k;
        self.x = self.width / 2.0 - (min_x + w / 2.0) * k;
        self.y = self.height / 2.0 - (min_y + h / 2.0) * k;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_to_canvas_inverts_transform() {
        let viewport = Viewport {
            x: 100.0,
            y: 50.0,
            k: 2.0,
            ..Viewport::default()
        };

        let (cx, cy) = viewport.screen_to_canvas(300.0, 250.0);
        assert_eq!((cx, cy), (100.0, 100.0));
    }

    #[test]
    fn test_view_center_identity_transform() {
        let viewport = Viewport::default();
        assert_eq!(viewport.view_center(), (640.0, 360.0));
    }

    #[test]
    fn test_fit_bounds_centers_content() {
        let mut viewport = Viewport::default();
        viewport.fit_bounds(0.0, 0.0, 600.0, 320.0);

        // Центр границ должен попасть в центр экрана
        let (cx, cy) = viewport.view_center();
        assert!((cx - 300.0).abs() < 1e-9, "центр по x: {cx}");
        assert!((cy - 160.0).abs() < 1e-9, "центр по y: {cy}");
    }
}
