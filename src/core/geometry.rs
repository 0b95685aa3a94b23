//! Logical display space and its mapping onto terminal cells.
//!
//! The server simulates a 128×64 display. Everything the client sends or
//! receives is in those logical units; the only place screen units appear is
//! the [`Viewport`], the centred container rectangle the logical space is
//! stretched onto with a single uniform scale factor.

use ratatui::layout::Rect;

pub const LOGICAL_WIDTH: f64 = 128.0;
pub const LOGICAL_HEIGHT: f64 = 64.0;

/// Terminal cells are roughly twice as tall as they are wide.
pub const DEFAULT_CELL_ASPECT: f64 = 2.0;

/// A position in logical display units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogicalPoint {
    pub x: f64,
    pub y: f64,
}

impl LogicalPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Pin the point inside [0,128]×[0,64].
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(0.0, LOGICAL_WIDTH),
            y: self.y.clamp(0.0, LOGICAL_HEIGHT),
        }
    }
}

/// Container rectangle in terminal cells, fractional so scaling stays exact.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Largest rectangle with the logical aspect ratio that fits inside `area`.
    ///
    /// `cell_aspect` is the height of a cell divided by its width; the scale is
    /// `min(widthRatio, heightRatio)` measured in square units so the
    /// proportions of the 128×64 display survive any terminal shape.
    pub fn fit(area: Rect, cell_aspect: f64) -> Self {
        let cell_aspect = if cell_aspect > 0.0 { cell_aspect } else { 1.0 };
        let available_w = area.width as f64;
        let available_h = area.height as f64;

        let scale = (available_w / LOGICAL_WIDTH).min(available_h * cell_aspect / LOGICAL_HEIGHT);
        let width = LOGICAL_WIDTH * scale;
        let height = LOGICAL_HEIGHT * scale / cell_aspect;

        Self {
            left: area.x as f64 + (available_w - width) / 2.0,
            top: area.y as f64 + (available_h - height) / 2.0,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Whether a screen position falls inside the container.
    pub fn contains(&self, column: f64, row: f64) -> bool {
        !self.is_empty()
            && column >= self.left
            && column <= self.left + self.width
            && row >= self.top
            && row <= self.top + self.height
    }

    /// Container-relative screen position of a logical point.
    pub fn scale(&self, point: LogicalPoint) -> (f64, f64) {
        (
            point.x / LOGICAL_WIDTH * self.width,
            point.y / LOGICAL_HEIGHT * self.height,
        )
    }

    /// Horizontal and vertical extent, in cells, of a logical length.
    pub fn scale_length(&self, length: f64) -> (f64, f64) {
        (
            length / LOGICAL_WIDTH * self.width,
            length / LOGICAL_HEIGHT * self.height,
        )
    }

    /// Logical point under an absolute screen position, clamped to the display.
    ///
    /// Returns `None` while the container has no area.
    pub fn to_logical(&self, column: f64, row: f64) -> Option<LogicalPoint> {
        if self.is_empty() {
            return None;
        }
        let x = (column - self.left) / self.width * LOGICAL_WIDTH;
        let y = (row - self.top) / self.height * LOGICAL_HEIGHT;
        Some(LogicalPoint::new(x, y).clamped())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_fit_is_limited_by_width() {
        // 64 cols × 100 rows: width ratio 0.5, height ratio 100*2/64 > 0.5
        let vp = Viewport::fit(Rect::new(0, 0, 64, 100), 2.0);
        assert!(approx(vp.width, 64.0));
        assert!(approx(vp.height, 16.0));
        assert!(approx(vp.left, 0.0));
        assert!(approx(vp.top, 42.0));
    }

    #[test]
    fn test_fit_is_limited_by_height() {
        // 200 cols × 20 rows: height ratio 20*2/64 = 0.625 < 200/128
        let vp = Viewport::fit(Rect::new(10, 5, 200, 20), 2.0);
        assert!(approx(vp.width, 80.0));
        assert!(approx(vp.height, 20.0));
        assert!(approx(vp.left, 10.0 + 60.0));
        assert!(approx(vp.top, 5.0));
    }

    #[test]
    fn test_fit_keeps_logical_proportions_with_square_cells() {
        let vp = Viewport::fit(Rect::new(0, 0, 300, 300), 1.0);
        assert!(approx(vp.width / vp.height, LOGICAL_WIDTH / LOGICAL_HEIGHT));
    }

    #[test]
    fn test_fit_of_empty_area_is_empty() {
        let vp = Viewport::fit(Rect::new(0, 0, 0, 40), 2.0);
        assert!(vp.is_empty());
        assert_eq!(vp.to_logical(3.0, 3.0), None);
    }

    #[test]
    fn test_scale_maps_logical_corners() {
        let vp = Viewport { left: 4.0, top: 2.0, width: 128.0, height: 32.0 };
        assert_eq!(vp.scale(LogicalPoint::new(0.0, 0.0)), (0.0, 0.0));
        assert_eq!(vp.scale(LogicalPoint::new(128.0, 64.0)), (128.0, 32.0));
        assert_eq!(vp.scale(LogicalPoint::new(64.0, 16.0)), (64.0, 8.0));
    }

    #[test]
    fn test_scale_length_is_uniform_in_square_units() {
        // 2:1 cells: a 16-unit radius is 16 cells wide and 8 cells tall
        let vp = Viewport { left: 0.0, top: 0.0, width: 128.0, height: 32.0 };
        let (rx, ry) = vp.scale_length(16.0);
        assert!(approx(rx, 16.0));
        assert!(approx(ry, 8.0));
    }

    #[test]
    fn test_to_logical_inverts_scale() {
        let vp = Viewport { left: 10.0, top: 4.0, width: 64.0, height: 16.0 };
        let p = vp.to_logical(10.0 + 32.0, 4.0 + 4.0).unwrap();
        assert!(approx(p.x, 64.0));
        assert!(approx(p.y, 16.0));
    }

    #[test]
    fn test_to_logical_clamps_outside_positions() {
        let vp = Viewport { left: 10.0, top: 4.0, width: 64.0, height: 16.0 };
        let right = vp.to_logical(500.0, 12.0).unwrap();
        assert_eq!(right.x, LOGICAL_WIDTH);
        let above_left = vp.to_logical(0.0, 0.0).unwrap();
        assert_eq!(above_left, LogicalPoint::new(0.0, 0.0));
        let below = vp.to_logical(20.0, 99.0).unwrap();
        assert_eq!(below.y, LOGICAL_HEIGHT);
    }

    #[test]
    fn test_contains_edges() {
        let vp = Viewport { left: 10.0, top: 4.0, width: 64.0, height: 16.0 };
        assert!(vp.contains(10.0, 4.0));
        assert!(vp.contains(74.0, 20.0));
        assert!(!vp.contains(9.5, 10.0));
        assert!(!vp.contains(30.0, 20.5));
    }
}
