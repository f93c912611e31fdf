// File: crates/chart-core/src/geometry.rs
// Summary: Lightweight geometry helpers for pixel math.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from `self` along `degrees` (0 = east, clockwise on screen).
    pub fn polar(self, degrees: f32, radius: f32) -> Self {
        let rad = degrees.to_radians();
        Self { x: self.x + rad.cos() * radius, y: self.y + rad.sin() * radius }
    }
}

impl From<(f32, f32)> for PointF {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }
    pub fn from_ltwh(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, right: left + width, bottom: top + height }
    }
    /// Rectangle spanning two y positions regardless of their order.
    pub fn from_x_span(left: f32, right: f32, y0: f32, y1: f32) -> Self {
        Self { left, top: y0.min(y1), right, bottom: y0.max(y1) }
    }
    pub fn width(&self) -> f32 { self.right - self.left }
    pub fn height(&self) -> f32 { self.bottom - self.top }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polar_zero_degrees_points_east() {
        let p = PointF::new(10.0, 10.0).polar(0.0, 5.0);
        assert!((p.x - 15.0).abs() < 1e-5 && (p.y - 10.0).abs() < 1e-5);
        let up = PointF::new(0.0, 0.0).polar(-90.0, 5.0);
        assert!((up.y + 5.0).abs() < 1e-5);
    }

    #[test]
    fn span_rect_normalizes_order() {
        let r = Rect::from_x_span(0.0, 4.0, 30.0, 10.0);
        assert_eq!((r.top, r.bottom, r.height()), (10.0, 30.0, 20.0));
        assert_eq!(r.width(), 4.0);
    }
}
