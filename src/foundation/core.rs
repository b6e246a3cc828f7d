pub use kurbo::{Line, Point, Rect, Size, Vec2};

/// A plain 2D point in diagram coordinates (y grows downwards).
pub type Position = Point;

/// Width/height pair.
pub type Size2d = Size;

/// Three-way sign with `sign(0.0) == 0.0`, unlike [`f64::signum`].
pub(crate) fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}
