use serde::{Deserialize, Serialize};

use crate::point::{near_zero, Point};

/// Slope reported for a handle whose x offset rounds to zero.
pub const TANGENT_SENTINEL: f64 = 1e8;

/// A sampled value with its two tangent handles.
///
/// `left` and `right` are offsets relative to `current`, not absolute
/// positions. Serialized as `[[cx, cy], [lx, ly], [rx, ry]]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[Point; 3]", into = "[Point; 3]")]
pub struct Keyframe {
    pub current: Point,
    pub left: Point,
    pub right: Point,
}

impl Keyframe {
    /// Keyframe with both handles at `(0, 0)`.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self::from_point(Point::new(x, y))
    }

    #[inline]
    pub fn from_point(current: Point) -> Self {
        Self {
            current,
            left: Point::default(),
            right: Point::default(),
        }
    }

    #[inline]
    pub fn with_handles(current: Point, left: Point, right: Point) -> Self {
        Self {
            current,
            left,
            right,
        }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.current.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.current.y
    }

    #[inline]
    pub fn left_tangent(&self) -> f64 {
        slope(self.left)
    }

    #[inline]
    pub fn right_tangent(&self) -> f64 {
        slope(self.right)
    }

    pub fn to_array(&self) -> [[f64; 2]; 3] {
        [
            self.current.to_array(),
            self.left.to_array(),
            self.right.to_array(),
        ]
    }
}

fn slope(handle: Point) -> f64 {
    if near_zero(handle.x) {
        TANGENT_SENTINEL
    } else {
        handle.y / handle.x
    }
}

impl From<[Point; 3]> for Keyframe {
    fn from([current, left, right]: [Point; 3]) -> Self {
        Self::with_handles(current, left, right)
    }
}

impl From<Keyframe> for [Point; 3] {
    fn from(k: Keyframe) -> Self {
        [k.current, k.left, k.right]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(left: (f64, f64), right: (f64, f64)) -> Keyframe {
        Keyframe::with_handles(
            Point::new(0.0, 0.0),
            Point::new(left.0, left.1),
            Point::new(right.0, right.1),
        )
    }

    #[test]
    fn test_equality() {
        let base = key((-1.0, -1.0), (1.0, 1.0));
        assert_eq!(base, key((-1.0, -1.0), (1.0, 1.0)));
        assert_ne!(base, key((-2.0, -1.0), (1.0, 1.0)));
        assert_ne!(base, key((-1.0, -1.0), (-1.0, 1.0)));
        let moved = Keyframe::with_handles(base.current + Point::new(0.0, 1.0), base.left, base.right);
        assert_ne!(base, moved);
    }

    #[test]
    fn test_tangents() {
        assert_eq!(key((-1.0, -1.0), (1.0, 1.0)).left_tangent(), 1.0);
        assert_eq!(key((-1.0, 2.0), (1.0, 1.0)).left_tangent(), -2.0);
        assert_eq!(key((-1.0, -1.0), (1.0, -2.0)).right_tangent(), -2.0);
    }

    #[test]
    fn test_tangent_sentinel() {
        assert_eq!(key((0.0, 0.0), (1.0, 1.0)).left_tangent(), TANGENT_SENTINEL);
        assert_eq!(key((-1.0, -1.0), (0.0, 1.0)).right_tangent(), TANGENT_SENTINEL);
        assert_eq!(key((1e-9, 5.0), (1.0, 1.0)).left_tangent(), TANGENT_SENTINEL);
        assert_eq!(Keyframe::new(3.0, 4.0).right_tangent(), TANGENT_SENTINEL);
    }

    #[test]
    fn test_to_array() {
        assert_eq!(
            key((-1.0, -1.0), (1.0, 1.0)).to_array(),
            [[0.0, 0.0], [-1.0, -1.0], [1.0, 1.0]]
        );
    }
}
