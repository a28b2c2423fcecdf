//! Integer rectangles in target-surface pixel space.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle with integer pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub origin: IVec2,
    /// Width and height (never negative for a valid rect)
    pub size: IVec2,
}

impl Rect {
    /// The empty rect at the origin.
    pub const ZERO: Self = Self {
        origin: IVec2::ZERO,
        size: IVec2::ZERO,
    };

    /// Create a rect from position and size.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            origin: IVec2::new(x, y),
            size: IVec2::new(width.max(0), height.max(0)),
        }
    }

    /// Create a rect of the given size anchored at the origin.
    pub fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Bottom-right corner (exclusive).
    pub fn max(&self) -> IVec2 {
        self.origin + self.size
    }

    /// Check if the rect covers no pixels
    pub fn is_empty(&self) -> bool {
        self.size.x <= 0 || self.size.y <= 0
    }

    /// Number of pixels covered.
    pub fn area(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            i64::from(self.size.x) * i64::from(self.size.y)
        }
    }

    /// Returns true if `other` lies entirely inside this rect.
    ///
    /// An empty rect is contained by every rect.
    pub fn contains(&self, other: &Rect) -> bool {
        if other.is_empty() {
            return true;
        }
        other.origin.cmpge(self.origin).all() && other.max().cmple(self.max()).all()
    }

    /// Smallest rect covering both rects. Empty inputs are ignored.
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let min = self.origin.min(other.origin);
        let max = self.max().max(other.max());
        Rect {
            origin: min,
            size: max - min,
        }
    }

    /// Overlapping area of both rects, or [`Rect::ZERO`] when disjoint.
    pub fn intersection(&self, other: &Rect) -> Rect {
        let min = self.origin.max(other.origin);
        let max = self.max().min(other.max());
        if max.x <= min.x || max.y <= min.y {
            return Rect::ZERO;
        }
        Rect {
            origin: min,
            size: max - min,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_size_clamped() {
        let rect = Rect::new(4, 4, -10, 3);
        assert!(rect.is_empty());
        assert_eq!(rect.area(), 0);
    }

    #[test]
    fn test_union_and_contains() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        let u = a.union(&b);
        assert_eq!(u, Rect::new(0, 0, 15, 15));
        assert!(u.contains(&a));
        assert!(u.contains(&b));
        assert!(!a.contains(&b));
        assert_eq!(a.union(&Rect::ZERO), a);
    }

    #[test]
    fn test_intersection() {
        let a = Rect::new(0, 0, 10, 10);
        assert_eq!(a.intersection(&Rect::new(5, 5, 10, 10)), Rect::new(5, 5, 5, 5));
        assert!(a.intersection(&Rect::new(20, 20, 1, 1)).is_empty());
    }
}
