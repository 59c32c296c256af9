//! Rectangle type for image bounds.
//!
//! # Coordinate System
//!
//! All coordinates use the standard image convention:
//! - Origin (0, 0) is at the **top-left** corner
//! - X increases to the right
//! - Y increases downward
//!
//! # Usage
//!
//! ```rust
//! use imgblend_core::Rect;
//!
//! let a = Rect::from_size(10, 10);
//! let b = Rect::from_size(4, 6);
//! let overlap = a.overlap_size(&b);
//! assert_eq!((overlap.width, overlap.height), (4, 6));
//! ```

/// A rectangle defined by origin (x, y) and dimensions (width, height).
///
/// A rectangle with zero width or height is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// X coordinate of the top-left corner.
    pub x: u32,
    /// Y coordinate of the top-left corner.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Rect {
    /// Creates a new rectangle.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Returns the right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Returns the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Returns the area in pixels.
    #[inline]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Returns `true` if width or height is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `true` if the point lies inside the rectangle.
    #[inline]
    pub const fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Size of the region two images share when aligned at their top-left
    /// corners: `(min(w), min(h))`, anchored at (0, 0).
    #[inline]
    pub fn overlap_size(&self, other: &Rect) -> Rect {
        Rect::from_size(self.width.min(other.width), self.height.min(other.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10, 20, 100, 50);
        assert_eq!(r.right(), 110);
        assert_eq!(r.bottom(), 70);
        assert_eq!(r.area(), 5000);
        assert!(r.contains(10, 20));
        assert!(!r.contains(110, 20));
    }

    #[test]
    fn test_overlap_size() {
        let a = Rect::from_size(10, 10);
        let b = Rect::from_size(4, 6);
        assert_eq!(a.overlap_size(&b), Rect::from_size(4, 6));
        assert_eq!(b.overlap_size(&a), Rect::from_size(4, 6));
    }

    #[test]
    fn test_overlap_with_empty() {
        let a = Rect::from_size(10, 10);
        let b = Rect::from_size(0, 3);
        assert!(a.overlap_size(&b).is_empty());
    }
}
