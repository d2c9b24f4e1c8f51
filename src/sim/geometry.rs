//! Axis-aligned rectangles and playfield bounds

use glam::Vec2;

/// Drawing-surface bounds used for spawning and edge checks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Axis-aligned rectangle, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Inclusive point test (edges count as inside)
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

/// True iff the rectangles share a region of non-zero area.
///
/// Rectangles that only touch along an edge do not overlap.
#[inline]
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// Clamp the start of a span of length `extent` so it stays within `[0, bound]`.
///
/// When the span is longer than the bound the result is pinned to 0.
#[inline]
pub fn clamp_span(value: f32, extent: f32, bound: f32) -> f32 {
    value.min(bound - extent).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bullet_inside_enemy_overlaps() {
        let bullet = Rect::new(48.0, 48.0, 5.0, 10.0);
        let enemy = Rect::new(45.0, 45.0, 50.0, 50.0);
        assert!(overlaps(bullet, enemy));
        assert!(overlaps(enemy, bullet));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!overlaps(a, right));
        assert!(!overlaps(a, below));
    }

    #[test]
    fn test_disjoint_rects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(100.0, 100.0, 10.0, 10.0);
        assert!(!overlaps(a, b));
    }

    #[test]
    fn test_contains_point_is_inclusive() {
        let button = Rect::new(100.0, 200.0, 150.0, 50.0);
        assert!(button.contains_point(100.0, 200.0));
        assert!(button.contains_point(250.0, 250.0));
        assert!(button.contains_point(175.0, 225.0));
        assert!(!button.contains_point(99.9, 225.0));
        assert!(!button.contains_point(175.0, 250.1));
    }

    #[test]
    fn test_clamp_span() {
        assert_eq!(clamp_span(-20.0, 80.0, 800.0), 0.0);
        assert_eq!(clamp_span(790.0, 80.0, 800.0), 720.0);
        assert_eq!(clamp_span(300.0, 80.0, 800.0), 300.0);
        // Span wider than the bound pins to the origin
        assert_eq!(clamp_span(10.0, 80.0, 50.0), 0.0);
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in 1.0f32..200.0, ah in 1.0f32..200.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            bw in 1.0f32..200.0, bh in 1.0f32..200.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(overlaps(a, b), overlaps(b, a));
        }

        #[test]
        fn prop_clamped_span_stays_inside(
            value in -2000.0f32..2000.0,
            extent in 1.0f32..100.0,
            bound in 100.0f32..2000.0,
        ) {
            let start = clamp_span(value, extent, bound);
            prop_assert!(start >= 0.0);
            prop_assert!(start + extent <= bound + 1e-3);
        }
    }
}
