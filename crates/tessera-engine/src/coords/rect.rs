use super::Vec2;

/// Axis-aligned rectangle in framebuffer pixels (top-left origin).
///
/// Used both for destination geometry and for texel source regions.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Returns the rectangle moved by `delta`.
    #[inline]
    pub fn translated(self, delta: Vec2) -> Self {
        Self::from_origin_size(self.origin + delta, self.size)
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let mut x = self.origin.x;
        let mut y = self.origin.y;
        let mut w = self.size.x;
        let mut h = self.size.y;

        if w < 0.0 {
            x += w;
            w = -w;
        }
        if h < 0.0 {
            y += h;
            h = -h;
        }

        Rect::new(x, y, w, h)
    }

    /// Corners in quad winding order: top-left, top-right, bottom-right, bottom-left.
    ///
    /// Paired with the index pattern `[0, 1, 2, 0, 2, 3]` this yields two triangles
    /// with consistent winding.
    #[inline]
    pub fn corners(self) -> [Vec2; 4] {
        let min = self.min();
        let max = self.max();
        [
            Vec2::new(min.x, min.y),
            Vec2::new(max.x, min.y),
            Vec2::new(max.x, max.y),
            Vec2::new(min.x, max.y),
        ]
    }

    /// The four edges as independent segments, walking the corners clockwise on screen.
    #[inline]
    pub fn edges(self) -> [(Vec2, Vec2); 4] {
        let [tl, tr, br, bl] = self.corners();
        [(tl, tr), (tr, br), (br, bl), (bl, tl)]
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let r = self.normalized();
        p.x >= r.origin.x
            && p.y >= r.origin.y
            && p.x < (r.origin.x + r.size.x)
            && p.y < (r.origin.y + r.size.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── corners / edges ───────────────────────────────────────────────────

    #[test]
    fn corners_follow_quad_order() {
        let c = r(10.0, 20.0, 30.0, 40.0).corners();
        assert_eq!(c[0], Vec2::new(10.0, 20.0));
        assert_eq!(c[1], Vec2::new(40.0, 20.0));
        assert_eq!(c[2], Vec2::new(40.0, 60.0));
        assert_eq!(c[3], Vec2::new(10.0, 60.0));
    }

    #[test]
    fn edges_form_a_closed_loop() {
        let edges = r(0.0, 0.0, 5.0, 5.0).edges();
        for i in 0..4 {
            assert_eq!(edges[i].1, edges[(i + 1) % 4].0);
        }
    }

    // ── normalized ────────────────────────────────────────────────────────

    #[test]
    fn normalized_positive_is_identity() {
        let rect = r(1.0, 2.0, 10.0, 20.0);
        assert_eq!(rect.normalized(), rect);
    }

    #[test]
    fn normalized_negative_extent() {
        let n = r(10.0, 10.0, -4.0, -3.0).normalized();
        assert_eq!(n, r(6.0, 7.0, 4.0, 3.0));
    }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_top_left_inclusive() {
        assert!(r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn contains_bottom_right_exclusive() {
        assert!(!r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn translated_keeps_size() {
        let t = r(1.0, 1.0, 2.0, 3.0).translated(Vec2::new(4.0, -1.0));
        assert_eq!(t, r(5.0, 0.0, 2.0, 3.0));
        assert_eq!(t.center(), Vec2::new(6.0, 1.5));
    }

    #[test]
    fn is_empty_zero_size() {
        assert!(r(0.0, 0.0, 0.0, 5.0).is_empty());
        assert!(!r(0.0, 0.0, 1.0, 1.0).is_empty());
    }
}
