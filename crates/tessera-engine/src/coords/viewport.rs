/// Framebuffer size in pixels.
///
/// Seeds the orthographic projection at the start of every frame.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Builds a viewport from an integer framebuffer size.
    #[inline]
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(width as f32, height as f32)
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Returns a copy with both dimensions raised to at least one pixel.
    ///
    /// A minimized window reports a 0x0 framebuffer; the projection must stay invertible.
    #[inline]
    pub fn clamped(self) -> Self {
        let w = if self.width.is_finite() { self.width.max(1.0) } else { 1.0 };
        let h = if self.height.is_finite() { self.height.max(1.0) } else { 1.0 };
        Self::new(w, h)
    }
}
