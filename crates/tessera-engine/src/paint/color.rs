/// Straight-alpha RGBA color with 8 bits per channel.
///
/// This is the authoring format for every draw primitive. Vertices carry the
/// normalized form produced by [`Color::to_normalized`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Converts each channel to `[0, 1]` by dividing by 255.
    ///
    /// Values such as 128 are not exactly representable; the rounding is acceptable
    /// for rendering and should not be compared exactly.
    #[inline]
    pub fn to_normalized(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }

    /// Same color with a different alpha.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }
}

impl From<[u8; 4]> for Color {
    #[inline]
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::rgba(r, g, b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_each_channel() {
        let n = Color::rgba(255, 0, 128, 255).to_normalized();
        assert_eq!(n[0], 1.0);
        assert_eq!(n[1], 0.0);
        assert!((n[2] - 128.0 / 255.0).abs() < 1e-6);
        assert!((n[2] - 0.502).abs() < 1e-3);
        assert_eq!(n[3], 1.0);
    }

    #[test]
    fn rgb_is_opaque() {
        assert_eq!(Color::rgb(1, 2, 3).a, 255);
        assert_eq!(Color::from([1, 2, 3, 4]), Color::rgba(1, 2, 3, 4));
    }

    #[test]
    fn with_alpha_keeps_rgb() {
        let c = Color::RED.with_alpha(10);
        assert_eq!(c, Color::rgba(255, 0, 0, 10));
        assert_eq!(Color::TRANSPARENT.to_normalized(), [0.0; 4]);
    }
}
