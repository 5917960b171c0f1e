use std::path::Path;

use crate::coords::Rect;

use super::error::TextureError;

/// Backend-assigned texture handle.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

/// A GPU texture owned by a backend and referenced by batches.
///
/// Batches hold the id only; releasing the texture is the caller's job.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Texture {
    id: TextureId,
    width: u32,
    height: u32,
}

impl Texture {
    /// Called by backends after a successful upload.
    #[inline]
    pub const fn new(id: TextureId, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }

    #[inline]
    pub const fn id(&self) -> TextureId {
        self.id
    }

    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Normalizes a texel-space source rectangle into texcoords, in corner order.
    ///
    /// `u = x / width`, `v = y / height`, for the four corners of `src`.
    pub fn uv_quad(&self, src: Rect) -> [[f32; 2]; 4] {
        let w = self.width.max(1) as f32;
        let h = self.height.max(1) as f32;
        let min = src.min();
        let max = src.max();
        let (u0, v0, u1, v1) = (min.x / w, min.y / h, max.x / w, max.y / h);
        [[u0, v0], [u1, v0], [u1, v1], [u0, v1]]
    }
}

/// Decoded RGBA8 pixels ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl ImageData {
    /// Wraps an RGBA8 buffer, rejecting empty images and mismatched lengths.
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::Empty { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(TextureError::SizeMismatch { expected, actual: rgba.len() });
        }
        Ok(Self { width, height, rgba })
    }

    /// Single-color image.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, TextureError> {
        let pixels = rgba.repeat(width as usize * height as usize);
        Self::new(width, height, pixels)
    }

    /// Decodes an image file through the `image` crate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let decoded = image::open(path)
            .map_err(|source| TextureError::Decode { path: path.to_path_buf(), source })?
            .to_rgba8();
        let (width, height) = decoded.dimensions();
        log::debug!("decoded {} ({width}x{height})", path.display());
        Self::new(width, height, decoded.into_raw())
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.rgba
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uv_quad_normalizes_against_texture_size() {
        let tex = Texture::new(TextureId(1), 64, 64);
        let uv = tex.uv_quad(Rect::new(0.0, 0.0, 32.0, 32.0));
        assert_eq!(uv[0], [0.0, 0.0]);
        assert_eq!(uv[2], [0.5, 0.5]);
        assert_eq!(uv[1], [0.5, 0.0]);
        assert_eq!(uv[3], [0.0, 0.5]);
    }

    #[test]
    fn uv_quad_handles_offset_regions() {
        let tex = Texture::new(TextureId(2), 128, 32);
        let uv = tex.uv_quad(Rect::new(32.0, 16.0, 32.0, 16.0));
        assert_eq!(uv[0], [0.25, 0.5]);
        assert_eq!(uv[2], [0.5, 1.0]);
    }

    #[test]
    fn empty_image_is_rejected() {
        assert!(matches!(
            ImageData::new(0, 4, Vec::new()),
            Err(TextureError::Empty { width: 0, height: 4 })
        ));
    }

    #[test]
    fn short_buffer_is_rejected() {
        assert!(matches!(
            ImageData::new(2, 2, vec![0; 15]),
            Err(TextureError::SizeMismatch { expected: 16, actual: 15 })
        ));
    }

    #[test]
    fn solid_fills_every_pixel() {
        let img = ImageData::solid(2, 3, [1, 2, 3, 4]).unwrap();
        assert_eq!(img.pixels().len(), 24);
        assert!(img.pixels().chunks(4).all(|px| px == [1, 2, 3, 4]));
    }

    #[test]
    fn missing_file_is_a_decode_error() {
        let err = ImageData::load("definitely/not/here.png").unwrap_err();
        assert!(matches!(err, TextureError::Decode { .. }));
    }
}
