//! A GPU-free backend that records what the renderer asks of it.
//!
//! Useful for tests and for driving the batching logic without a device.

use std::collections::HashMap;

use crate::paint::Color;

use super::backend::{DrawSubmission, RenderBackend, Transforms};
use super::error::{RenderError, ShaderError, TextureError};
use super::texture::{ImageData, Texture, TextureId};
use super::vertex::Topology;

/// Owned copy of one [`DrawSubmission`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    pub batch: String,
    pub topology: Topology,
    pub positions: Vec<[f32; 3]>,
    pub texcoords: Vec<[f32; 2]>,
    pub colors: Vec<[f32; 4]>,
    pub indices: Vec<u32>,
    pub texture: Option<TextureId>,
    pub transforms: Transforms,
}

/// Buffer "allocation" for one batch.
#[derive(Debug, Clone)]
pub struct HeadlessBuffers {
    pub label: String,
    pub topology: Topology,
    pub vertex_capacity: usize,
    pub index_capacity: usize,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct HeadlessProgram(u32);

/// Recording backend.
///
/// The render target is `()`; `set_target(Some(()))` marks a frame as bound.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    submissions: Vec<RecordedDraw>,
    clears: Vec<Color>,
    textures: HashMap<TextureId, (u32, u32)>,
    next_texture: u32,
    programs: u32,
    target_bound: bool,
    fail_program: Option<ShaderError>,
    fail_submit: Option<Topology>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every `create_program` call fail with `error`.
    pub fn with_program_error(mut self, error: ShaderError) -> Self {
        self.fail_program = Some(error);
        self
    }

    /// Makes the next `submit` of `topology` fail as if the target were lost.
    pub fn fail_next_submit(&mut self, topology: Topology) {
        self.fail_submit = Some(topology);
    }

    /// Draw calls in submission order.
    pub fn submissions(&self) -> &[RecordedDraw] {
        &self.submissions
    }

    pub fn clears(&self) -> &[Color] {
        &self.clears
    }

    /// Number of live textures.
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn target_bound(&self) -> bool {
        self.target_bound
    }

    /// Forgets recorded draws and clears.
    pub fn reset_log(&mut self) {
        self.submissions.clear();
        self.clears.clear();
    }
}

impl RenderBackend for HeadlessBackend {
    type Buffers = HeadlessBuffers;
    type Program = HeadlessProgram;
    type Target = ();

    fn create_program(&mut self) -> Result<HeadlessProgram, ShaderError> {
        if let Some(err) = &self.fail_program {
            return Err(err.clone());
        }
        self.programs += 1;
        Ok(HeadlessProgram(self.programs))
    }

    fn create_buffers(
        &mut self,
        label: &str,
        topology: Topology,
        vertex_capacity: usize,
        index_capacity: usize,
    ) -> HeadlessBuffers {
        HeadlessBuffers {
            label: label.to_owned(),
            topology,
            vertex_capacity,
            index_capacity,
        }
    }

    fn create_texture(&mut self, image: &ImageData) -> Result<Texture, TextureError> {
        self.next_texture += 1;
        let id = TextureId(self.next_texture);
        self.textures.insert(id, (image.width(), image.height()));
        Ok(Texture::new(id, image.width(), image.height()))
    }

    fn release_texture(&mut self, texture: Texture) {
        self.textures.remove(&texture.id());
    }

    fn set_target(&mut self, target: Option<()>) {
        self.target_bound = target.is_some();
    }

    fn clear(&mut self, color: Color) -> Result<(), RenderError> {
        if !self.target_bound {
            return Err(RenderError::NoTarget);
        }
        self.clears.push(color);
        Ok(())
    }

    fn submit(
        &mut self,
        _program: &HeadlessProgram,
        buffers: &mut HeadlessBuffers,
        draw: &DrawSubmission<'_>,
    ) -> Result<(), RenderError> {
        if !self.target_bound {
            return Err(RenderError::NoTarget);
        }
        if self.fail_submit == Some(draw.topology) {
            self.fail_submit = None;
            return Err(RenderError::NoTarget);
        }
        if let Some(id) = draw.texture {
            if !self.textures.contains_key(&id) {
                return Err(RenderError::UnknownTexture(id));
            }
        }
        debug_assert!(draw.vertex_count() <= buffers.vertex_capacity);
        debug_assert!(draw.index_count() <= buffers.index_capacity);

        self.submissions.push(RecordedDraw {
            batch: buffers.label.clone(),
            topology: draw.topology,
            positions: draw.positions.to_vec(),
            texcoords: draw.texcoords.to_vec(),
            colors: draw.colors.to_vec(),
            indices: draw.indices.to_vec(),
            texture: draw.texture,
            transforms: *draw.transforms,
        });
        Ok(())
    }
}
