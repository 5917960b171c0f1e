use anyhow::{Context, Result};
use winit::window::{Window, WindowId};

use crate::device::{Gpu, SurfaceErrorAction};
use crate::input::{InputFrame, InputState};
use crate::render::{FrameStats, RenderError, Renderer, WgpuBackend};
use crate::time::FrameTime;
use crate::window::RuntimeCtx;

/// Window handle and metadata for the current frame.
pub struct WindowCtx<'a> {
    pub id:     WindowId,
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    /// Framebuffer size as `(width, height)` in physical pixels.
    pub fn physical_size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window:      WindowCtx<'a>,
    pub gpu:         &'a mut Gpu<'w>,
    pub input:       &'a InputState,
    pub input_frame: &'a InputFrame,
    pub time:        FrameTime,
    pub runtime:     &'a mut RuntimeCtx,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Runs one renderer frame against the window surface and presents it.
    ///
    /// Acquires the surface texture, brackets `draw` with `begin_frame`/`end_frame`
    /// and presents. `end_frame` runs even when `draw` fails so the renderer is left
    /// idle. Returns `Ok(None)` when the frame was skipped (minimized window, transient
    /// surface error); an unrecoverable surface error is returned as `Err`.
    pub fn render<F>(
        &mut self,
        renderer: &mut Renderer<WgpuBackend>,
        draw: F,
    ) -> Result<Option<FrameStats>>
    where
        F: FnOnce(&mut Renderer<WgpuBackend>) -> Result<(), RenderError>,
    {
        let viewport = self.gpu.viewport();
        if !viewport.is_valid() {
            return Ok(None);
        }

        let frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => Err(anyhow::anyhow!("surface is unrecoverable")),
                    _ => Ok(None),
                };
            }
        };

        renderer.begin_frame(viewport, frame.view().clone());
        let drawn = draw(renderer);
        let ended = renderer.end_frame();

        drawn.context("frame draw failed")?;
        let stats = ended.context("end_frame failed")?;

        self.window.window.pre_present_notify();
        frame.present();

        Ok(Some(stats))
    }
}
