mod bounce;

use std::path::PathBuf;

use anyhow::{Context, Result};
use glam::{Mat4, Vec3};

use tessera_engine::coords::{Rect, Vec2, Viewport};
use tessera_engine::core::{App, AppControl, FrameCtx};
use tessera_engine::device::{Gpu, GpuInit};
use tessera_engine::input::Key;
use tessera_engine::logging::{init_logging, LoggingConfig};
use tessera_engine::paint::Color;
use tessera_engine::render::{
    ImageData, RenderBackend, RenderError, Renderer, RendererConfig, Texture, TextureError,
    WgpuBackend,
};
use tessera_engine::time::FpsCounter;
use tessera_engine::window::{PhysicalSize, Runtime, RuntimeConfig};

use bounce::{initial_bouncers, Bouncer};

const TITLE: &str = "tessera";
const GRID_STEP: f32 = 40.0;
const BACKGROUND: Color = Color::rgb(18, 18, 24);
const GRID: Color = Color::rgba(255, 255, 255, 40);
const CHECKER_LIGHT: [u8; 4] = [235, 235, 235, 255];
const CHECKER_DARK: [u8; 4] = [40, 90, 200, 255];

/// Usage: `tessera-demo [IMAGE]`. Without an image a generated checkerboard is drawn.
fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let texture_path = std::env::args_os().nth(1).map(PathBuf::from);

    let config = RuntimeConfig {
        title: TITLE.to_string(),
        initial_size: PhysicalSize::new(640, 480),
        resizable: false,
    };

    Runtime::run(config, GpuInit::default(), Demo::new(texture_path))
}

struct Demo {
    texture_path: Option<PathBuf>,
    renderer: Option<Renderer<WgpuBackend>>,
    texture: Option<Texture>,
    bouncers: Vec<Bouncer>,
    fps: FpsCounter,
    spin: f32,
}

impl Demo {
    fn new(texture_path: Option<PathBuf>) -> Self {
        Self {
            texture_path,
            renderer: None,
            texture: None,
            bouncers: initial_bouncers(),
            fps: FpsCounter::default(),
            spin: 0.0,
        }
    }
}

impl App for Demo {
    fn on_start(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        let mut renderer = Renderer::new(gpu.create_backend(), RendererConfig::default())
            .context("failed to build the batch renderer")?;

        let texture = match &self.texture_path {
            Some(path) => renderer
                .load_texture(path)
                .with_context(|| format!("failed to load texture {}", path.display()))?,
            None => renderer.create_texture(&checkerboard(64, 8)?)?,
        };
        log::info!("texture ready: {}x{}", texture.width(), texture.height());

        self.texture = Some(texture);
        self.renderer = Some(renderer);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.key_pressed(Key::Escape) {
            return AppControl::Exit;
        }

        let (Some(renderer), Some(texture)) = (self.renderer.as_mut(), self.texture) else {
            return AppControl::Exit;
        };

        let dt = ctx.time.dt;
        let viewport = ctx.gpu.viewport();
        let cursor = ctx.input.cursor();

        for bouncer in &mut self.bouncers {
            bouncer.step(dt, viewport, cursor);
        }
        self.spin += dt;

        if let Some(fps) = self.fps.tick(dt) {
            ctx.window.set_title(&format!("{TITLE} - {fps:.0} fps"));
        }

        let scene = Scene {
            viewport,
            bouncers: &self.bouncers,
            texture,
            cursor,
            spin: self.spin,
        };

        match ctx.render(renderer, |r| scene.draw(r)) {
            Ok(Some(stats)) => {
                log::trace!(
                    "frame {}: {} draw calls, {} vertices",
                    ctx.time.frame_index,
                    stats.draw_calls,
                    stats.vertices
                );
                AppControl::Continue
            }
            Ok(None) => AppControl::Continue,
            Err(err) => {
                log::error!("{err:#}");
                AppControl::Exit
            }
        }
    }
}

/// Everything drawn in one frame.
struct Scene<'a> {
    viewport: Viewport,
    bouncers: &'a [Bouncer],
    texture: Texture,
    cursor: Option<Vec2>,
    spin: f32,
}

impl Scene<'_> {
    fn draw<B: RenderBackend>(&self, r: &mut Renderer<B>) -> Result<(), RenderError> {
        let Viewport { width, height } = self.viewport;

        r.clear(BACKGROUND)?;

        // ── grid ──────────────────────────────────────────────────────────
        let mut x = GRID_STEP;
        while x < width {
            r.draw_line(x, 0.0, x, height, GRID)?;
            x += GRID_STEP;
        }
        let mut y = GRID_STEP;
        while y < height {
            r.draw_line(0.0, y, width, y, GRID)?;
            y += GRID_STEP;
        }

        // ── points at grid intersections ──────────────────────────────────
        let mut x = GRID_STEP;
        while x < width {
            let mut y = GRID_STEP;
            while y < height {
                r.draw_point(x, y, Color::YELLOW)?;
                y += GRID_STEP;
            }
            x += GRID_STEP;
        }

        // ── bouncing rectangles ───────────────────────────────────────────
        for b in self.bouncers {
            r.draw_rect(b.rect, b.color)?;
            r.draw_rect_outline(b.rect, Color::WHITE)?;
        }

        // ── textured quad, top-right corner ───────────────────────────────
        let src = Rect::new(0.0, 0.0, self.texture.width() as f32, self.texture.height() as f32);
        let dst = Rect::new(width - 144.0, 16.0, 128.0, 128.0);
        r.draw_texture(&self.texture, src, dst, Color::WHITE)?;
        r.draw_rect_outline(dst, Color::WHITE)?;

        // ── cursor crosshair ──────────────────────────────────────────────
        if let Some(c) = self.cursor {
            r.draw_line(c.x - 8.0, c.y, c.x + 8.0, c.y, Color::GREEN)?;
            r.draw_line(c.x, c.y - 8.0, c.x, c.y + 8.0, Color::GREEN)?;
        }

        // ── spinning outline under its own model-view ─────────────────────
        let model_view = Mat4::from_translation(Vec3::new(width * 0.5, height * 0.5, 0.0))
            * Mat4::from_rotation_z(self.spin);
        r.set_model_view(model_view)?;
        r.draw_rect_outline(Rect::new(-48.0, -48.0, 96.0, 96.0), Color::rgb(255, 0, 128))?;
        r.set_model_view(Mat4::IDENTITY)?;

        Ok(())
    }
}

/// Two-tone checkerboard, `size` pixels square with `cell`-pixel cells.
fn checkerboard(size: u32, cell: u32) -> Result<ImageData, TextureError> {
    let cell = cell.max(1);
    let mut rgba = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let light = ((x / cell) + (y / cell)) % 2 == 0;
            rgba.extend_from_slice(if light { &CHECKER_LIGHT } else { &CHECKER_DARK });
        }
    }
    ImageData::new(size, size, rgba)
}
