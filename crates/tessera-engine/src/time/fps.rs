/// Frames-per-second counter averaged over a fixed sampling window.
///
/// Feed it every frame's `dt`; a new reading is published each time the
/// accumulated time crosses the window.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window: f32,
    elapsed: f32,
    frames: u32,
    fps: Option<f32>,
}

impl FpsCounter {
    /// `window` is the sampling period in seconds.
    pub fn new(window: f32) -> Self {
        Self {
            window: window.max(f32::EPSILON),
            elapsed: 0.0,
            frames: 0,
            fps: None,
        }
    }

    /// Records one frame. Returns the new reading when the window just closed.
    pub fn tick(&mut self, dt: f32) -> Option<f32> {
        self.elapsed += dt.max(0.0);
        self.frames += 1;

        if self.elapsed < self.window {
            return None;
        }

        let fps = self.frames as f32 / self.elapsed;
        self.fps = Some(fps);
        self.elapsed = 0.0;
        self.frames = 0;
        Some(fps)
    }

    /// Last published reading.
    pub fn fps(&self) -> Option<f32> {
        self.fps
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publishes_once_per_window() {
        let mut fps = FpsCounter::new(1.0);
        for _ in 0..3 {
            assert_eq!(fps.tick(0.25), None);
        }
        assert_eq!(fps.tick(0.25), Some(4.0));
        assert_eq!(fps.fps(), Some(4.0));

        // Window restarts after a reading.
        assert_eq!(fps.tick(0.5), None);
    }

    #[test]
    fn no_reading_before_first_window() {
        let mut fps = FpsCounter::default();
        fps.tick(0.1);
        assert_eq!(fps.fps(), None);
    }
}
