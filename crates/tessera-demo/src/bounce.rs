use tessera_engine::coords::{Rect, Vec2, Viewport};
use tessera_engine::paint::Color;

/// Cursor influence radius in pixels.
const DEFLECT_RADIUS: f32 = 90.0;
/// Acceleration applied away from the cursor at the center of the radius, px/s².
const DEFLECT_ACCEL: f32 = 2400.0;
const MAX_SPEED: f32 = 600.0;

/// A rectangle moving at constant velocity, bouncing off the framebuffer edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Bouncer {
    pub rect: Rect,
    pub velocity: Vec2,
    pub color: Color,
}

impl Bouncer {
    pub fn new(rect: Rect, velocity: Vec2, color: Color) -> Self {
        Self { rect, velocity, color }
    }

    /// Advances by `dt` seconds inside `bounds`, pushed away from `cursor` when
    /// it is within reach.
    pub fn step(&mut self, dt: f32, bounds: Viewport, cursor: Option<Vec2>) {
        if let Some(cursor) = cursor {
            let away = self.rect.center() - cursor;
            let distance = away.length();
            if distance < DEFLECT_RADIUS {
                let falloff = 1.0 - distance / DEFLECT_RADIUS;
                self.velocity = self.velocity + away.normalized_or_zero() * (DEFLECT_ACCEL * falloff * dt);
            }
        }

        let speed = self.velocity.length();
        if speed > MAX_SPEED {
            self.velocity = self.velocity * (MAX_SPEED / speed);
        }

        self.rect = self.rect.translated(self.velocity * dt);
        self.bounce(bounds);
    }

    fn bounce(&mut self, bounds: Viewport) {
        let max_x = (bounds.width - self.rect.size.x).max(0.0);
        let max_y = (bounds.height - self.rect.size.y).max(0.0);
        let origin = &mut self.rect.origin;

        if origin.x < 0.0 {
            origin.x = 0.0;
            self.velocity.x = self.velocity.x.abs();
        } else if origin.x > max_x {
            origin.x = max_x;
            self.velocity.x = -self.velocity.x.abs();
        }

        if origin.y < 0.0 {
            origin.y = 0.0;
            self.velocity.y = self.velocity.y.abs();
        } else if origin.y > max_y {
            origin.y = max_y;
            self.velocity.y = -self.velocity.y.abs();
        }
    }
}

/// The demo's starting set of rectangles.
pub fn initial_bouncers() -> Vec<Bouncer> {
    vec![
        Bouncer::new(Rect::new(40.0, 60.0, 60.0, 40.0), Vec2::new(180.0, 140.0), Color::RED),
        Bouncer::new(Rect::new(300.0, 200.0, 50.0, 50.0), Vec2::new(-150.0, 210.0), Color::GREEN),
        Bouncer::new(Rect::new(500.0, 80.0, 80.0, 30.0), Vec2::new(-220.0, -90.0), Color::BLUE),
        Bouncer::new(Rect::new(120.0, 360.0, 40.0, 70.0), Vec2::new(130.0, -170.0), Color::rgb(255, 0, 128)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Viewport = Viewport::new(640.0, 480.0);

    #[test]
    fn moves_by_velocity() {
        let mut b = Bouncer::new(Rect::new(100.0, 100.0, 10.0, 10.0), Vec2::new(50.0, -20.0), Color::WHITE);
        b.step(0.5, BOUNDS, None);
        assert_eq!(b.rect.origin, Vec2::new(125.0, 90.0));
    }

    #[test]
    fn reflects_off_right_edge() {
        let mut b = Bouncer::new(Rect::new(625.0, 100.0, 10.0, 10.0), Vec2::new(100.0, 0.0), Color::WHITE);
        b.step(0.1, BOUNDS, None);
        assert_eq!(b.rect.origin.x, 630.0);
        assert_eq!(b.velocity.x, -100.0);
    }

    #[test]
    fn reflects_off_top_edge() {
        let mut b = Bouncer::new(Rect::new(100.0, 2.0, 10.0, 10.0), Vec2::new(0.0, -100.0), Color::WHITE);
        b.step(0.1, BOUNDS, None);
        assert_eq!(b.rect.origin.y, 0.0);
        assert_eq!(b.velocity.y, 100.0);
    }

    #[test]
    fn cursor_pushes_away() {
        let mut b = Bouncer::new(Rect::new(100.0, 100.0, 20.0, 20.0), Vec2::new(0.0, 0.0), Color::WHITE);
        // Cursor just left of the center.
        b.step(0.1, BOUNDS, Some(Vec2::new(90.0, 110.0)));
        assert!(b.velocity.x > 0.0);
        assert_eq!(b.velocity.y, 0.0);
    }

    #[test]
    fn distant_cursor_is_ignored() {
        let mut b = Bouncer::new(Rect::new(100.0, 100.0, 20.0, 20.0), Vec2::new(10.0, 0.0), Color::WHITE);
        b.step(0.1, BOUNDS, Some(Vec2::new(500.0, 400.0)));
        assert_eq!(b.velocity, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn speed_is_capped() {
        let mut b = Bouncer::new(Rect::new(300.0, 200.0, 10.0, 10.0), Vec2::new(5000.0, 0.0), Color::WHITE);
        b.step(0.001, BOUNDS, None);
        assert!(b.velocity.length() <= MAX_SPEED + 0.01);
    }
}
