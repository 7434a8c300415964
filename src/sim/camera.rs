//! Scrolling camera
//!
//! The viewport never leaves the world rectangle: every position change goes
//! through the clamp in `set_position`.

use glam::Vec2;

use super::rect::Rect;

#[derive(Debug, Clone)]
pub struct Camera {
    /// Top-left of the viewport in world space
    position: Vec2,
    viewport_size: Vec2,
    world: Rect,
}

impl Camera {
    /// Create a camera at the world origin. The viewport must fit inside the world.
    pub fn new(world: Rect, viewport_size: Vec2) -> Self {
        let mut camera = Self {
            position: Vec2::ZERO,
            viewport_size,
            world,
        };
        camera.set_position(world.location());
        camera
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn viewport_size(&self) -> Vec2 {
        self.viewport_size
    }

    pub fn world(&self) -> Rect {
        self.world
    }

    /// Move the viewport, clamped so it stays inside the world
    pub fn set_position(&mut self, position: Vec2) {
        let max_x = self.world.right() as f32 - self.viewport_size.x;
        let max_y = self.world.bottom() as f32 - self.viewport_size.y;
        // max/min rather than clamp: an oversized viewport pins to the upper bound instead of panicking
        self.position = Vec2::new(
            position.x.max(self.world.left() as f32).min(max_x),
            position.y.max(self.world.top() as f32).min(max_y),
        );
    }

    pub fn move_by(&mut self, offset: Vec2) {
        self.set_position(self.position + offset);
    }

    pub fn viewport(&self) -> Rect {
        Rect::new(
            self.position.x as i32,
            self.position.y as i32,
            self.viewport_size.x as i32,
            self.viewport_size.y as i32,
        )
    }

    pub fn is_visible(&self, bounds: &Rect) -> bool {
        self.viewport().intersects(bounds)
    }

    /// World point to screen point
    pub fn transform(&self, point: Vec2) -> Vec2 {
        point - self.position
    }

    /// World rectangle to screen rectangle
    pub fn transform_rect(&self, rect: &Rect) -> Rect {
        rect.offset(-(self.position.x as i32), -(self.position.y as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn camera() -> Camera {
        Camera::new(Rect::new(0, 0, 1600, 1600), Vec2::new(800.0, 600.0))
    }

    #[test]
    fn test_clamps_to_world() {
        let mut cam = camera();
        cam.set_position(Vec2::new(-50.0, 5000.0));
        assert_eq!(cam.position(), Vec2::new(0.0, 1000.0));
        cam.move_by(Vec2::new(2000.0, -10.0));
        assert_eq!(cam.position(), Vec2::new(800.0, 990.0));
    }

    #[test]
    fn test_transform_point_and_rect() {
        let mut cam = camera();
        cam.set_position(Vec2::new(100.0, 50.0));
        assert_eq!(cam.transform(Vec2::new(150.0, 80.0)), Vec2::new(50.0, 30.0));
        assert_eq!(
            cam.transform_rect(&Rect::new(150, 80, 32, 32)),
            Rect::new(50, 30, 32, 32)
        );
    }

    #[test]
    fn test_visibility() {
        let mut cam = camera();
        cam.set_position(Vec2::new(400.0, 400.0));
        assert!(cam.is_visible(&Rect::new(390, 390, 32, 32)));
        assert!(!cam.is_visible(&Rect::new(0, 0, 32, 32)));
        assert!(!cam.is_visible(&Rect::new(1200, 400, 32, 32)));
    }

    #[test]
    fn test_offset_world_origin() {
        let mut cam = Camera::new(Rect::new(100, 100, 1000, 1000), Vec2::new(200.0, 200.0));
        assert_eq!(cam.position(), Vec2::new(100.0, 100.0));
        cam.set_position(Vec2::new(5000.0, 5000.0));
        assert_eq!(cam.position(), Vec2::new(900.0, 900.0));
    }

    proptest! {
        #[test]
        fn prop_viewport_stays_in_world(x in -5000.0f32..5000.0, y in -5000.0f32..5000.0) {
            let mut cam = camera();
            cam.set_position(Vec2::new(x, y));
            prop_assert!(cam.world().contains_rect(&cam.viewport()));
        }

        #[test]
        fn prop_clamp_is_idempotent(x in -5000.0f32..5000.0, y in -5000.0f32..5000.0) {
            let mut cam = camera();
            cam.set_position(Vec2::new(x, y));
            let clamped = cam.position();
            let mut again = camera();
            again.set_position(clamped);
            prop_assert_eq!(again.position(), clamped);
        }

        #[test]
        fn prop_moves_stay_in_world(steps in proptest::collection::vec((-300.0f32..300.0, -300.0f32..300.0), 1..20)) {
            let mut cam = camera();
            for (dx, dy) in steps {
                cam.move_by(Vec2::new(dx, dy));
                prop_assert!(cam.world().contains_rect(&cam.viewport()));
            }
        }
    }
}
