//! Animated bodies
//!
//! A `Sprite` is anything positioned, animated and collidable: the tank
//! chassis and turret, power-ups, projectiles and effect particles. Particles
//! are sprites carrying a `Decay` component (see `particle.rs`) rather than a
//! separate type.

use glam::{Vec2, Vec4};

use super::camera::Camera;
use super::particle::Decay;
use super::rect::Rect;
use crate::renderer::{DrawRequest, SpriteRenderer, TextureId, colors};
use crate::{heading, normalize_rotation};

/// Default seconds per animation frame
pub const DEFAULT_FRAME_TIME: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct Sprite {
    pub texture: TextureId,
    pub world_location: Vec2,
    pub velocity: Vec2,
    /// Animation cycle; never empty, all frames share frame 0's size
    frames: Vec<Rect>,
    current_frame: usize,
    frame_time: f32,
    time_for_current_frame: f32,
    pub tint: Vec4,
    rotation: f32,
    pub expired: bool,
    pub animate: bool,
    pub animate_when_stopped: bool,
    pub collidable: bool,
    pub collision_radius: f32,
    pub bounding_x_padding: i32,
    pub bounding_y_padding: i32,
    pub(super) decay: Option<Decay>,
}

impl Sprite {
    pub fn new(world_location: Vec2, texture: TextureId, initial_frame: Rect, velocity: Vec2) -> Self {
        Self {
            texture,
            world_location,
            velocity,
            frames: vec![initial_frame],
            current_frame: 0,
            frame_time: DEFAULT_FRAME_TIME,
            time_for_current_frame: 0.0,
            tint: colors::WHITE,
            rotation: 0.0,
            expired: false,
            animate: true,
            animate_when_stopped: true,
            collidable: true,
            collision_radius: 0.0,
            bounding_x_padding: 0,
            bounding_y_padding: 0,
            decay: None,
        }
    }

    // --- Animation ---

    pub fn add_frame(&mut self, frame: Rect) {
        self.frames.push(frame);
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame(&self) -> usize {
        self.current_frame
    }

    /// Select a frame; out-of-range values clamp to the first/last frame
    pub fn set_frame(&mut self, frame: usize) {
        self.current_frame = frame.min(self.frames.len() - 1);
    }

    pub fn frame_time(&self) -> f32 {
        self.frame_time
    }

    pub fn set_frame_time(&mut self, seconds: f32) {
        self.frame_time = seconds.max(0.0);
    }

    /// Source rectangle of the current frame
    pub fn source(&self) -> Rect {
        self.frames[self.current_frame]
    }

    pub fn frame_width(&self) -> i32 {
        self.frames[0].width
    }

    pub fn frame_height(&self) -> i32 {
        self.frames[0].height
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_rotation(&mut self, radians: f32) {
        self.rotation = normalize_rotation(radians);
    }

    /// Face along a direction vector
    pub fn rotate_to(&mut self, direction: Vec2) {
        self.set_rotation(heading(direction));
    }

    // --- Position ---

    pub fn world_rect(&self) -> Rect {
        Rect::new(
            self.world_location.x as i32,
            self.world_location.y as i32,
            self.frame_width(),
            self.frame_height(),
        )
    }

    pub fn screen_rect(&self, camera: &Camera) -> Rect {
        camera.transform_rect(&self.world_rect())
    }

    /// Half the frame size, in whole pixels; also the rotation origin
    pub fn relative_center(&self) -> Vec2 {
        Vec2::new(
            (self.frame_width() / 2) as f32,
            (self.frame_height() / 2) as f32,
        )
    }

    pub fn world_center(&self) -> Vec2 {
        self.world_location + self.relative_center()
    }

    pub fn screen_center(&self, camera: &Camera) -> Vec2 {
        camera.transform(self.world_center())
    }

    // --- Collision ---

    /// World rect shrunk by the bounding padding on every side
    pub fn bounding_box(&self) -> Rect {
        self.world_rect()
            .inset(self.bounding_x_padding, self.bounding_y_padding)
    }

    fn can_collide(&self) -> bool {
        self.collidable && !self.expired
    }

    pub fn box_collides(&self, other: &Rect) -> bool {
        self.can_collide() && self.bounding_box().intersects(other)
    }

    pub fn circle_collides(&self, other_center: Vec2, other_radius: f32) -> bool {
        self.can_collide()
            && self.world_center().distance(other_center) < self.collision_radius + other_radius
    }

    // --- Lifecycle ---

    pub fn update(&mut self, dt: f32) {
        self.apply_decay();
        if self.expired {
            return;
        }

        if self.animate {
            self.time_for_current_frame += dt;
            // Held frames keep their accumulated time
            if self.time_for_current_frame >= self.frame_time
                && (self.animate_when_stopped || self.velocity != Vec2::ZERO)
            {
                self.current_frame = (self.current_frame + 1) % self.frames.len();
                self.time_for_current_frame = 0.0;
            }
        }

        self.world_location += self.velocity * dt;
    }

    pub fn draw(&self, camera: &Camera, renderer: &mut dyn SpriteRenderer) {
        if self.expired || self.decay.as_ref().is_some_and(|d| !d.is_active()) {
            return;
        }
        if !camera.is_visible(&self.world_rect()) {
            return;
        }
        renderer.draw(&DrawRequest {
            texture: self.texture,
            position: self.screen_center(camera),
            source: self.source(),
            tint: self.tint,
            rotation: self.rotation,
            origin: self.relative_center(),
        });
    }
}
