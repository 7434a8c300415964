//! The player's tank: a chassis that drives and a turret that aims
//!
//! Movement is resolved against the tile grid one axis at a time so that a
//! diagonal push into a wall slides along it instead of stopping dead.

use glam::Vec2;

use super::camera::Camera;
use super::rect::Rect;
use super::sheet::SpriteSheet;
use super::sprite::Sprite;
use super::tile_map::TileMap;
use crate::consts::*;
use crate::renderer::SpriteRenderer;

/// Screen-space dead zone; outside it the camera follows the chassis
pub const SCROLL_MARGIN: Rect = Rect::new(
    SCROLL_MARGIN_X,
    SCROLL_MARGIN_Y,
    SCROLL_MARGIN_WIDTH,
    SCROLL_MARGIN_HEIGHT,
);

#[derive(Debug, Clone)]
pub struct Player {
    pub chassis: Sprite,
    pub turret: Sprite,
    /// Last nonzero move direction (unit length)
    facing: Vec2,
    /// Last nonzero fire direction (unit length)
    aim: Vec2,
}

impl Player {
    pub fn new(sheet: &SpriteSheet, world_location: Vec2) -> Self {
        let mut chassis = Sprite::new(world_location, sheet.texture, sheet.player_chassis[0], Vec2::ZERO);
        for &frame in &sheet.player_chassis[1..] {
            chassis.add_frame(frame);
        }
        chassis.bounding_x_padding = PLAYER_PADDING;
        chassis.bounding_y_padding = PLAYER_PADDING;
        chassis.animate_when_stopped = false;
        chassis.collision_radius = PLAYER_COLLISION_RADIUS;

        let mut turret = Sprite::new(world_location, sheet.texture, sheet.player_turret[0], Vec2::ZERO);
        for &frame in &sheet.player_turret[1..] {
            turret.add_frame(frame);
        }
        turret.animate_when_stopped = false;

        Self {
            chassis,
            turret,
            facing: Vec2::X,
            aim: Vec2::X,
        }
    }

    pub fn facing(&self) -> Vec2 {
        self.facing
    }

    pub fn aim(&self) -> Vec2 {
        self.aim
    }

    pub fn world_location(&self) -> Vec2 {
        self.chassis.world_location
    }

    /// Place both bodies at a world position (spawns, scripted setups)
    pub fn set_world_location(&mut self, location: Vec2) {
        self.chassis.world_location = location;
        self.turret.world_location = location;
    }

    /// Where projectiles leave from
    pub fn fire_origin(&self) -> Vec2 {
        self.turret.world_location
    }

    /// Advance one tick. Returns the move direction after wall blocking.
    pub fn update(
        &mut self,
        dt: f32,
        move_intent: Vec2,
        fire_intent: Vec2,
        tile_map: &TileMap,
        camera: &mut Camera,
    ) -> Vec2 {
        let mut move_dir = move_intent.normalize_or_zero();
        if move_dir != Vec2::ZERO {
            self.facing = move_dir;
            move_dir = self.check_tile_obstacles(dt, move_dir, tile_map);
        }

        let fire_dir = fire_intent.normalize_or_zero();
        if fire_dir != Vec2::ZERO {
            self.aim = fire_dir;
        }

        self.chassis.velocity = move_dir * PLAYER_SPEED;
        self.chassis.update(dt);
        self.clamp_to_world(camera.world());
        self.turret.world_location = self.chassis.world_location;

        self.chassis.rotate_to(self.facing);
        self.turret.rotate_to(self.aim);

        self.reposition_camera(dt, move_dir, camera);
        move_dir
    }

    /// Zero each axis of `move_dir` whose sweep would enter a wall cell.
    ///
    /// X is resolved first; the Y sweep starts from wherever X ends up so a
    /// diagonal step cannot clip a corner cell.
    fn check_tile_obstacles(&self, dt: f32, move_dir: Vec2, tile_map: &TileMap) -> Vec2 {
        // Same arithmetic as Sprite::update so the sweep and the move agree to the pixel
        let delta = move_dir * PLAYER_SPEED * dt;
        let current = self.chassis.world_rect();
        let location = self.chassis.world_location;
        let mut resolved = move_dir;
        let mut after_x = current;

        if move_dir.x != 0.0 {
            let new_left = (location.x + delta.x) as i32;
            let new_right = new_left + current.width;
            let swept = if move_dir.x < 0.0 {
                Rect::new(new_left, current.top(), current.left() - new_left, current.height)
            } else {
                Rect::new(current.right(), current.top(), new_right - current.right(), current.height)
            };
            if tile_map.any_wall_in(&swept) {
                resolved.x = 0.0;
            } else {
                after_x = Rect::new(new_left, current.top(), current.width, current.height);
            }
        }

        if move_dir.y != 0.0 {
            let new_top = (location.y + delta.y) as i32;
            let new_bottom = new_top + current.height;
            let swept = if move_dir.y < 0.0 {
                Rect::new(after_x.left(), new_top, after_x.width, current.top() - new_top)
            } else {
                Rect::new(after_x.left(), current.bottom(), after_x.width, new_bottom - current.bottom())
            };
            if tile_map.any_wall_in(&swept) {
                resolved.y = 0.0;
            }
        }

        resolved
    }

    fn clamp_to_world(&mut self, world: Rect) {
        let max_x = (world.right() - self.chassis.frame_width()) as f32;
        let max_y = (world.bottom() - self.chassis.frame_height()) as f32;
        let loc = self.chassis.world_location;
        self.chassis.world_location = Vec2::new(
            loc.x.max(world.left() as f32).min(max_x),
            loc.y.max(world.top() as f32).min(max_y),
        );
    }

    /// Pan the camera on each axis where the chassis has left the dead zone
    fn reposition_camera(&self, dt: f32, move_dir: Vec2, camera: &mut Camera) {
        let move_scale = PLAYER_SPEED * dt;
        let screen = self.chassis.screen_rect(camera);

        if (screen.left() < SCROLL_MARGIN.left() && move_dir.x < 0.0)
            || (screen.right() > SCROLL_MARGIN.right() && move_dir.x > 0.0)
        {
            camera.move_by(Vec2::new(move_dir.x * move_scale, 0.0));
        }

        if (screen.top() < SCROLL_MARGIN.top() && move_dir.y < 0.0)
            || (screen.bottom() > SCROLL_MARGIN.bottom() && move_dir.y > 0.0)
        {
            camera.move_by(Vec2::new(0.0, move_dir.y * move_scale));
        }
    }

    pub fn draw(&self, camera: &Camera, renderer: &mut dyn SpriteRenderer) {
        self.chassis.draw(camera, renderer);
        self.turret.draw(camera, renderer);
    }
}
