//! Tile Arena - A top-down tank arena on a tile grid
//!
//! Core modules:
//! - `sim`: Simulation (movement, grid collisions, weapons, particle effects)
//! - `renderer`: Draw request boundary and GPU-ready sprite instances
//! - `settings`: Data-driven tunables loaded from JSON

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, particle lifetimes are counted in these ticks)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Viewport size in pixels
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Tile grid dimensions
    pub const TILE_WIDTH: i32 = 32;
    pub const TILE_HEIGHT: i32 = 32;
    pub const MAP_WIDTH: i32 = 50;
    pub const MAP_HEIGHT: i32 = 50;

    /// Tile index ranges (inclusive). Anything at or above WALL_TILE_START blocks.
    pub const FLOOR_TILE_START: u16 = 0;
    pub const FLOOR_TILE_END: u16 = 3;
    pub const WALL_TILE_START: u16 = 4;
    pub const WALL_TILE_END: u16 = 7;
    /// Chance (percent) that an interior cell becomes a wall.
    /// Rolled as `random_range(0..100) < WALL_CHANCE_PERCENT`, so exactly 10%
    /// (an inclusive `<=` roll would give 11%).
    pub const WALL_CHANCE_PERCENT: u32 = 10;

    /// Player movement
    pub const PLAYER_SPEED: f32 = 90.0;
    pub const PLAYER_PADDING: i32 = 4;
    pub const PLAYER_COLLISION_RADIUS: f32 = 14.0;
    /// Chassis animation frame count (turret is a single frame)
    pub const PLAYER_CHASSIS_FRAMES: i32 = 6;
    /// Screen-space dead zone; the camera only scrolls once the chassis leaves it
    pub const SCROLL_MARGIN_X: i32 = 150;
    pub const SCROLL_MARGIN_Y: i32 = 100;
    pub const SCROLL_MARGIN_WIDTH: i32 = 500;
    pub const SCROLL_MARGIN_HEIGHT: i32 = 400;

    /// Projectiles
    pub const SHOT_SPEED: f32 = 600.0;
    pub const SHOT_MAX_SPEED: f32 = 400.0;
    pub const SHOT_DURATION_TICKS: i32 = 120;
    pub const SHOT_FIRE_DELAY: f32 = 0.15;
    pub const ROCKET_FIRE_DELAY: f32 = 0.5;
    /// Triple shot spread (degrees either side of the aim)
    pub const TRIPLE_SPLIT_DEGREES: f32 = 15.0;

    /// Power-ups
    pub const WEAPON_TIME_DEFAULT: f32 = 30.0;
    pub const MAX_ACTIVE_POWERUPS: usize = 5;
    pub const TIME_BETWEEN_POWERUPS: f32 = 2.0;
    pub const POWERUP_COLLISION_RADIUS: f32 = 14.0;

    /// Explosion particles
    pub const EXPLOSION_FRAME_COUNT: i32 = 3;
    pub const EXPLOSION_MAX_SPEED: f32 = 30.0;
    /// Offset of the four outer blasts around a rocket impact
    pub const ROCKET_BLAST_SPREAD: f32 = 10.0;
}

/// Normalize a rotation to [0, 2π)
#[inline]
pub fn normalize_rotation(angle: f32) -> f32 {
    let r = angle.rem_euclid(std::f32::consts::TAU);
    // rem_euclid can round tiny negatives up to exactly TAU
    if r >= std::f32::consts::TAU { 0.0 } else { r }
}

/// Heading of a direction vector (radians, atan2 convention)
#[inline]
pub fn heading(direction: Vec2) -> f32 {
    direction.y.atan2(direction.x)
}

/// Unit vector for a heading
#[inline]
pub fn from_heading(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}
