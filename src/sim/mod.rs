//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies beyond the `SpriteRenderer` seam

pub mod camera;
pub mod effects;
pub mod particle;
pub mod player;
pub mod rect;
pub mod sheet;
pub mod sprite;
pub mod state;
pub mod tick;
pub mod tile_map;
pub mod weapons;

pub use camera::Camera;
pub use effects::{EffectsManager, ExplosionParams};
pub use particle::Decay;
pub use player::{Player, SCROLL_MARGIN};
pub use rect::Rect;
pub use sheet::SpriteSheet;
pub use sprite::Sprite;
pub use state::{SimEvent, SimState};
pub use tick::{TickInput, draw, tick};
pub use tile_map::TileMap;
pub use weapons::{PowerUp, Projectile, ProjectileKind, WeaponKind, WeaponManager};
