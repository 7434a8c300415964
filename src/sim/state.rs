//! Simulation state and per-tick events
//!
//! Everything a running arena needs is owned by one `SimState`. Two states
//! built from the same seed and fed the same inputs stay identical.

use glam::{IVec2, Vec2};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::camera::Camera;
use super::effects::EffectsManager;
use super::player::Player;
use super::sheet::SpriteSheet;
use super::tile_map::TileMap;
use super::weapons::{ProjectileKind, WeaponKind, WeaponManager};
use crate::consts::*;
use crate::settings::Settings;

/// Something observable happened during a tick (for audio, HUD, tests)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    ShotFired { kind: WeaponKind, count: usize },
    /// A projectile's center entered a wall cell
    WallImpact { position: Vec2, kind: ProjectileKind },
    /// One burst of effect particles; `large` for rocket blasts, otherwise sparks
    Explosion { position: Vec2, large: bool },
    PowerUpSpawned { cell: IVec2, kind: WeaponKind },
    PowerUpCollected { kind: WeaponKind },
    /// A timed upgrade ran out and the cannon is back
    WeaponExpired,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Simulation tick counter
    pub tick_count: u64,
    /// The only randomness source (map generation and power-up spawns)
    pub rng: Pcg32,
    pub camera: Camera,
    pub tile_map: TileMap,
    pub player: Player,
    pub weapons: WeaponManager,
    /// Visual particles (not gameplay-affecting)
    pub effects: EffectsManager,
    /// Events from the most recent tick
    pub events: Vec<SimEvent>,
}

impl SimState {
    /// Build a fresh arena: random map, tank in the top-left open cell
    pub fn new(seed: u64, settings: &Settings, sheet: &SpriteSheet) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);

        let mut tile_map = TileMap::new(MAP_WIDTH, MAP_HEIGHT, sheet);
        tile_map.generate_random_map(&mut rng);

        let camera = Camera::new(tile_map.world_rect(), Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT));
        let player = Player::new(sheet, TileMap::cell_world_rect(1, 1).location());

        log::info!(
            "New arena: seed {}, quality {}, particle cap {}",
            seed,
            settings.quality.as_str(),
            settings.max_particles()
        );

        Self {
            seed,
            tick_count: 0,
            rng,
            camera,
            tile_map,
            player,
            weapons: WeaponManager::new(sheet),
            effects: EffectsManager::new(sheet, settings.max_particles()),
            events: Vec::new(),
        }
    }

    /// Seed from settings when present, otherwise `fallback_seed`
    pub fn from_settings(settings: &Settings, sheet: &SpriteSheet, fallback_seed: u64) -> Self {
        Self::new(settings.seed.unwrap_or(fallback_seed), settings, sheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::TextureId;

    fn sheet() -> SpriteSheet {
        SpriteSheet::standard(TextureId(0))
    }

    #[test]
    fn test_new_state_layout() {
        let state = SimState::new(12345, &Settings::default(), &sheet());
        assert_eq!(state.tick_count, 0);
        assert_eq!(state.player.world_location(), Vec2::new(32.0, 32.0));
        assert!(!state.tile_map.is_wall(1, 1));
        assert!(state.tile_map.is_wall(0, 0));
        assert_eq!(state.camera.position(), Vec2::ZERO);
        assert_eq!(state.camera.world(), state.tile_map.world_rect());
        assert_eq!(state.weapons.current_weapon(), WeaponKind::Normal);
        assert!(state.effects.is_empty());
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_same_seed_same_map() {
        let a = SimState::new(7, &Settings::default(), &sheet());
        let b = SimState::new(7, &Settings::default(), &sheet());
        for x in 0..MAP_WIDTH {
            for y in 0..MAP_HEIGHT {
                assert_eq!(a.tile_map.tile_at(x, y), b.tile_map.tile_at(x, y));
            }
        }
    }

    #[test]
    fn test_seed_from_settings() {
        let settings = Settings {
            seed: Some(99),
            ..Settings::default()
        };
        assert_eq!(SimState::from_settings(&settings, &sheet(), 1).seed, 99);
        assert_eq!(SimState::from_settings(&Settings::default(), &sheet(), 1).seed, 1);
    }
}
