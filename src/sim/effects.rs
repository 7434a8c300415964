//! Decorative particle effects: explosions and sparks
//!
//! Effects never feed back into gameplay. Each burst is a handful of
//! multi-frame debris "pieces" plus a spray of single-frame "points", all
//! fading from one tint to another over a fixed number of ticks.

use glam::{Vec2, Vec4};
use rand::Rng;

use super::camera::Camera;
use super::particle::Decay;
use super::rect::Rect;
use super::sheet::SpriteSheet;
use super::sprite::Sprite;
use crate::consts::EXPLOSION_MAX_SPEED;
use crate::renderer::{SpriteRenderer, TextureId, colors};

/// Shape of one explosion burst. Counts are inclusive ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplosionParams {
    pub min_points: u32,
    pub max_points: u32,
    pub min_pieces: u32,
    pub max_pieces: u32,
    /// Piece speed; points fly at two to three times this
    pub piece_speed_scale: f32,
    /// Lifetime in ticks
    pub duration: i32,
    pub initial_color: Vec4,
    pub final_color: Vec4,
}

impl ExplosionParams {
    pub const DEFAULT: Self = Self {
        min_points: 15,
        max_points: 20,
        min_pieces: 2,
        max_pieces: 4,
        piece_speed_scale: 6.0,
        duration: 90,
        initial_color: colors::EXPLOSION_START,
        final_color: colors::EXPLOSION_END,
    };

    pub const LARGE: Self = Self {
        min_pieces: 4,
        max_pieces: 6,
        piece_speed_scale: 30.0,
        ..Self::DEFAULT
    };

    pub const SPARKS: Self = Self {
        min_points: 10,
        max_points: 19,
        min_pieces: 0,
        max_pieces: 0,
        piece_speed_scale: 5.0,
        duration: 20,
        initial_color: colors::SPARK_START,
        final_color: colors::SPARK_END,
    };
}

/// Inclusive roll that tolerates an empty range
fn roll(rng: &mut impl Rng, min: u32, max: u32) -> u32 {
    if max <= min { min } else { rng.random_range(min..=max) }
}

/// Random unit direction scaled to `scale`
pub fn random_direction(rng: &mut impl Rng, scale: f32) -> Vec2 {
    loop {
        let direction = Vec2::new(
            (rng.random_range(0..100) - 50) as f32,
            (rng.random_range(0..100) - 50) as f32,
        );
        if direction != Vec2::ZERO {
            return direction.normalize() * scale;
        }
    }
}

#[derive(Debug, Clone)]
pub struct EffectsManager {
    texture: TextureId,
    particle_frame: Rect,
    explosion_frames: Vec<Rect>,
    effects: Vec<Sprite>,
    /// Hard cap on live particles; spawns past it are dropped
    max_particles: usize,
}

impl EffectsManager {
    pub fn new(sheet: &SpriteSheet, max_particles: usize) -> Self {
        Self {
            texture: sheet.texture,
            particle_frame: sheet.particle,
            explosion_frames: sheet.explosion.clone(),
            effects: Vec::new(),
            max_particles,
        }
    }

    pub fn effects(&self) -> &[Sprite] {
        &self.effects
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn set_max_particles(&mut self, max_particles: usize) {
        self.max_particles = max_particles;
    }

    fn push(&mut self, particle: Sprite) -> bool {
        if self.effects.len() >= self.max_particles {
            return false;
        }
        self.effects.push(particle);
        true
    }

    /// Spawn one burst at `location`; returns how many particles were added
    pub fn add_explosion(
        &mut self,
        rng: &mut impl Rng,
        location: Vec2,
        momentum: Vec2,
        params: &ExplosionParams,
    ) -> usize {
        let mut spawned = 0;
        let decay = Decay::new(
            Vec2::ZERO,
            EXPLOSION_MAX_SPEED,
            params.duration,
            params.initial_color,
            params.final_color,
        );

        if let Some(&first) = self.explosion_frames.first() {
            // Pieces are positioned by their top-left corner, so center them on the blast
            let piece_location = location - Vec2::new((first.width / 2) as f32, (first.height / 2) as f32);
            for _ in 0..roll(rng, params.min_pieces, params.max_pieces) {
                let mut piece = Sprite::new(
                    piece_location,
                    self.texture,
                    first,
                    random_direction(rng, params.piece_speed_scale) + momentum,
                );
                for &frame in &self.explosion_frames[1..] {
                    piece.add_frame(frame);
                }
                piece.set_frame(rng.random_range(0..self.explosion_frames.len()));
                spawned += usize::from(self.push(piece.with_decay(decay.clone())));
            }
        }

        let point_speed_min = params.piece_speed_scale as u32 * 2;
        let point_speed_max = params.piece_speed_scale as u32 * 3;
        for _ in 0..roll(rng, params.min_points, params.max_points) {
            let speed = if point_speed_max > point_speed_min {
                rng.random_range(point_speed_min..point_speed_max)
            } else {
                point_speed_min
            };
            let point = Sprite::new(
                location,
                self.texture,
                self.particle_frame,
                random_direction(rng, speed as f32) + momentum,
            );
            spawned += usize::from(self.push(point.with_decay(decay.clone())));
        }

        if spawned == 0 {
            log::trace!("Explosion at {:?} dropped (particle cap {})", location, self.max_particles);
        }
        spawned
    }

    pub fn add_default_explosion(&mut self, rng: &mut impl Rng, location: Vec2, momentum: Vec2) -> usize {
        self.add_explosion(rng, location, momentum, &ExplosionParams::DEFAULT)
    }

    pub fn add_large_explosion(&mut self, rng: &mut impl Rng, location: Vec2) -> usize {
        self.add_explosion(rng, location, Vec2::ZERO, &ExplosionParams::LARGE)
    }

    /// Small spray where a bullet hit. Spawned one tick's travel back from the
    /// impact so the sparks start in front of the wall.
    pub fn add_sparks_effect(&mut self, rng: &mut impl Rng, location: Vec2, impact_velocity: Vec2) -> usize {
        self.add_explosion(
            rng,
            location - impact_velocity / 60.0,
            impact_velocity,
            &ExplosionParams::SPARKS,
        )
    }

    /// Age every particle, then drop the expired ones
    pub fn update(&mut self, dt: f32) {
        for particle in &mut self.effects {
            particle.update(dt);
        }
        self.effects.retain(|p| !p.expired);
    }

    pub fn draw(&self, camera: &Camera, renderer: &mut dyn SpriteRenderer) {
        for particle in &self.effects {
            particle.draw(camera, renderer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn manager() -> EffectsManager {
        EffectsManager::new(&SpriteSheet::standard(TextureId(0)), 2000)
    }

    #[test]
    fn test_random_direction_has_requested_length() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..50 {
            let d = random_direction(&mut rng, 12.0);
            assert!((d.length() - 12.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_default_explosion_counts_in_range() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..20 {
            let mut fx = manager();
            let n = fx.add_default_explosion(&mut rng, Vec2::new(200.0, 200.0), Vec2::ZERO);
            assert_eq!(n, fx.len());
            assert!((17..=24).contains(&n), "spawned {}", n);
            let pieces = fx.effects().iter().filter(|p| p.frame_count() > 1).count();
            assert!((2..=4).contains(&pieces));
        }
    }

    #[test]
    fn test_pieces_are_centered_on_blast() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut fx = manager();
        fx.add_large_explosion(&mut rng, Vec2::new(200.0, 200.0));
        for piece in fx.effects().iter().filter(|p| p.frame_count() > 1) {
            assert_eq!(piece.world_location, Vec2::new(184.0, 184.0));
            assert_eq!(piece.world_center(), Vec2::new(200.0, 200.0));
        }
    }

    #[test]
    fn test_particles_share_cap_and_duration() {
        let mut rng = Pcg32::seed_from_u64(8);
        let mut fx = manager();
        fx.add_explosion(&mut rng, Vec2::ZERO, Vec2::new(500.0, 0.0), &ExplosionParams::LARGE);
        for p in fx.effects() {
            let decay = p.decay().expect("effects are particles");
            assert_eq!(decay.remaining_duration(), 90);
            assert_eq!(decay.max_speed, EXPLOSION_MAX_SPEED);
        }
        fx.update(1.0 / 60.0);
        for p in fx.effects() {
            assert!(p.velocity.length() <= EXPLOSION_MAX_SPEED + 1e-3);
        }
    }

    #[test]
    fn test_sparks_are_points_only() {
        let mut rng = Pcg32::seed_from_u64(21);
        let mut fx = manager();
        let n = fx.add_sparks_effect(&mut rng, Vec2::new(100.0, 100.0), Vec2::new(400.0, 0.0));
        assert!((10..=19).contains(&n));
        assert!(fx.effects().iter().all(|p| p.frame_count() == 1));
        assert!(fx.effects().iter().all(|p| p.world_location == Vec2::new(100.0 - 400.0 / 60.0, 100.0)));
    }

    #[test]
    fn test_update_culls_expired() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut fx = manager();
        fx.add_sparks_effect(&mut rng, Vec2::new(100.0, 100.0), Vec2::ZERO);
        fx.add_default_explosion(&mut rng, Vec2::new(300.0, 300.0), Vec2::ZERO);
        let sparks = fx.effects().iter().filter(|p| p.decay().is_some_and(|d| d.remaining_duration() == 20)).count();
        let total = fx.len();

        // Sparks live 20 ticks and expire on the 21st update
        for _ in 0..21 {
            fx.update(1.0 / 60.0);
        }
        assert_eq!(fx.len(), total - sparks);

        for _ in 0..70 {
            fx.update(1.0 / 60.0);
        }
        assert!(fx.is_empty());
    }

    #[test]
    fn test_particle_cap() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut fx = EffectsManager::new(&SpriteSheet::standard(TextureId(0)), 10);
        fx.add_large_explosion(&mut rng, Vec2::ZERO);
        assert_eq!(fx.len(), 10);
        assert_eq!(fx.add_large_explosion(&mut rng, Vec2::ZERO), 0);

        fx.set_max_particles(0);
        fx.clear();
        assert_eq!(fx.add_default_explosion(&mut rng, Vec2::ZERO, Vec2::ZERO), 0);
    }
}
