//! Weapons, projectiles and power-ups
//!
//! The tank always has a weapon. Power-ups scattered on the floor swap the
//! plain cannon for a triple shot or rockets for a limited time; when the
//! timer runs out the cannon comes back.

use glam::{IVec2, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::effects::EffectsManager;
use super::particle::Decay;
use super::player::Player;
use super::rect::Rect;
use super::sheet::SpriteSheet;
use super::sprite::Sprite;
use super::state::SimEvent;
use super::tile_map::TileMap;
use crate::consts::*;
use crate::renderer::{SpriteRenderer, TextureId, colors};
use crate::{from_heading, heading};

/// Weapon currently mounted on the turret
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Single shot, never expires
    #[default]
    Normal,
    /// Three-way spread
    Triple,
    /// Slow-firing rocket with a large blast
    Rocket,
}

impl WeaponKind {
    /// Minimum seconds between shots
    pub fn fire_delay(self) -> f32 {
        match self {
            WeaponKind::Normal | WeaponKind::Triple => SHOT_FIRE_DELAY,
            WeaponKind::Rocket => ROCKET_FIRE_DELAY,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeaponKind::Normal => "Normal",
            WeaponKind::Triple => "Triple",
            WeaponKind::Rocket => "Rocket",
        }
    }
}

/// What a projectile does when it hits a wall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileKind {
    /// Sparks on impact
    Bullet,
    /// Five overlapping large explosions on impact
    Rocket,
}

impl ProjectileKind {
    /// Index into the shot frames
    pub fn frame(self) -> usize {
        match self {
            ProjectileKind::Bullet => 0,
            ProjectileKind::Rocket => 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub body: Sprite,
    pub kind: ProjectileKind,
}

#[derive(Debug, Clone)]
pub struct PowerUp {
    pub body: Sprite,
    pub grants: WeaponKind,
}

/// Where the five rocket blasts land relative to the impact point
const ROCKET_BLAST_OFFSETS: [Vec2; 5] = [
    Vec2::new(-ROCKET_BLAST_SPREAD, -ROCKET_BLAST_SPREAD),
    Vec2::new(ROCKET_BLAST_SPREAD, -ROCKET_BLAST_SPREAD),
    Vec2::new(ROCKET_BLAST_SPREAD, ROCKET_BLAST_SPREAD),
    Vec2::new(-ROCKET_BLAST_SPREAD, ROCKET_BLAST_SPREAD),
    Vec2::ZERO,
];

#[derive(Debug, Clone)]
pub struct WeaponManager {
    texture: TextureId,
    shot_frames: [Rect; 2],
    power_up_frames: [Rect; 2],
    current: WeaponKind,
    /// Seconds left on the current upgrade (0 for Normal)
    time_remaining: f32,
    shot_timer: f32,
    time_since_last_power_up: f32,
    projectiles: Vec<Projectile>,
    power_ups: Vec<PowerUp>,
}

impl WeaponManager {
    pub fn new(sheet: &SpriteSheet) -> Self {
        Self {
            texture: sheet.texture,
            shot_frames: sheet.shots,
            power_up_frames: sheet.power_ups,
            current: WeaponKind::Normal,
            time_remaining: 0.0,
            // Loaded: the first shot can go out immediately
            shot_timer: ROCKET_FIRE_DELAY,
            time_since_last_power_up: 0.0,
            projectiles: Vec::new(),
            power_ups: Vec::new(),
        }
    }

    pub fn current_weapon(&self) -> WeaponKind {
        self.current
    }

    pub fn weapon_time_remaining(&self) -> f32 {
        self.time_remaining
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn power_ups(&self) -> &[PowerUp] {
        &self.power_ups
    }

    pub fn fire_delay(&self) -> f32 {
        self.current.fire_delay()
    }

    pub fn can_fire(&self) -> bool {
        self.shot_timer >= self.fire_delay()
    }

    /// Mount an upgrade with a fresh timer
    pub fn grant(&mut self, kind: WeaponKind) {
        self.current = kind;
        self.time_remaining = if kind == WeaponKind::Normal {
            0.0
        } else {
            WEAPON_TIME_DEFAULT
        };
    }

    /// Remove every projectile and power-up and go back to the cannon
    pub fn clear(&mut self) {
        self.projectiles.clear();
        self.power_ups.clear();
        self.grant(WeaponKind::Normal);
        self.time_since_last_power_up = 0.0;
    }

    fn add_shot(&mut self, location: Vec2, velocity: Vec2, kind: ProjectileKind) {
        let mut body = Sprite::new(location, self.texture, self.shot_frames[0], velocity).with_decay(Decay::new(
            Vec2::ZERO,
            SHOT_MAX_SPEED,
            SHOT_DURATION_TICKS,
            colors::WHITE,
            colors::WHITE,
        ));
        body.add_frame(self.shot_frames[1]);
        body.animate = false;
        body.set_frame(kind.frame());
        body.rotate_to(velocity);
        self.projectiles.push(Projectile { body, kind });
    }

    /// Fire the mounted weapon if the cooldown allows. Returns the number of projectiles spawned.
    pub fn fire_weapon(&mut self, location: Vec2, velocity: Vec2, events: &mut Vec<SimEvent>) -> usize {
        if !self.can_fire() {
            return 0;
        }

        let count = match self.current {
            WeaponKind::Normal => {
                self.add_shot(location, velocity, ProjectileKind::Bullet);
                1
            }
            WeaponKind::Triple => {
                let split = TRIPLE_SPLIT_DEGREES.to_radians();
                let (theta, speed) = (heading(velocity), velocity.length());
                self.add_shot(location, velocity, ProjectileKind::Bullet);
                self.add_shot(location, from_heading(theta - split) * speed, ProjectileKind::Bullet);
                self.add_shot(location, from_heading(theta + split) * speed, ProjectileKind::Bullet);
                3
            }
            WeaponKind::Rocket => {
                self.add_shot(location, velocity, ProjectileKind::Rocket);
                1
            }
        };

        self.shot_timer = 0.0;
        events.push(SimEvent::ShotFired {
            kind: self.current,
            count,
        });
        count
    }

    /// One tick: upgrade timer, projectiles, power-up spawning, then pickups
    pub fn update(
        &mut self,
        dt: f32,
        rng: &mut impl Rng,
        tile_map: &TileMap,
        player: &Player,
        effects: &mut EffectsManager,
        events: &mut Vec<SimEvent>,
    ) {
        self.shot_timer += dt;
        self.check_weapon_upgrade_expire(dt, events);

        for projectile in &mut self.projectiles {
            projectile.body.update(dt);
            check_shot_wall_impact(projectile, rng, tile_map, effects, events);
        }
        self.projectiles.retain(|p| !p.body.expired);

        self.check_power_up_spawns(dt, rng, tile_map, events);
        self.check_power_up_pickups(player, events);
    }

    fn check_weapon_upgrade_expire(&mut self, dt: f32, events: &mut Vec<SimEvent>) {
        if self.current == WeaponKind::Normal {
            return;
        }
        self.time_remaining = (self.time_remaining - dt).max(0.0);
        if self.time_remaining == 0.0 {
            log::debug!("{} upgrade expired", self.current.as_str());
            self.current = WeaponKind::Normal;
            events.push(SimEvent::WeaponExpired);
        }
    }

    fn check_power_up_spawns(&mut self, dt: f32, rng: &mut impl Rng, tile_map: &TileMap, events: &mut Vec<SimEvent>) {
        self.time_since_last_power_up += dt;
        if self.time_since_last_power_up < TIME_BETWEEN_POWERUPS {
            return;
        }
        self.time_since_last_power_up = 0.0;

        let kind = if rng.random_bool(0.5) {
            WeaponKind::Rocket
        } else {
            WeaponKind::Triple
        };
        let x = rng.random_range(0..tile_map.width());
        let y = rng.random_range(0..tile_map.height());
        self.try_spawn_power_up(x, y, kind, tile_map, events);
    }

    /// Place a power-up on a floor cell. Fails (returns false) when the cap is
    /// reached, the cell is taken, the cell is a wall, or `kind` is Normal.
    pub fn try_spawn_power_up(
        &mut self,
        x: i32,
        y: i32,
        kind: WeaponKind,
        tile_map: &TileMap,
        events: &mut Vec<SimEvent>,
    ) -> bool {
        let frame = match kind {
            WeaponKind::Triple => 0,
            WeaponKind::Rocket => 1,
            WeaponKind::Normal => return false,
        };
        if self.power_ups.len() >= MAX_ACTIVE_POWERUPS {
            log::trace!("Power-up spawn skipped: {} active", self.power_ups.len());
            return false;
        }
        let destination = TileMap::cell_world_rect(x, y);
        if self.power_ups.iter().any(|p| p.body.world_rect() == destination) {
            log::trace!("Power-up spawn skipped: cell ({}, {}) occupied", x, y);
            return false;
        }
        if tile_map.is_wall(x, y) {
            log::trace!("Power-up spawn skipped: cell ({}, {}) is a wall", x, y);
            return false;
        }

        let mut body = Sprite::new(destination.location(), self.texture, self.power_up_frames[0], Vec2::ZERO);
        body.add_frame(self.power_up_frames[1]);
        body.animate = false;
        body.collision_radius = POWERUP_COLLISION_RADIUS;
        body.set_frame(frame);
        self.power_ups.push(PowerUp { body, grants: kind });

        log::debug!("Spawned {} power-up at cell ({}, {})", kind.as_str(), x, y);
        events.push(SimEvent::PowerUpSpawned {
            cell: IVec2::new(x, y),
            kind,
        });
        true
    }

    fn check_power_up_pickups(&mut self, player: &Player, events: &mut Vec<SimEvent>) {
        let chassis = &player.chassis;
        let mut collected = Vec::new();
        self.power_ups.retain(|p| {
            let hit = chassis.circle_collides(p.body.world_center(), p.body.collision_radius);
            if hit {
                collected.push(p.grants);
            }
            !hit
        });

        for kind in collected {
            log::debug!("Picked up {} power-up", kind.as_str());
            self.grant(kind);
            events.push(SimEvent::PowerUpCollected { kind });
        }
    }

    /// Power-ups sit under the tank, projectiles fly over it, so the two draw separately
    pub fn draw_power_ups(&self, camera: &Camera, renderer: &mut dyn SpriteRenderer) {
        for power_up in &self.power_ups {
            power_up.body.draw(camera, renderer);
        }
    }

    pub fn draw_projectiles(&self, camera: &Camera, renderer: &mut dyn SpriteRenderer) {
        for projectile in &self.projectiles {
            projectile.body.draw(camera, renderer);
        }
    }
}

/// Expire a projectile whose center entered a wall and trigger its impact effect
fn check_shot_wall_impact(
    projectile: &mut Projectile,
    rng: &mut impl Rng,
    tile_map: &TileMap,
    effects: &mut EffectsManager,
    events: &mut Vec<SimEvent>,
) {
    let body = &mut projectile.body;
    if body.expired {
        return;
    }
    let center = body.world_center();
    if !tile_map.is_wall_at_pixel(center) {
        return;
    }

    body.expired = true;
    events.push(SimEvent::WallImpact {
        position: center,
        kind: projectile.kind,
    });
    match projectile.kind {
        ProjectileKind::Bullet => {
            effects.add_sparks_effect(rng, center, body.velocity);
            events.push(SimEvent::Explosion {
                position: center,
                large: false,
            });
        }
        ProjectileKind::Rocket => {
            // Deliberately overlapping blasts
            for offset in ROCKET_BLAST_OFFSETS {
                let position = center + offset;
                effects.add_large_explosion(rng, position);
                events.push(SimEvent::Explosion { position, large: true });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    struct Fixture {
        weapons: WeaponManager,
        map: TileMap,
        player: Player,
        effects: EffectsManager,
        rng: Pcg32,
        events: Vec<SimEvent>,
    }

    impl Fixture {
        fn new() -> Self {
            let sheet = SpriteSheet::standard(TextureId(0));
            Self {
                weapons: WeaponManager::new(&sheet),
                map: TileMap::new(MAP_WIDTH, MAP_HEIGHT, &sheet),
                // Parked off the map so random spawns are never picked up by accident
                player: Player::new(&sheet, Vec2::new(-1000.0, -1000.0)),
                effects: EffectsManager::new(&sheet, 4000),
                rng: Pcg32::seed_from_u64(42),
                events: Vec::new(),
            }
        }

        fn update(&mut self, dt: f32) {
            self.weapons.update(
                dt,
                &mut self.rng,
                &self.map,
                &self.player,
                &mut self.effects,
                &mut self.events,
            );
        }
    }

    #[test]
    fn test_fire_delay_per_weapon() {
        assert_eq!(WeaponKind::Normal.fire_delay(), SHOT_FIRE_DELAY);
        assert_eq!(WeaponKind::Triple.fire_delay(), SHOT_FIRE_DELAY);
        assert!(WeaponKind::Rocket.fire_delay() > WeaponKind::Normal.fire_delay());
    }

    #[test]
    fn test_normal_fire_and_cooldown() {
        let mut f = Fixture::new();
        assert!(f.weapons.can_fire());
        assert_eq!(f.weapons.fire_weapon(Vec2::ZERO, Vec2::new(300.0, 0.0), &mut f.events), 1);
        assert!(!f.weapons.can_fire());
        // Still cooling down
        assert_eq!(f.weapons.fire_weapon(Vec2::ZERO, Vec2::new(300.0, 0.0), &mut f.events), 0);
        f.update(SHOT_FIRE_DELAY);
        assert!(f.weapons.can_fire());
        assert_eq!(f.weapons.projectiles()[0].kind, ProjectileKind::Bullet);
    }

    #[test]
    fn test_triple_fire_spread() {
        let mut f = Fixture::new();
        f.weapons.grant(WeaponKind::Triple);
        let velocity = Vec2::new(1.0, 0.0);
        assert_eq!(f.weapons.fire_weapon(Vec2::ZERO, velocity, &mut f.events), 3);

        let split = TRIPLE_SPLIT_DEGREES.to_radians();
        let mut headings: Vec<f32> = f
            .weapons
            .projectiles()
            .iter()
            .map(|p| heading(p.body.velocity))
            .collect();
        headings.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        assert!((headings[0] + split).abs() < 1e-5);
        assert!(headings[1].abs() < 1e-5);
        assert!((headings[2] - split).abs() < 1e-5);
        for p in f.weapons.projectiles() {
            assert!((p.body.velocity.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_rocket_fire_uses_rocket_frame_and_longer_delay() {
        let mut f = Fixture::new();
        f.weapons.grant(WeaponKind::Rocket);
        assert_eq!(f.weapons.fire_weapon(Vec2::ZERO, Vec2::new(0.0, 200.0), &mut f.events), 1);
        let rocket = &f.weapons.projectiles()[0];
        assert_eq!(rocket.kind, ProjectileKind::Rocket);
        assert_eq!(rocket.body.frame(), 1);
        f.update(SHOT_FIRE_DELAY);
        assert!(!f.weapons.can_fire());
        f.update(ROCKET_FIRE_DELAY);
        assert!(f.weapons.can_fire());
    }

    #[test]
    fn test_upgrade_expires_back_to_normal() {
        let mut f = Fixture::new();
        f.weapons.grant(WeaponKind::Rocket);
        assert_eq!(f.weapons.weapon_time_remaining(), WEAPON_TIME_DEFAULT);
        // 0.5 is exact in binary, so 60 ticks land on zero
        for _ in 0..59 {
            f.update(0.5);
        }
        assert_eq!(f.weapons.current_weapon(), WeaponKind::Rocket);
        f.update(0.5);
        assert_eq!(f.weapons.current_weapon(), WeaponKind::Normal);
        assert_eq!(f.weapons.weapon_time_remaining(), 0.0);
        assert!(f.events.contains(&SimEvent::WeaponExpired));
    }

    #[test]
    fn test_remaining_time_clamps_at_zero() {
        let mut f = Fixture::new();
        f.weapons.grant(WeaponKind::Triple);
        f.update(WEAPON_TIME_DEFAULT + 5.0);
        assert_eq!(f.weapons.current_weapon(), WeaponKind::Normal);
        assert_eq!(f.weapons.weapon_time_remaining(), 0.0);
    }

    #[test]
    fn test_spawn_rules() {
        let mut f = Fixture::new();
        f.map.set_tile(4, 4, WALL_TILE_START);
        assert!(!f.weapons.try_spawn_power_up(4, 4, WeaponKind::Rocket, &f.map, &mut f.events));
        assert!(f.weapons.try_spawn_power_up(5, 5, WeaponKind::Rocket, &f.map, &mut f.events));
        // One per cell
        assert!(!f.weapons.try_spawn_power_up(5, 5, WeaponKind::Triple, &f.map, &mut f.events));
        assert!(!f.weapons.try_spawn_power_up(6, 5, WeaponKind::Normal, &f.map, &mut f.events));

        for x in 6..20 {
            f.weapons.try_spawn_power_up(x, 5, WeaponKind::Triple, &f.map, &mut f.events);
        }
        assert_eq!(f.weapons.power_ups().len(), MAX_ACTIVE_POWERUPS);

        let rocket = &f.weapons.power_ups()[0];
        assert_eq!(rocket.body.world_location, Vec2::new(160.0, 160.0));
        assert_eq!(rocket.body.frame(), 1);
        assert_eq!(rocket.grants, WeaponKind::Rocket);
    }

    #[test]
    fn test_timed_spawning() {
        let mut f = Fixture::new();
        f.update(TIME_BETWEEN_POWERUPS - 0.5);
        assert!(f.weapons.power_ups().is_empty());
        f.update(0.5);
        // Open map, no walls: the attempt succeeds
        assert_eq!(f.weapons.power_ups().len(), 1);

        for _ in 0..40 {
            f.update(TIME_BETWEEN_POWERUPS);
        }
        assert!(f.weapons.power_ups().len() <= MAX_ACTIVE_POWERUPS);
        assert!(
            f.weapons
                .power_ups()
                .iter()
                .all(|p| matches!(p.grants, WeaponKind::Triple | WeaponKind::Rocket))
        );
    }

    #[test]
    fn test_pickup_grants_weapon() {
        let mut f = Fixture::new();
        assert!(f.weapons.try_spawn_power_up(10, 10, WeaponKind::Triple, &f.map, &mut f.events));
        f.player.set_world_location(Vec2::new(330.0, 320.0));
        f.update(0.01);
        assert!(f.weapons.power_ups().is_empty());
        assert_eq!(f.weapons.current_weapon(), WeaponKind::Triple);
        assert_eq!(f.weapons.weapon_time_remaining(), WEAPON_TIME_DEFAULT);
        assert!(f.events.contains(&SimEvent::PowerUpCollected {
            kind: WeaponKind::Triple
        }));
    }

    #[test]
    fn test_bullet_hits_wall_and_sparks() {
        let mut f = Fixture::new();
        for y in 0..MAP_HEIGHT {
            f.map.set_tile(12, y, WALL_TILE_START);
        }
        // Bullet center starts at x = 336, wall begins at x = 384
        f.weapons.fire_weapon(Vec2::new(320.0, 300.0), Vec2::new(400.0, 0.0), &mut f.events);
        for _ in 0..20 {
            f.update(1.0 / 60.0);
        }
        assert!(f.weapons.projectiles().is_empty());
        assert!(!f.effects.is_empty());
        assert!(
            f.effects
                .effects()
                .iter()
                .all(|p| p.frame_count() == 1)
        );
        let impact = f.events.iter().find_map(|e| match e {
            SimEvent::WallImpact { position, kind } => Some((*position, *kind)),
            _ => None,
        });
        let (position, kind) = impact.expect("bullet should hit the wall");
        assert_eq!(kind, ProjectileKind::Bullet);
        assert_eq!(TileMap::cell_at_pixel(position).x, 12);
    }

    #[test]
    fn test_projectile_lifetime_ends() {
        let mut f = Fixture::new();
        f.weapons.fire_weapon(Vec2::new(800.0, 800.0), Vec2::new(0.0, 0.0), &mut f.events);
        for _ in 0..SHOT_DURATION_TICKS {
            f.update(1.0 / 60.0);
        }
        assert_eq!(f.weapons.projectiles().len(), 1);
        f.update(1.0 / 60.0);
        assert!(f.weapons.projectiles().is_empty());
    }
}
