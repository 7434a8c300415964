//! Tile Arena - headless demo run
//!
//! Builds an arena, drives the tank through a scripted patrol while firing,
//! and renders every frame into an instance batch. Usage:
//!
//! ```text
//! tile-arena [settings.json] [ticks]
//! ```

#[cfg(not(target_arch = "wasm32"))]
use tile_arena::{
    Settings,
    consts::SIM_DT,
    renderer::{InstanceBatch, TextureId},
    sim::{SimEvent, SimState, SpriteSheet, TickInput, draw, tick},
};

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_TICKS: u64 = 60 * 60;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;

    env_logger::init();
    log::info!("Tile Arena (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = Settings::load(args.next().unwrap_or_else(|| "settings.json".to_string()));
    let ticks = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::warn!("Bad tick count ({}), running {} ticks", e, DEFAULT_TICKS);
            DEFAULT_TICKS
        }
        None => DEFAULT_TICKS,
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let sheet = SpriteSheet::standard(TextureId(0));
    let mut state = SimState::from_settings(&settings, &sheet, seed);
    log::info!("Arena initialized with seed: {}", state.seed);

    let mut batch = InstanceBatch::new();
    let mut shots = 0usize;
    let mut impacts = 0usize;
    let mut pickups = 0usize;
    let mut peak_instances = 0usize;
    let mut peak_bytes = 0usize;

    for i in 0..ticks {
        // Patrol: each leg lasts two seconds, the turret sweeps continuously
        let move_intent = match (i / 120) % 4 {
            0 => Vec2::new(1.0, 0.0),
            1 => Vec2::new(0.0, 1.0),
            2 => Vec2::new(-1.0, 0.0),
            _ => Vec2::new(0.0, -1.0),
        };
        let angle = i as f32 * 0.05;
        let input = TickInput::new(move_intent, Vec2::new(angle.cos(), angle.sin()));
        tick(&mut state, &input, SIM_DT);

        for event in &state.events {
            match event {
                SimEvent::ShotFired { count, .. } => shots += count,
                SimEvent::WallImpact { .. } => impacts += 1,
                SimEvent::PowerUpCollected { kind } => {
                    pickups += 1;
                    log::info!("Tick {}: picked up {}", state.tick_count, kind.as_str());
                }
                SimEvent::WeaponExpired => log::info!("Tick {}: weapon upgrade expired", state.tick_count),
                _ => {}
            }
        }

        batch.clear();
        draw(&state, &mut batch);
        peak_instances = peak_instances.max(batch.len());
        peak_bytes = peak_bytes.max(batch.as_bytes().len());
    }

    log::info!(
        "Ran {} ticks: {} shots, {} wall impacts, {} pickups, weapon {}, {} live particles",
        state.tick_count,
        shots,
        impacts,
        pickups,
        state.weapons.current_weapon().as_str(),
        state.effects.len()
    );
    log::info!(
        "Peak frame: {} sprites ({} bytes of instance data)",
        peak_instances,
        peak_bytes
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless runner on the web
}
