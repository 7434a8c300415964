//! Fixed timestep simulation tick
//!
//! Advances the arena one step from a pair of input directions, then draws it.

use glam::Vec2;

use super::state::SimState;
use crate::consts::*;
use crate::renderer::SpriteRenderer;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Drive direction; zero means stand still. Need not be normalized.
    pub move_intent: Vec2,
    /// Fire direction; zero means hold fire
    pub fire_intent: Vec2,
}

impl TickInput {
    pub fn new(move_intent: Vec2, fire_intent: Vec2) -> Self {
        Self {
            move_intent,
            fire_intent,
        }
    }
}

/// Advance the simulation by one timestep
pub fn tick(state: &mut SimState, input: &TickInput, dt: f32) {
    state.events.clear();
    state.tick_count += 1;

    state.player.update(
        dt,
        input.move_intent,
        input.fire_intent,
        &state.tile_map,
        &mut state.camera,
    );

    if input.fire_intent != Vec2::ZERO && state.weapons.can_fire() {
        let velocity = state.player.aim() * SHOT_SPEED;
        state
            .weapons
            .fire_weapon(state.player.fire_origin(), velocity, &mut state.events);
    }

    state.weapons.update(
        dt,
        &mut state.rng,
        &state.tile_map,
        &state.player,
        &mut state.effects,
        &mut state.events,
    );

    state.effects.update(dt);
}

/// Submit the whole visible scene, back to front
pub fn draw(state: &SimState, renderer: &mut dyn SpriteRenderer) {
    let camera = &state.camera;
    state.tile_map.draw(camera, renderer);
    state.weapons.draw_power_ups(camera, renderer);
    state.player.draw(camera, renderer);
    state.weapons.draw_projectiles(camera, renderer);
    state.effects.draw(camera, renderer);
}
