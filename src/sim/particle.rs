//! Particle lifetime component
//!
//! A particle is a `Sprite` with a `Decay`: it lives for a fixed number of
//! ticks, accelerates, is speed capped and fades between two tints.

use glam::{Vec2, Vec4};

use super::sprite::Sprite;

#[derive(Debug, Clone)]
pub struct Decay {
    /// Added to velocity once per tick
    pub acceleration: Vec2,
    pub max_speed: f32,
    initial_duration: i32,
    remaining_duration: i32,
    initial_color: Vec4,
    final_color: Vec4,
}

impl Decay {
    /// `duration` is in ticks and must be positive
    pub fn new(
        acceleration: Vec2,
        max_speed: f32,
        duration: i32,
        initial_color: Vec4,
        final_color: Vec4,
    ) -> Self {
        Self {
            acceleration,
            max_speed,
            initial_duration: duration,
            remaining_duration: duration,
            initial_color,
            final_color,
        }
    }

    pub fn remaining_duration(&self) -> i32 {
        self.remaining_duration
    }

    pub fn elapsed_duration(&self) -> i32 {
        self.initial_duration - self.remaining_duration
    }

    /// 0 when fresh, 1 when exhausted
    pub fn progress(&self) -> f32 {
        if self.initial_duration <= 0 {
            return 1.0;
        }
        self.elapsed_duration() as f32 / self.initial_duration as f32
    }

    pub fn is_active(&self) -> bool {
        self.remaining_duration > 0
    }

    pub fn color(&self) -> Vec4 {
        self.initial_color.lerp(self.final_color, self.progress())
    }
}

impl Sprite {
    /// Turn this sprite into a particle; the tint starts at the decay's initial color
    pub fn with_decay(mut self, decay: Decay) -> Self {
        self.tint = decay.color();
        self.decay = Some(decay);
        self
    }

    pub fn decay(&self) -> Option<&Decay> {
        self.decay.as_ref()
    }

    pub fn is_particle(&self) -> bool {
        self.decay.is_some()
    }

    /// Particle step, run before the base motion/animation update
    pub(super) fn apply_decay(&mut self) {
        let Some(decay) = self.decay.as_mut() else {
            return;
        };
        if decay.remaining_duration <= 0 {
            self.expired = true;
        }
        if self.expired {
            return;
        }

        self.velocity = (self.velocity + decay.acceleration).clamp_length_max(decay.max_speed);
        decay.remaining_duration -= 1;
        self.tint = decay.color();
    }
}
