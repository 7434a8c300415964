//! Rendering boundary
//!
//! The simulation never touches pixels. Everything visible is described as a
//! `DrawRequest` (texture, screen position, source rectangle, tint, rotation,
//! origin) and handed to whatever implements `SpriteRenderer`.

pub mod instance;

pub use instance::{InstanceBatch, SpriteInstance, colors};

use glam::{Vec2, Vec4};

use crate::sim::Rect;

/// Opaque handle to a texture owned by the render backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureId(pub u32);

/// One textured quad to draw this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRequest {
    pub texture: TextureId,
    /// Screen-space position of `origin`
    pub position: Vec2,
    /// Region of the texture to sample
    pub source: Rect,
    pub tint: Vec4,
    /// Radians, clockwise in screen space
    pub rotation: f32,
    /// Pivot inside the source rectangle (pixels from its top-left)
    pub origin: Vec2,
}

/// Render collaborator that accepts draw requests in submission order
pub trait SpriteRenderer {
    fn draw(&mut self, request: &DrawRequest);
}
