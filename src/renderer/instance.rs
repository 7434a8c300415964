//! GPU-ready sprite instances

use bytemuck::{Pod, Zeroable};

use super::{DrawRequest, SpriteRenderer};

/// Per-instance data for a textured quad, laid out for a vertex buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub position: [f32; 2],
    pub origin: [f32; 2],
    /// x, y, width, height in texels
    pub source: [f32; 4],
    pub tint: [f32; 4],
    pub rotation: f32,
    pub texture: u32,
}

impl From<&DrawRequest> for SpriteInstance {
    fn from(request: &DrawRequest) -> Self {
        let source = request.source;
        Self {
            position: request.position.to_array(),
            origin: request.origin.to_array(),
            source: [
                source.x as f32,
                source.y as f32,
                source.width as f32,
                source.height as f32,
            ],
            tint: request.tint.to_array(),
            rotation: request.rotation,
            texture: request.texture.0,
        }
    }
}

/// Collects a frame's draw requests as instances for a single upload
#[derive(Debug, Default)]
pub struct InstanceBatch {
    instances: Vec<SpriteInstance>,
}

impl InstanceBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn instances(&self) -> &[SpriteInstance] {
        &self.instances
    }

    /// Raw bytes for `queue.write_buffer`-style uploads
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl SpriteRenderer for InstanceBatch {
    fn draw(&mut self, request: &DrawRequest) {
        self.instances.push(SpriteInstance::from(request));
    }
}

/// Tint colors for game elements
pub mod colors {
    use glam::Vec4;

    pub const WHITE: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);
    pub const EXPLOSION_START: Vec4 = Vec4::new(1.0, 0.3, 0.0, 0.5);
    pub const EXPLOSION_END: Vec4 = Vec4::new(1.0, 0.3, 0.0, 0.0);
    pub const SPARK_START: Vec4 = Vec4::new(1.0, 1.0, 0.0, 1.0); // Yellow
    pub const SPARK_END: Vec4 = Vec4::new(1.0, 0.65, 0.0, 1.0); // Orange
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::TextureId;
    use crate::sim::Rect;
    use glam::Vec2;

    #[test]
    fn test_instance_from_request() {
        let request = DrawRequest {
            texture: TextureId(3),
            position: Vec2::new(10.0, 20.0),
            source: Rect::new(32, 64, 32, 32),
            tint: colors::WHITE,
            rotation: 0.5,
            origin: Vec2::new(16.0, 16.0),
        };
        let instance = SpriteInstance::from(&request);
        assert_eq!(instance.position, [10.0, 20.0]);
        assert_eq!(instance.source, [32.0, 64.0, 32.0, 32.0]);
        assert_eq!(instance.texture, 3);
    }

    #[test]
    fn test_batch_bytes_match_instance_size() {
        let mut batch = InstanceBatch::new();
        let request = DrawRequest {
            texture: TextureId(0),
            position: Vec2::ZERO,
            source: Rect::new(0, 0, 2, 2),
            tint: colors::WHITE,
            rotation: 0.0,
            origin: Vec2::ZERO,
        };
        batch.draw(&request);
        batch.draw(&request);
        assert_eq!(batch.len(), 2);
        assert_eq!(
            batch.as_bytes().len(),
            2 * std::mem::size_of::<SpriteInstance>()
        );
        batch.clear();
        assert!(batch.is_empty());
    }
}
