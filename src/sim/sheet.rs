//! Sprite sheet layout
//!
//! Content loading happens outside the simulation. What the simulation needs
//! from it is one texture handle and the source rectangles for each kind of
//! object, handed over once at startup.

use super::rect::Rect;
use crate::consts::*;
use crate::renderer::TextureId;

#[derive(Debug, Clone)]
pub struct SpriteSheet {
    pub texture: TextureId,
    /// Indexed by tile number
    pub tiles: Vec<Rect>,
    /// Chassis animation cycle
    pub player_chassis: Vec<Rect>,
    pub player_turret: Vec<Rect>,
    pub explosion: Vec<Rect>,
    /// Single-pixel-ish spark
    pub particle: Rect,
    /// Frame 0 is the bullet, frame 1 the rocket
    pub shots: [Rect; 2],
    /// Frame 0 grants the triple shot, frame 1 rockets
    pub power_ups: [Rect; 2],
}

/// `count` frames laid out left to right starting at `first`
pub fn frame_strip(first: Rect, count: i32) -> Vec<Rect> {
    (0..count.max(1))
        .map(|i| first.offset(first.width * i, 0))
        .collect()
}

impl SpriteSheet {
    /// The stock atlas: tiles on the first two rows, tank, shots, explosions and sparks below
    pub fn standard(texture: TextureId) -> Self {
        let tiles = (0..2)
            .flat_map(|row| {
                (0..4).map(move |col| Rect::new(col * TILE_WIDTH, row * TILE_HEIGHT, TILE_WIDTH, TILE_HEIGHT))
            })
            .collect();

        Self {
            texture,
            tiles,
            player_chassis: frame_strip(Rect::new(0, 64, 32, 32), PLAYER_CHASSIS_FRAMES),
            player_turret: frame_strip(Rect::new(0, 96, 32, 32), 1),
            explosion: frame_strip(Rect::new(0, 256, 32, 32), EXPLOSION_FRAME_COUNT),
            particle: Rect::new(0, 288, 2, 2),
            shots: [Rect::new(0, 128, 32, 32), Rect::new(32, 128, 32, 32)],
            power_ups: [Rect::new(64, 128, 32, 32), Rect::new(96, 128, 32, 32)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_tile_table_covers_all_indices() {
        let sheet = SpriteSheet::standard(TextureId(1));
        assert_eq!(sheet.tiles.len(), (WALL_TILE_END + 1) as usize);
        assert_eq!(sheet.tiles[4], Rect::new(0, 32, 32, 32));
        assert_eq!(sheet.tiles[3], Rect::new(96, 0, 32, 32));
    }

    #[test]
    fn test_frame_strip_steps_by_width() {
        let strip = frame_strip(Rect::new(0, 64, 32, 32), 3);
        assert_eq!(strip, vec![
            Rect::new(0, 64, 32, 32),
            Rect::new(32, 64, 32, 32),
            Rect::new(64, 64, 32, 32),
        ]);
    }
}
