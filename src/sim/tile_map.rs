//! Tile grid: floor and wall cells
//!
//! The map is a fixed grid of tile indices. Indices in the wall range block
//! both movement and projectiles; cells outside the grid report no tile and
//! never block.

use glam::{IVec2, Vec2};
use rand::Rng;

use super::camera::Camera;
use super::rect::Rect;
use super::sheet::SpriteSheet;
use crate::consts::*;
use crate::renderer::{DrawRequest, SpriteRenderer, TextureId, colors};

#[derive(Debug, Clone)]
pub struct TileMap {
    width: i32,
    height: i32,
    /// Row-major tile indices
    squares: Vec<u16>,
    texture: TextureId,
    tiles: Vec<Rect>,
}

impl TileMap {
    /// An all-floor map of `width` x `height` cells
    pub fn new(width: i32, height: i32, sheet: &SpriteSheet) -> Self {
        let cells = (width.max(0) * height.max(0)) as usize;
        Self {
            width,
            height,
            squares: vec![FLOOR_TILE_START; cells],
            texture: sheet.texture,
            tiles: sheet.tiles.clone(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// The whole map in world pixels
    pub fn world_rect(&self) -> Rect {
        Rect::new(0, 0, self.width * TILE_WIDTH, self.height * TILE_HEIGHT)
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    // --- Cell coordinates ---

    pub fn cell_x(pixel_x: i32) -> i32 {
        pixel_x.div_euclid(TILE_WIDTH)
    }

    pub fn cell_y(pixel_y: i32) -> i32 {
        pixel_y.div_euclid(TILE_HEIGHT)
    }

    pub fn cell_at_pixel(pixel: Vec2) -> IVec2 {
        IVec2::new(
            Self::cell_x(pixel.x.floor() as i32),
            Self::cell_y(pixel.y.floor() as i32),
        )
    }

    pub fn cell_center(x: i32, y: i32) -> Vec2 {
        Vec2::new(
            (x * TILE_WIDTH + TILE_WIDTH / 2) as f32,
            (y * TILE_HEIGHT + TILE_HEIGHT / 2) as f32,
        )
    }

    pub fn cell_world_rect(x: i32, y: i32) -> Rect {
        Rect::new(x * TILE_WIDTH, y * TILE_HEIGHT, TILE_WIDTH, TILE_HEIGHT)
    }

    pub fn cell_screen_rect(camera: &Camera, x: i32, y: i32) -> Rect {
        camera.transform_rect(&Self::cell_world_rect(x, y))
    }

    // --- Tiles ---

    /// Tile index at a cell, `None` outside the grid
    pub fn tile_at(&self, x: i32, y: i32) -> Option<u16> {
        self.in_bounds(x, y).then(|| self.squares[self.index(x, y)])
    }

    pub fn tile_at_pixel(&self, pixel_x: i32, pixel_y: i32) -> Option<u16> {
        self.tile_at(Self::cell_x(pixel_x), Self::cell_y(pixel_y))
    }

    /// Out-of-bounds writes are ignored
    pub fn set_tile(&mut self, x: i32, y: i32, tile: u16) {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            self.squares[idx] = tile;
        }
    }

    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.tile_at(x, y).is_some_and(|t| t >= WALL_TILE_START)
    }

    pub fn is_wall_cell(&self, cell: IVec2) -> bool {
        self.is_wall(cell.x, cell.y)
    }

    pub fn is_wall_at_pixel(&self, pixel: Vec2) -> bool {
        self.is_wall_cell(Self::cell_at_pixel(pixel))
    }

    /// True if any cell touched by the pixel region is a wall.
    ///
    /// Walks the covering cell range instead of every pixel; the answer is the
    /// same because a pixel blocks exactly when its cell does.
    pub fn any_wall_in(&self, region: &Rect) -> bool {
        if region.width <= 0 || region.height <= 0 {
            return false;
        }
        let (x0, x1) = (Self::cell_x(region.left()), Self::cell_x(region.right() - 1));
        let (y0, y1) = (Self::cell_y(region.top()), Self::cell_y(region.bottom() - 1));
        (x0..=x1).any(|x| (y0..=y1).any(|y| self.is_wall(x, y)))
    }

    // --- Generation ---

    /// Fill the map: solid outer ring, open second ring, random walls inside.
    ///
    /// One floor and one wall tile are picked for the whole map. No
    /// connectivity guarantee; isolated wall clusters are fine.
    pub fn generate_random_map(&mut self, rng: &mut impl Rng) {
        let floor_tile = rng.random_range(FLOOR_TILE_START..=FLOOR_TILE_END);
        let wall_tile = rng.random_range(WALL_TILE_START..=WALL_TILE_END);
        let (w, h) = (self.width, self.height);

        for x in 0..w {
            for y in 0..h {
                let tile = if x == 0 || y == 0 || x == w - 1 || y == h - 1 {
                    wall_tile
                } else if x == 1 || y == 1 || x == w - 2 || y == h - 2 {
                    // Second ring stays open so the player always has a lane around the edge
                    floor_tile
                } else if rng.random_range(0..100) < WALL_CHANCE_PERCENT {
                    wall_tile
                } else {
                    floor_tile
                };
                self.set_tile(x, y, tile);
            }
        }

        let walls = self.squares.iter().filter(|&&t| t >= WALL_TILE_START).count();
        log::debug!(
            "Generated {}x{} map: floor tile {}, wall tile {}, {} wall cells",
            w,
            h,
            floor_tile,
            wall_tile,
            walls
        );
    }

    // --- Drawing ---

    /// Draw every in-bounds cell under the viewport
    pub fn draw(&self, camera: &Camera, renderer: &mut dyn SpriteRenderer) {
        let pos = camera.position();
        let size = camera.viewport_size();
        let start_x = Self::cell_x(pos.x as i32);
        let end_x = Self::cell_x((pos.x + size.x) as i32);
        let start_y = Self::cell_y(pos.y as i32);
        let end_y = Self::cell_y((pos.y + size.y) as i32);

        for x in start_x..=end_x {
            for y in start_y..=end_y {
                let Some(source) = self
                    .tile_at(x, y)
                    .and_then(|t| self.tiles.get(t as usize))
                else {
                    continue;
                };
                renderer.draw(&DrawRequest {
                    texture: self.texture,
                    position: Self::cell_screen_rect(camera, x, y).location(),
                    source: *source,
                    tint: colors::WHITE,
                    rotation: 0.0,
                    origin: Vec2::ZERO,
                });
            }
        }
    }
}
