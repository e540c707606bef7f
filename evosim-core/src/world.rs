use evosim_types::{AnimalId, Direction, Resource, TerrainType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
    pub terrain: TerrainType,
    pub resource: Option<Resource>,
    /// Weak back-reference: the population vec owns the animal, the tile
    /// stores only its id.
    pub occupant: Option<AnimalId>,
}

impl Tile {
    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn is_passable(&self) -> bool {
        self.terrain.is_passable() && !self.is_occupied()
    }

    pub fn movement_cost(&self) -> Option<f32> {
        self.terrain.movement_cost()
    }
}

/// The grid. Dimensions are fixed at creation for the lifetime of a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct World {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl World {
    pub fn new(width: u32, height: u32, terrain: TerrainType) -> Self {
        let width = width as i32;
        let height = height as i32;
        let mut tiles = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                tiles.push(Tile {
                    x,
                    y,
                    terrain,
                    resource: None,
                    occupant: None,
                });
            }
        }
        Self {
            width,
            height,
            tiles,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some((y * self.width + x) as usize)
    }

    pub fn tile(&self, x: i32, y: i32) -> Option<&Tile> {
        self.index(x, y).map(|idx| &self.tiles[idx])
    }

    pub fn tile_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        let idx = self.index(x, y)?;
        Some(&mut self.tiles[idx])
    }

    pub fn occupant_at(&self, x: i32, y: i32) -> Option<AnimalId> {
        self.tile(x, y).and_then(|tile| tile.occupant)
    }

    /// In-bounds 4-neighborhood, always in N/E/S/W order so every scan over
    /// adjacency is deterministic.
    pub fn adjacent(&self, x: i32, y: i32) -> Vec<(i32, i32)> {
        Direction::ALL
            .iter()
            .map(|direction| {
                let (dx, dy) = direction.offset();
                (x + dx, y + dy)
            })
            .filter(|&(nx, ny)| self.in_bounds(nx, ny))
            .collect()
    }

    pub fn has_adjacent_terrain(&self, x: i32, y: i32, terrain: TerrainType) -> bool {
        self.adjacent(x, y)
            .into_iter()
            .any(|(nx, ny)| self.tile(nx, ny).is_some_and(|tile| tile.terrain == terrain))
    }

    /// Coordinates of every tile an animal could be placed on, in row-major
    /// order. Callers shuffle with the simulation RNG.
    pub fn passable_positions(&self) -> Vec<(i32, i32)> {
        self.tiles
            .iter()
            .filter(|tile| tile.is_passable())
            .map(|tile| (tile.x, tile.y))
            .collect()
    }

    pub fn clear_occupants(&mut self) {
        for tile in &mut self.tiles {
            tile.occupant = None;
        }
    }

    pub(crate) fn occupied_cell_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_occupied()).count()
    }
}
