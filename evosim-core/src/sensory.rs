use crate::animal::{Animal, HUNGER_MAX, THIRST_MAX};
use crate::world::World;
use evosim_config::TraitConfig;
use evosim_types::TerrainType;

/// 4 own-status fractions plus 4 features for each tile of the 3×3
/// neighborhood, scanned row-major.
pub const SENSORY_WIDTH: usize = 4 + 9 * FEATURES_PER_TILE;

const FEATURES_PER_TILE: usize = 4;

/// Normalization divisor for the terrain-cost feature; the costliest
/// passable terrain (Jungle) maps to 1.0, as do impassable and
/// out-of-bounds cells.
const TERRAIN_COST_CEILING: f32 = 2.0;

/// Assemble the fixed-width input vector for one animal. Own status is
/// normalized to [0, 1]; each neighborhood tile contributes
/// [terrain cost, food present, water present, occupant present].
pub(crate) fn build_input_vector(
    world: &World,
    animal: &Animal,
    traits_config: &TraitConfig,
) -> Vec<f32> {
    let mut input = Vec::with_capacity(SENSORY_WIDTH);

    let max_health = animal.max_health(traits_config).max(1.0);
    let max_energy = animal.max_energy(traits_config).max(1.0);
    input.push(clamp01(animal.status.health / max_health));
    input.push(clamp01(animal.status.hunger / HUNGER_MAX));
    input.push(clamp01(animal.status.thirst / THIRST_MAX));
    input.push(clamp01(animal.status.energy / max_energy));

    let (ax, ay) = animal.location;
    for dy in -1..=1 {
        for dx in -1..=1 {
            let (tx, ty) = (ax + dx, ay + dy);
            let mut terrain_cost = 1.0;
            let mut food = 0.0;
            let mut water = 0.0;
            let mut occupant = 0.0;

            if let Some(tile) = world.tile(tx, ty) {
                terrain_cost = tile
                    .movement_cost()
                    .map_or(1.0, |cost| clamp01(cost / TERRAIN_COST_CEILING));
                if let Some(resource) = &tile.resource {
                    if !resource.is_depleted() {
                        if resource.kind.is_food() {
                            food = 1.0;
                        } else {
                            water = 1.0;
                        }
                    }
                }
                if tile.terrain == TerrainType::Water {
                    water = 1.0;
                }
                if tile.occupant.is_some_and(|id| id != animal.id) {
                    occupant = 1.0;
                }
            }

            input.extend_from_slice(&[terrain_cost, food, water, occupant]);
        }
    }

    debug_assert_eq!(input.len(), SENSORY_WIDTH);
    input
}

fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}
