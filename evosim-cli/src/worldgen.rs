use anyhow::{bail, Result};
use evosim_config::SimulationConfig;
use evosim_core::{create_random_animal, Animal, World};
use evosim_types::{AnimalCategory, AnimalId, Resource, ResourceKind, TerrainType};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Share of the grid assigned to each terrain, in assignment order.
const TERRAIN_DISTRIBUTION: [(TerrainType, f64); 4] = [
    (TerrainType::Plains, 0.60),
    (TerrainType::Forest, 0.25),
    (TerrainType::Water, 0.10),
    (TerrainType::Mountains, 0.05),
];

const RESOURCE_USES: u32 = 3;

/// Build the world the core consumes: terrain drawn from the fixed
/// distribution, then food and water resources sprinkled over passable
/// tiles by the configured spawn chances.
pub fn generate_world(config: &SimulationConfig, rng: &mut ChaCha8Rng) -> World {
    let mut world = World::new(config.world_width, config.world_height, TerrainType::Plains);

    let total = (config.world_width * config.world_height) as usize;
    let mut terrain_bag: Vec<TerrainType> = Vec::with_capacity(total);
    for (terrain, share) in TERRAIN_DISTRIBUTION {
        let count = (total as f64 * share).round() as usize;
        terrain_bag.extend(std::iter::repeat(terrain).take(count));
    }
    terrain_bag.resize(total, TerrainType::Plains);
    terrain_bag.shuffle(rng);

    let mut bag = terrain_bag.into_iter();
    for y in 0..world.height() {
        for x in 0..world.width() {
            let terrain = bag.next().unwrap_or(TerrainType::Plains);
            let tile = world.tile_mut(x, y).expect("grid coordinate in bounds");
            tile.terrain = terrain;
            if !terrain.is_passable() {
                continue;
            }
            if rng.random::<f64>() < config.resources.food_spawn_chance {
                tile.resource = Some(Resource::new(
                    ResourceKind::Plant,
                    config.resources.plant_food_gain,
                    RESOURCE_USES,
                ));
            } else if rng.random::<f64>() < config.resources.water_spawn_chance {
                tile.resource = Some(Resource::new(
                    ResourceKind::Water,
                    config.resources.water_thirst_gain,
                    RESOURCE_USES,
                ));
            }
        }
    }

    world
}

/// Roll the initial population with categories spread evenly and place it
/// on shuffled open plains tiles.
pub fn generate_population(
    config: &SimulationConfig,
    world: &World,
    rng: &mut ChaCha8Rng,
) -> Result<Vec<Animal>> {
    let mut spawn_positions: Vec<(i32, i32)> = world
        .passable_positions()
        .into_iter()
        .filter(|&(x, y)| {
            world
                .tile(x, y)
                .is_some_and(|tile| tile.terrain == TerrainType::Plains)
        })
        .collect();
    spawn_positions.shuffle(rng);

    if spawn_positions.len() < config.population_size as usize {
        bail!(
            "world has {} open plains tiles but the population needs {}",
            spawn_positions.len(),
            config.population_size
        );
    }

    let mut animals = Vec::with_capacity(config.population_size as usize);
    for i in 0..config.population_size as u64 {
        let category = AnimalCategory::ALL[(i % AnimalCategory::ALL.len() as u64) as usize];
        let mut animal = create_random_animal(AnimalId(i), category, config, rng);
        animal.location = spawn_positions
            .pop()
            .expect("spawn positions checked above");
        animals.push(animal);
    }
    Ok(animals)
}
