use crate::animal::{Animal, StatusBlock, TraitBlock};
use crate::brain::DecisionNetwork;
use crate::world::World;
use crate::Simulation;
use evosim_config::SimulationConfig;
use evosim_types::{Action, AnimalCategory, AnimalId, FitnessComponents, TerrainType};

/// Small, deterministic tuning: a 6x6 plains world, a tiny network, and the
/// default rates everywhere else.
pub(super) fn test_config() -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.world_width = 6;
    config.world_height = 6;
    config.population_size = 4;
    config.max_weeks = 10;
    config.max_generations = 2;
    config.network.hidden1_nodes = 4;
    config.network.hidden2_nodes = 4;
    config.evolution.tournament_size = 3;
    config
}

pub(super) fn make_world(config: &SimulationConfig) -> World {
    World::new(config.world_width, config.world_height, TerrainType::Plains)
}

/// A brain whose softmax argmax is pinned to one action: all weights zero,
/// a single positive output bias.
pub(super) fn forced_brain(config: &SimulationConfig, action: Action) -> DecisionNetwork {
    let mut params = vec![0.0f32; config.network.parameter_count()];
    let b3_offset = config.network.parameter_count() - config.network.output_nodes;
    params[b3_offset + action.index()] = 1.0;
    DecisionNetwork::from_flat(&config.network, &params).expect("forced brain parameters fit")
}

pub(super) fn make_animal(
    config: &SimulationConfig,
    id: u64,
    x: i32,
    y: i32,
    action: Action,
) -> Animal {
    Animal {
        id: AnimalId(id),
        category: AnimalCategory::Herbivore,
        location: (x, y),
        traits: TraitBlock::uniform(5),
        status: StatusBlock {
            health: 100.0,
            hunger: 100.0,
            thirst: 100.0,
            energy: 100.0,
        },
        effects: Vec::new(),
        fitness: FitnessComponents::default(),
        brain: forced_brain(config, action),
    }
}

pub(super) fn build_sim(config: SimulationConfig, animals: Vec<Animal>, seed: u64) -> Simulation {
    let world = make_world(&config);
    Simulation::from_parts(config, world, animals, seed).expect("simulation should initialize")
}

pub(super) fn animal_location(sim: &Simulation, id: u64) -> (i32, i32) {
    sim.animal(AnimalId(id))
        .expect("animal should be alive")
        .location
}
