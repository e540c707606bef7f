use evosim_config::SimulationConfig;
use evosim_types::{Action, AnimalId, Casualty, DeathCause};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

mod animal;
mod brain;
mod cleanup;
mod controller;
mod decision;
mod evolution;
mod execution;
mod fitness;
mod resolver;
mod sensory;
mod status;
mod world;

#[cfg(test)]
mod tests;

pub use animal::{create_random_animal, Animal, StatusBlock, TraitBlock};
pub use brain::DecisionNetwork;
pub use evolution::{evolve_population, one_point_crossover};
pub use fitness::fitness_score;
pub use sensory::SENSORY_WIDTH;
pub use world::{Tile, World};

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("sensory input length {actual} does not match network input width {expected}")]
    InputWidth { expected: usize, actual: usize },
    #[error("parameter vector length {actual} does not match network parameter count {expected}")]
    ParameterLength { expected: usize, actual: usize },
    #[error("crossover operands differ in length ({left} vs {right})")]
    CrossoverLength { left: usize, right: usize },
    #[error("animal {0:?} placed on invalid or occupied tile ({1}, {2})")]
    InvalidPlacement(AnimalId, i32, i32),
}

/// The simulation context threaded through every phase: the world, the
/// living population (sole owner of animals, kept sorted by id), the
/// graveyard (corpses are kept for post-mortem fitness reads), and the one
/// seedable RNG every stochastic choice routes through.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    seed: u64,
    rng: ChaCha8Rng,
    week: u64,
    generation: u32,
    world: World,
    animals: Vec<Animal>,
    graveyard: Vec<Animal>,
    next_animal_id: u64,
}

impl Simulation {
    /// A fully-formed world and a placed population come in from outside;
    /// the core performs no world or population generation of its own.
    pub fn from_parts(
        config: SimulationConfig,
        world: World,
        animals: Vec<Animal>,
        seed: u64,
    ) -> Result<Self, SimError> {
        validate_config(&config)?;
        if world.width() != config.world_width as i32
            || world.height() != config.world_height as i32
        {
            return Err(SimError::InvalidConfig(format!(
                "world is {}x{} but config expects {}x{}",
                world.width(),
                world.height(),
                config.world_width,
                config.world_height
            )));
        }

        let mut sim = Self {
            config,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            week: 0,
            generation: 0,
            world,
            animals: Vec::new(),
            graveyard: Vec::new(),
            next_animal_id: 0,
        };

        let mut animals = animals;
        animals.sort_by_key(|animal| animal.id);
        for animal in animals {
            sim.next_animal_id = sim.next_animal_id.max(animal.id.0 + 1);
            sim.register_animal(animal)?;
        }
        sim.debug_assert_consistent_state();
        Ok(sim)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn week(&self) -> u64 {
        self.week
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn animals(&self) -> &[Animal] {
        &self.animals
    }

    pub fn graveyard(&self) -> &[Animal] {
        &self.graveyard
    }

    pub fn living_count(&self) -> usize {
        self.animals.len()
    }

    pub fn animal(&self, id: AnimalId) -> Option<&Animal> {
        self.animal_index(id).map(|idx| &self.animals[idx])
    }

    pub(crate) fn animal_index(&self, id: AnimalId) -> Option<usize> {
        self.animals.binary_search_by_key(&id, |a| a.id).ok()
    }

    /// Insert an animal into the population and claim its tile. The
    /// population stays sorted by id; the tile stores only the id.
    pub(crate) fn register_animal(&mut self, animal: Animal) -> Result<(), SimError> {
        let (x, y) = animal.location;
        let Some(tile) = self.world.tile_mut(x, y) else {
            return Err(SimError::InvalidPlacement(animal.id, x, y));
        };
        if !tile.terrain.is_passable() || tile.occupant.is_some() {
            return Err(SimError::InvalidPlacement(animal.id, x, y));
        }
        let insert_at = match self.animals.binary_search_by_key(&animal.id, |a| a.id) {
            Ok(_) => return Err(SimError::InvalidPlacement(animal.id, x, y)),
            Err(insert_at) => insert_at,
        };
        self.world
            .tile_mut(x, y)
            .expect("tile checked above")
            .occupant = Some(animal.id);
        self.animals.insert(insert_at, animal);
        Ok(())
    }

    /// Move a dead animal to the graveyard, vacating its tile. Corpses are
    /// never deleted: fitness is read post-mortem by the evolution engine.
    pub(crate) fn bury(&mut self, index: usize, cause: DeathCause) -> Casualty {
        let animal = self.animals.remove(index);
        if let Some(tile) = self.world.tile_mut(animal.location.0, animal.location.1) {
            if tile.occupant == Some(animal.id) {
                tile.occupant = None;
            }
        }
        let casualty = Casualty {
            animal: animal.id,
            cause,
        };
        self.graveyard.push(animal);
        casualty
    }

    pub(crate) fn debug_assert_consistent_state(&self) {
        if cfg!(debug_assertions) {
            let occupied = self.world.occupied_cell_count();
            debug_assert_eq!(
                occupied,
                self.animals.len(),
                "tile occupancy count should match living population",
            );
            for animal in &self.animals {
                debug_assert_eq!(
                    self.world.occupant_at(animal.location.0, animal.location.1),
                    Some(animal.id),
                    "tile must point back at the animal occupying it",
                );
            }
        }
    }
}

fn validate_config(config: &SimulationConfig) -> Result<(), SimError> {
    if config.world_width == 0 || config.world_height == 0 {
        return Err(SimError::InvalidConfig(
            "world dimensions must be greater than zero".to_owned(),
        ));
    }
    if config.network.input_nodes != sensory::SENSORY_WIDTH {
        return Err(SimError::InvalidConfig(format!(
            "network input_nodes must equal the sensory width {}",
            sensory::SENSORY_WIDTH
        )));
    }
    if config.network.output_nodes != Action::COUNT {
        return Err(SimError::InvalidConfig(format!(
            "network output_nodes must equal the action count {}",
            Action::COUNT
        )));
    }
    if !(0.0..=1.0).contains(&config.evolution.elite_fraction) {
        return Err(SimError::InvalidConfig(
            "elite_fraction must be within [0, 1]".to_owned(),
        ));
    }
    if config.evolution.tournament_size == 0 {
        return Err(SimError::InvalidConfig(
            "tournament_size must be greater than zero".to_owned(),
        ));
    }
    if !(0.0..=1.0).contains(&config.evolution.mutation_rate) {
        return Err(SimError::InvalidConfig(
            "mutation_rate must be within [0, 1]".to_owned(),
        ));
    }
    if config.status.hunger_decay < 0.0
        || config.status.thirst_decay < 0.0
        || config.status.energy_regen < 0.0
        || config.status.energy_decay < 0.0
    {
        return Err(SimError::InvalidConfig(
            "status rates must be >= 0".to_owned(),
        ));
    }
    if config.actions.move_cost < 0.0
        || config.actions.attack_cost < 0.0
        || config.actions.consume_cost < 0.0
    {
        return Err(SimError::InvalidConfig(
            "action energy costs must be >= 0".to_owned(),
        ));
    }
    if config.fitness.resource_unit_divisor <= 0.0 {
        return Err(SimError::InvalidConfig(
            "resource_unit_divisor must be greater than zero".to_owned(),
        ));
    }
    Ok(())
}
