use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TraitConfig {
    pub standard_min: i32,
    pub standard_max: i32,
    pub primary_min: i32,
    pub primary_max: i32,
    pub base_health: i32,
    pub health_per_endurance: i32,
    pub base_energy: i32,
    pub energy_per_endurance: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusConfig {
    pub hunger_decay: f32,
    pub thirst_decay: f32,
    pub energy_regen: f32,
    pub energy_decay: f32,
    /// Energy regenerates only while hunger and thirst are both above this.
    pub fed_threshold: f32,
    pub starvation_damage: f32,
    pub dehydration_damage: f32,
    pub poison_damage: f32,
    pub injury_damage: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionCostConfig {
    /// Base energy cost of a move; scaled by the target tile's terrain cost.
    pub move_cost: f32,
    pub attack_cost: f32,
    pub consume_cost: f32,
    pub rest_energy_gain: f32,
    pub rest_health_gain: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CombatConfig {
    pub strength_damage_multiplier: f32,
    pub agility_evasion_multiplier: f32,
    /// Evasion chance in percent is capped here so attacks are never futile.
    pub evasion_cap: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceConfig {
    pub plant_food_gain: u32,
    pub prey_food_gain: u32,
    pub water_thirst_gain: u32,
    /// Thirst gained when drinking from the bank of a water tile.
    pub adjacent_drink_gain: u32,
    pub food_spawn_chance: f64,
    pub water_spawn_chance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EffectConfig {
    pub buff_duration: u32,
    pub debuff_duration: u32,
    pub well_fed_threshold: f32,
    pub hydrated_threshold: f32,
    pub exhausted_threshold: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FitnessWeights {
    pub time_weight: f64,
    pub resource_weight: f64,
    pub kill_weight: f64,
    pub distance_weight: f64,
    pub event_weight: f64,
    /// Raw resource units are divided by this before weighting.
    pub resource_unit_divisor: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvolutionConfig {
    pub elite_fraction: f64,
    pub tournament_size: usize,
    pub mutation_rate: f64,
    pub mutation_sigma: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkTopology {
    pub input_nodes: usize,
    pub hidden1_nodes: usize,
    pub hidden2_nodes: usize,
    pub output_nodes: usize,
    pub init_weight_scale: f32,
}

impl NetworkTopology {
    pub fn parameter_count(&self) -> usize {
        self.hidden1_nodes * self.input_nodes
            + self.hidden1_nodes
            + self.hidden2_nodes * self.hidden1_nodes
            + self.hidden2_nodes
            + self.output_nodes * self.hidden2_nodes
            + self.output_nodes
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationConfig {
    pub world_width: u32,
    pub world_height: u32,
    pub population_size: u32,
    pub max_weeks: u32,
    pub max_generations: u32,
    pub traits: TraitConfig,
    pub status: StatusConfig,
    pub actions: ActionCostConfig,
    pub combat: CombatConfig,
    pub resources: ResourceConfig,
    pub effects: EffectConfig,
    pub fitness: FitnessWeights,
    pub evolution: EvolutionConfig,
    pub network: NetworkTopology,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        default_simulation_config()
    }
}

pub fn simulation_config_from_toml_str(raw: &str) -> Result<SimulationConfig, toml::de::Error> {
    toml::from_str(raw)
}

pub fn default_simulation_config() -> SimulationConfig {
    simulation_config_from_toml_str(include_str!("../default.toml"))
        .expect("default simulation config TOML must deserialize")
}

pub fn load_simulation_config_from_path(path: &Path) -> Result<SimulationConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read simulation config from {}", path.display()))?;
    simulation_config_from_toml_str(&raw)
        .with_context(|| format!("failed to parse simulation config from {}", path.display()))
}

/// Schema-level sanity checks. The core re-validates the subset it depends
/// on at `Simulation` construction time.
pub fn validate_simulation_config(config: &SimulationConfig) -> Result<(), String> {
    if config.world_width == 0 || config.world_height == 0 {
        return Err("world dimensions must be greater than zero".to_owned());
    }
    if config.population_size == 0 {
        return Err("population_size must be greater than zero".to_owned());
    }
    if config.max_weeks == 0 {
        return Err("max_weeks must be greater than zero".to_owned());
    }
    if config.max_generations == 0 {
        return Err("max_generations must be greater than zero".to_owned());
    }
    if config.traits.standard_min < 1 || config.traits.standard_min > config.traits.standard_max {
        return Err("standard trait range must satisfy 1 <= min <= max".to_owned());
    }
    if config.traits.primary_min < 1 || config.traits.primary_min > config.traits.primary_max {
        return Err("primary trait range must satisfy 1 <= min <= max".to_owned());
    }
    if config.status.hunger_decay < 0.0 || config.status.thirst_decay < 0.0 {
        return Err("status decay rates must be >= 0".to_owned());
    }
    if config.actions.move_cost < 0.0
        || config.actions.attack_cost < 0.0
        || config.actions.consume_cost < 0.0
    {
        return Err("action energy costs must be >= 0".to_owned());
    }
    if !(0.0..=1.0).contains(&config.resources.food_spawn_chance)
        || !(0.0..=1.0).contains(&config.resources.water_spawn_chance)
    {
        return Err("resource spawn chances must be within [0, 1]".to_owned());
    }
    if config.fitness.resource_unit_divisor <= 0.0 {
        return Err("resource_unit_divisor must be greater than zero".to_owned());
    }
    if !(0.0..=1.0).contains(&config.evolution.elite_fraction) {
        return Err("elite_fraction must be within [0, 1]".to_owned());
    }
    if config.evolution.tournament_size == 0 {
        return Err("tournament_size must be greater than zero".to_owned());
    }
    if !(0.0..=1.0).contains(&config.evolution.mutation_rate) {
        return Err("mutation_rate must be within [0, 1]".to_owned());
    }
    if config.evolution.mutation_sigma < 0.0 {
        return Err("mutation_sigma must be >= 0".to_owned());
    }
    if config.network.input_nodes == 0
        || config.network.hidden1_nodes == 0
        || config.network.hidden2_nodes == 0
        || config.network.output_nodes == 0
    {
        return Err("network layer sizes must be greater than zero".to_owned());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses_and_validates() {
        let config = SimulationConfig::default();
        validate_simulation_config(&config).expect("default config should validate");
        assert_eq!(config.network.output_nodes, 8);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = SimulationConfig::default();
        let json = serde_json::to_string(&config).expect("serialize config");
        let parsed: SimulationConfig = serde_json::from_str(&json).expect("deserialize config");
        assert_eq!(parsed, config);
    }

    #[test]
    fn parameter_count_matches_layer_shapes() {
        let topology = NetworkTopology {
            input_nodes: 3,
            hidden1_nodes: 2,
            hidden2_nodes: 2,
            output_nodes: 4,
            init_weight_scale: 0.1,
        };
        // 2*3 + 2 + 2*2 + 2 + 4*2 + 4
        assert_eq!(topology.parameter_count(), 26);
    }

    #[test]
    fn rejects_zero_population() {
        let mut config = SimulationConfig::default();
        config.population_size = 0;
        assert!(validate_simulation_config(&config).is_err());
    }

    #[test]
    fn rejects_out_of_range_mutation_rate() {
        let mut config = SimulationConfig::default();
        config.evolution.mutation_rate = 1.5;
        assert!(validate_simulation_config(&config).is_err());
    }
}
