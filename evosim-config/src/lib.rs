mod config;

pub use config::{
    default_simulation_config, load_simulation_config_from_path, simulation_config_from_toml_str,
    validate_simulation_config, ActionCostConfig, CombatConfig, EffectConfig, EvolutionConfig,
    FitnessWeights, NetworkTopology, ResourceConfig, SimulationConfig, StatusConfig, TraitConfig,
};
