use evosim_config::FitnessWeights;
use evosim_types::FitnessComponents;

/// Weighted scalar fitness. The resource accumulator counts raw units
/// (food/water points), so it is normalized by the per-unit divisor before
/// weighting; every other component is weighted directly.
pub fn fitness_score(components: &FitnessComponents, weights: &FitnessWeights) -> f64 {
    components.time * weights.time_weight
        + (components.resource / weights.resource_unit_divisor) * weights.resource_weight
        + components.kill * weights.kill_weight
        + components.distance * weights.distance_weight
        + components.event * weights.event_weight
}
