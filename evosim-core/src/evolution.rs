use crate::animal::{create_random_animal, Animal};
use crate::brain::DecisionNetwork;
use crate::fitness::fitness_score;
use crate::{SimError, Simulation};
use evosim_config::SimulationConfig;
use evosim_types::AnimalId;
use rand::Rng;

/// One-point crossover on flattened parameter vectors. Both operands must
/// have identical length; vectors shorter than two genes have no interior
/// cut point and pass through unchanged.
pub fn one_point_crossover<R: Rng + ?Sized>(
    left: &[f32],
    right: &[f32],
    rng: &mut R,
) -> Result<Vec<f32>, SimError> {
    if left.len() != right.len() {
        return Err(SimError::CrossoverLength {
            left: left.len(),
            right: right.len(),
        });
    }
    if left.len() < 2 {
        return Ok(left.to_vec());
    }
    let cut = rng.random_range(1..left.len());
    let mut child = Vec::with_capacity(left.len());
    child.extend_from_slice(&left[..cut]);
    child.extend_from_slice(&right[cut..]);
    Ok(child)
}

/// Per-gene Gaussian mutation: each parameter independently perturbed with
/// probability `mutation_rate` by zero-mean noise of fixed `sigma`.
fn mutate_params<R: Rng + ?Sized>(params: &mut [f32], rate: f64, sigma: f64, rng: &mut R) {
    for param in params {
        if rng.random::<f64>() < rate {
            *param += gaussian(rng) * sigma as f32;
        }
    }
}

/// Standard normal sample via Box-Muller.
fn gaussian<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    let u1: f32 = rng.random::<f32>().max(f32::EPSILON);
    let u2: f32 = rng.random::<f32>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f32::consts::PI * u2).cos()
}

/// Pick the fittest of a uniformly sampled subset. Scores are precomputed
/// by the caller so the tournament itself is just index juggling.
fn tournament_pick<R: Rng + ?Sized>(scores: &[f64], size: usize, rng: &mut R) -> usize {
    let amount = size.min(scores.len());
    let sampled = rand::seq::index::sample(rng, scores.len(), amount);
    sampled
        .iter()
        .max_by(|&a, &b| {
            scores[a]
                .total_cmp(&scores[b])
                .then_with(|| b.cmp(&a))
        })
        .expect("tournament sample is never empty for a non-empty population")
}

/// Produce the next generation from a scored one: elites keep their brains
/// verbatim in fresh shells, the rest come from tournament-selected
/// parents crossed at one point and mutated per gene. The output has the
/// same size as the input; an empty input yields an empty generation.
pub fn evolve_population<R: Rng + ?Sized>(
    parents: &[Animal],
    config: &SimulationConfig,
    next_animal_id: &mut u64,
    rng: &mut R,
) -> Result<Vec<Animal>, SimError> {
    if parents.is_empty() {
        return Ok(Vec::new());
    }

    let pop_size = parents.len();
    let mut ranked: Vec<usize> = (0..pop_size).collect();
    let scores: Vec<f64> = parents
        .iter()
        .map(|animal| fitness_score(&animal.fitness, &config.fitness))
        .collect();
    ranked.sort_by(|&a, &b| {
        scores[b]
            .total_cmp(&scores[a])
            .then_with(|| parents[a].id.cmp(&parents[b].id))
    });

    let elite_count =
        ((pop_size as f64 * config.evolution.elite_fraction).ceil() as usize).min(pop_size);

    let mut next_generation = Vec::with_capacity(pop_size);
    let mut alloc_id = |next: &mut u64| -> AnimalId {
        let id = AnimalId(*next);
        *next += 1;
        id
    };

    for &parent_idx in ranked.iter().take(elite_count) {
        let parent = &parents[parent_idx];
        let id = alloc_id(next_animal_id);
        let mut child = create_random_animal(id, parent.category, config, rng);
        child.brain = parent.brain.clone();
        next_generation.push(child);
    }

    let ranked_scores: Vec<f64> = ranked.iter().map(|&idx| scores[idx]).collect();
    while next_generation.len() < pop_size {
        let first = &parents[ranked[tournament_pick(&ranked_scores, config.evolution.tournament_size, rng)]];
        let second =
            &parents[ranked[tournament_pick(&ranked_scores, config.evolution.tournament_size, rng)]];

        let category = if rng.random_range(0..2) == 0 {
            first.category
        } else {
            second.category
        };

        let mut params = one_point_crossover(&first.brain.flatten(), &second.brain.flatten(), rng)?;
        mutate_params(
            &mut params,
            config.evolution.mutation_rate,
            config.evolution.mutation_sigma,
            rng,
        );

        let id = alloc_id(next_animal_id);
        let mut child = create_random_animal(id, category, config, rng);
        child.brain = DecisionNetwork::from_flat(&config.network, &params)?;
        next_generation.push(child);
    }

    Ok(next_generation)
}

impl Simulation {
    /// Score the whole generation — survivors and graveyard alike — and
    /// evolve it through the shared simulation RNG.
    pub(crate) fn evolve_current_generation(&mut self) -> Result<Vec<Animal>, SimError> {
        let mut pool: Vec<Animal> = Vec::with_capacity(self.animals.len() + self.graveyard.len());
        pool.extend(self.animals.iter().cloned());
        pool.extend(self.graveyard.iter().cloned());
        pool.sort_by_key(|animal| animal.id);

        let mut next_id = self.next_animal_id;
        let children = evolve_population(&pool, &self.config, &mut next_id, &mut self.rng)?;
        self.next_animal_id = next_id;
        Ok(children)
    }
}
