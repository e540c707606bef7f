use crate::brain::select_action_index;
use crate::sensory::build_input_vector;
use crate::{SimError, Simulation};
use evosim_types::{Action, PlannedAction};
use rayon::prelude::*;

impl Simulation {
    /// Phase 1: one intended action per living animal, in stable population
    /// order. All decisions are made against the same pre-phase world
    /// state, so no animal's choice can observe another's choice from this
    /// week. No world or animal state is mutated here; per-animal work is
    /// data-parallel and collected back in input order.
    pub(crate) fn decision_phase(&self) -> Result<Vec<PlannedAction>, SimError> {
        let world = &self.world;
        let traits_config = &self.config.traits;

        self.animals
            .par_iter()
            .map(|animal| {
                let input = build_input_vector(world, animal, traits_config);
                let probabilities = animal.brain.forward(&input)?;
                let action = Action::from_index(select_action_index(&probabilities))
                    .unwrap_or(Action::Rest);
                Ok(PlannedAction {
                    animal: animal.id,
                    action,
                    target: action_target(animal.location, action),
                })
            })
            .collect()
    }
}

/// Movement actions aim at the adjacent cell in their direction; stationary
/// actions report the animal's own cell.
fn action_target(location: (i32, i32), action: Action) -> (i32, i32) {
    match action {
        Action::Move(direction) => {
            let (dx, dy) = direction.offset();
            (location.0 + dx, location.1 + dy)
        }
        Action::Rest | Action::Eat | Action::Drink | Action::Attack => location,
    }
}
