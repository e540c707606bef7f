use crate::animal::{HUNGER_MAX, THIRST_MAX};
use crate::{SimError, Simulation};
use evosim_types::{
    Action, ActionOutcome, AnimalId, DeathCause, ExecutionReport, PlannedAction, ResourceKind,
    TerrainType, TraitId,
};
use rand::Rng;
use std::collections::BTreeMap;

impl Simulation {
    /// Phase 3: execute the week's intents. Stationary actions
    /// (Rest/Eat/Drink/Attack) run first in decision order, then movement
    /// actions are resolved as conflict groups keyed by destination cell.
    /// Energy is charged for every attempt regardless of outcome; blocked
    /// moves, missing resources, and insufficient energy are failures
    /// reported as data, not errors.
    pub(crate) fn execution_phase(
        &mut self,
        actions: &[PlannedAction],
    ) -> Result<ExecutionReport, SimError> {
        let mut report = ExecutionReport::default();

        let mut stationary = Vec::new();
        let mut movement = Vec::new();
        for planned in actions {
            if planned.action.is_movement() {
                movement.push(*planned);
            } else {
                stationary.push(*planned);
            }
        }

        for planned in &stationary {
            let success = self.execute_stationary(planned, &mut report);
            record_outcome(&mut report, planned, success);
        }

        // Group contenders by destination; entries within a group keep the
        // original decision order, which is the tie-break rule.
        let mut groups: BTreeMap<(i32, i32), Vec<PlannedAction>> = BTreeMap::new();
        for planned in &movement {
            groups.entry(planned.target).or_default().push(*planned);
        }

        for group in groups.values() {
            if group.len() > 1 {
                report.movement_conflicts += 1;
            }
            let winner = self.movement_winner(group);
            for planned in group {
                if Some(planned.animal) == winner {
                    let success = self.execute_move(planned);
                    record_outcome(&mut report, planned, success);
                } else {
                    // Conflict losers still pay for the attempt, but the
                    // world is untouched.
                    let cost = self.movement_energy_cost(planned.target);
                    let _ = self.charge_energy(planned.animal, cost);
                    record_outcome(&mut report, planned, false);
                }
            }
        }

        Ok(report)
    }

    /// Strictly higher effective Agility wins the cell; exact ties break to
    /// the earliest contender in the original decision order. Contenders
    /// that died earlier in the phase are skipped.
    fn movement_winner(&self, group: &[PlannedAction]) -> Option<AnimalId> {
        let mut winner = None;
        let mut best_agility = i32::MIN;
        for planned in group {
            let Some(idx) = self.animal_index(planned.animal) else {
                continue;
            };
            let agility = self.animals[idx].effective_trait(TraitId::Agility);
            if agility > best_agility {
                best_agility = agility;
                winner = Some(planned.animal);
            }
        }
        winner
    }

    fn execute_move(&mut self, planned: &PlannedAction) -> bool {
        let cost = self.movement_energy_cost(planned.target);
        let Some(had_energy) = self.charge_energy(planned.animal, cost) else {
            return false;
        };
        if !had_energy {
            return false;
        }

        let (tx, ty) = planned.target;
        let passable = self
            .world
            .tile(tx, ty)
            .is_some_and(|tile| tile.is_passable());
        if !passable {
            return false;
        }

        let idx = self
            .animal_index(planned.animal)
            .expect("charged animal must still be alive");
        let (ox, oy) = self.animals[idx].location;
        if let Some(tile) = self.world.tile_mut(ox, oy) {
            tile.occupant = None;
        }
        self.world
            .tile_mut(tx, ty)
            .expect("target tile checked in bounds")
            .occupant = Some(planned.animal);
        self.animals[idx].location = (tx, ty);
        self.animals[idx].fitness.add_distance(1.0);
        true
    }

    fn execute_stationary(&mut self, planned: &PlannedAction, report: &mut ExecutionReport) -> bool {
        match planned.action {
            Action::Rest => self.execute_rest(planned.animal),
            Action::Eat => self.execute_eat(planned.animal),
            Action::Drink => self.execute_drink(planned.animal),
            Action::Attack => self.execute_attack(planned.animal, report),
            Action::Move(_) => false,
        }
    }

    fn execute_rest(&mut self, id: AnimalId) -> bool {
        let Some(idx) = self.animal_index(id) else {
            return false;
        };
        let animal = &mut self.animals[idx];
        let energy_cap = animal.max_energy(&self.config.traits);
        let health_cap = animal.max_health(&self.config.traits);
        animal.status.energy =
            (animal.status.energy + self.config.actions.rest_energy_gain).min(energy_cap);
        animal.status.health =
            (animal.status.health + self.config.actions.rest_health_gain).min(health_cap);
        true
    }

    fn execute_eat(&mut self, id: AnimalId) -> bool {
        let Some(had_energy) = self.charge_energy(id, self.config.actions.consume_cost) else {
            return false;
        };
        if !had_energy {
            return false;
        }

        let idx = self
            .animal_index(id)
            .expect("charged animal must still be alive");
        let category = self.animals[idx].category;
        let (x, y) = self.animals[idx].location;

        // Only the acting animal may draw from its tile this week; draws
        // are serialized by execution order.
        let tile = self
            .world
            .tile_mut(x, y)
            .expect("animal location must be in bounds");
        let Some(resource) = tile.resource.as_mut() else {
            return false;
        };
        if !resource.kind.is_food() || !resource.kind.edible_by(category) {
            return false;
        }
        let gain = resource.consume();
        if resource.is_depleted() {
            tile.resource = None;
        }
        if gain == 0 {
            return false;
        }

        let animal = &mut self.animals[idx];
        animal.status.hunger = (animal.status.hunger + gain as f32).min(HUNGER_MAX);
        animal.fitness.add_resource(gain as f64);
        true
    }

    fn execute_drink(&mut self, id: AnimalId) -> bool {
        let Some(had_energy) = self.charge_energy(id, self.config.actions.consume_cost) else {
            return false;
        };
        if !had_energy {
            return false;
        }

        let idx = self
            .animal_index(id)
            .expect("charged animal must still be alive");
        let (x, y) = self.animals[idx].location;

        let mut gain = 0u32;
        let tile = self
            .world
            .tile_mut(x, y)
            .expect("animal location must be in bounds");
        if let Some(resource) = tile.resource.as_mut() {
            if resource.kind == ResourceKind::Water {
                gain = resource.consume();
                if resource.is_depleted() {
                    tile.resource = None;
                }
            }
        }
        if gain == 0 {
            // Drinking from the bank: an adjacent water tile suffices.
            if self.world.has_adjacent_terrain(x, y, TerrainType::Water) {
                gain = self.config.resources.adjacent_drink_gain;
            }
        }
        if gain == 0 {
            return false;
        }

        let animal = &mut self.animals[idx];
        animal.status.thirst = (animal.status.thirst + gain as f32).min(THIRST_MAX);
        animal.fitness.add_resource(gain as f64);
        true
    }

    fn execute_attack(&mut self, id: AnimalId, report: &mut ExecutionReport) -> bool {
        let Some(had_energy) = self.charge_energy(id, self.config.actions.attack_cost) else {
            return false;
        };
        if !had_energy {
            return false;
        }

        let attacker_idx = self
            .animal_index(id)
            .expect("charged animal must still be alive");
        let (x, y) = self.animals[attacker_idx].location;

        // First adjacent occupant in the fixed N/E/S/W scan.
        let target_id = self
            .world
            .adjacent(x, y)
            .into_iter()
            .find_map(|(nx, ny)| self.world.occupant_at(nx, ny))
            .filter(|&occupant| occupant != id);
        let Some(target_id) = target_id else {
            return false;
        };
        let Some(target_idx) = self.animal_index(target_id) else {
            return false;
        };

        report.combat_encounters += 1;

        let evasion = (self.animals[target_idx].effective_trait(TraitId::Agility) as f32
            * self.config.combat.agility_evasion_multiplier)
            .min(self.config.combat.evasion_cap);
        let roll: f32 = self.rng.random_range(0.0..100.0);
        if roll < evasion {
            // A clean miss is still a carried-out attack.
            return true;
        }

        let damage = self.animals[attacker_idx].effective_trait(TraitId::Strength) as f32
            * self.config.combat.strength_damage_multiplier;
        let target = &mut self.animals[target_idx];
        target.status.health = (target.status.health - damage).max(0.0);

        if !self.animals[target_idx].is_alive() {
            let casualty = self.bury(target_idx, DeathCause::Combat);
            report.casualties.push(casualty);
            // Burial may have shifted the attacker's index.
            let attacker_idx = self
                .animal_index(id)
                .expect("attacker must still be alive");
            self.animals[attacker_idx].fitness.add_kill(1.0);
        }
        true
    }

    /// Base move cost scaled by the destination terrain's multiplier; an
    /// impassable or out-of-bounds destination still charges the base cost
    /// for the attempt.
    fn movement_energy_cost(&self, target: (i32, i32)) -> f32 {
        let base = self.config.actions.move_cost;
        match self
            .world
            .tile(target.0, target.1)
            .and_then(|tile| tile.movement_cost())
        {
            Some(multiplier) => base * multiplier,
            None => base,
        }
    }

    /// Drain the action's energy cost, clamping at zero. Returns whether
    /// the animal had enough energy for the attempt to count, or `None`
    /// when the animal is no longer alive.
    fn charge_energy(&mut self, id: AnimalId, cost: f32) -> Option<bool> {
        let idx = self.animal_index(id)?;
        let animal = &mut self.animals[idx];
        let had_enough = animal.status.energy >= cost;
        animal.status.energy = (animal.status.energy - cost).max(0.0);
        Some(had_enough)
    }
}

fn record_outcome(report: &mut ExecutionReport, planned: &PlannedAction, success: bool) {
    if success {
        report.actions_executed += 1;
    } else {
        report.actions_failed += 1;
    }
    report.outcomes.push(ActionOutcome {
        animal: planned.animal,
        action: planned.action,
        success,
    });
}
