use crate::{SimError, Simulation};
use evosim_types::{DeathCause, EffectKind, StatusReport};

impl Simulation {
    /// Phase 2: once-per-week passive drains and attrition. Hunger and
    /// thirst only ever decrease here; energy regenerates toward its cap
    /// while the animal is fed and watered, otherwise decays; health drops
    /// from starvation, dehydration, and damaging effects. Animals whose
    /// health reaches zero are buried immediately so the execution phase
    /// never runs an action for a corpse.
    pub(crate) fn status_phase(&mut self) -> Result<StatusReport, SimError> {
        let rates = self.config.status.clone();
        let traits_config = self.config.traits.clone();
        let mut report = StatusReport::default();

        for animal in &mut self.animals {
            animal.fitness.add_time(1.0);

            let previous_hunger = animal.status.hunger;
            animal.status.hunger = (animal.status.hunger - rates.hunger_decay).max(0.0);
            if animal.status.hunger < previous_hunger {
                report.hunger_depletions += 1;
            }

            let previous_thirst = animal.status.thirst;
            animal.status.thirst = (animal.status.thirst - rates.thirst_decay).max(0.0);
            if animal.status.thirst < previous_thirst {
                report.thirst_depletions += 1;
            }

            let fed = animal.status.hunger > rates.fed_threshold
                && animal.status.thirst > rates.fed_threshold;
            if fed {
                let cap = animal.max_energy(&traits_config);
                let previous_energy = animal.status.energy;
                animal.status.energy = (animal.status.energy + rates.energy_regen).min(cap);
                if animal.status.energy > previous_energy {
                    report.energy_regenerations += 1;
                }
            } else {
                animal.status.energy = (animal.status.energy - rates.energy_decay).max(0.0);
            }

            let mut damage = 0.0;
            if animal.status.hunger == 0.0 {
                damage += rates.starvation_damage;
            }
            if animal.status.thirst == 0.0 {
                damage += rates.dehydration_damage;
            }
            for effect in &animal.effects {
                match effect.kind {
                    EffectKind::Poisoned => damage += rates.poison_damage,
                    EffectKind::Injured => damage += rates.injury_damage,
                    _ => {}
                }
            }
            if damage > 0.0 {
                animal.status.health = (animal.status.health - damage).max(0.0);
                report.health_losses += 1;
            }

            report.animals_processed += 1;
        }

        // Bury the week's attrition deaths in reverse index order so the
        // remaining indices stay valid.
        let dead: Vec<usize> = self
            .animals
            .iter()
            .enumerate()
            .filter(|(_, animal)| !animal.is_alive())
            .map(|(idx, _)| idx)
            .collect();
        for idx in dead.into_iter().rev() {
            let cause = attrition_cause(&self.animals[idx]);
            let casualty = self.bury(idx, cause);
            report.casualties.push(casualty);
        }
        report.casualties.reverse();

        Ok(report)
    }
}

/// Precedence when several drains contributed the same week: dehydration
/// deals the larger damage in the default tuning, so it is named first,
/// then starvation, then effect attrition.
fn attrition_cause(animal: &crate::animal::Animal) -> DeathCause {
    if animal.status.thirst == 0.0 {
        DeathCause::Dehydration
    } else if animal.status.hunger == 0.0 {
        DeathCause::Starvation
    } else {
        DeathCause::Attrition
    }
}
