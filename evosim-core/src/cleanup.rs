use crate::{SimError, Simulation};
use evosim_types::{CleanupReport, Effect, EffectKind};

impl Simulation {
    /// Phase 4: the only phase allowed to mutate effect lists. Active
    /// effects tick down and expired ones are dropped, then the
    /// condition→effect rules run against the week's final status values.
    pub(crate) fn cleanup_phase(&mut self) -> Result<CleanupReport, SimError> {
        let thresholds = self.config.effects.clone();
        let mut report = CleanupReport::default();

        for animal in &mut self.animals {
            let before = animal.effects.len();
            for effect in &mut animal.effects {
                effect.tick();
                report.effects_updated += 1;
            }
            animal.effects.retain(|effect| !effect.is_expired());
            report.effects_removed += (before - animal.effects.len()) as u32;

            let mut triggered = Vec::new();
            if animal.status.hunger >= thresholds.well_fed_threshold {
                triggered.push(EffectKind::WellFed);
            }
            if animal.status.thirst >= thresholds.hydrated_threshold {
                triggered.push(EffectKind::Hydrated);
            }
            if animal.status.energy <= thresholds.exhausted_threshold {
                triggered.push(EffectKind::Exhausted);
            }
            for kind in triggered {
                if animal.has_effect(kind) {
                    continue;
                }
                let duration = if kind.is_buff() {
                    thresholds.buff_duration
                } else {
                    thresholds.debuff_duration
                };
                animal.effects.push(Effect::new(kind, duration));
                report.effects_added += 1;
            }

            report.animals_processed += 1;
        }

        Ok(report)
    }
}
