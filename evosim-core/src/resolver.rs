use crate::Simulation;
use evosim_types::{DecisionReport, PlannedAction, WeekReport};
use log::{debug, warn};

impl Simulation {
    /// Resolve one week through the fixed four-phase pipeline:
    /// Decision → Status/Environmental → Execution → Cleanup. Phases never
    /// reorder or skip; if one fails the rest of the week is aborted and
    /// the report carries `phases_completed < 4` together with every
    /// sub-result computed before the failure.
    pub fn resolve_week(&mut self) -> WeekReport {
        self.week += 1;
        let population_before = self.animals.len();
        let mut report = WeekReport {
            week: self.week,
            ..WeekReport::default()
        };

        debug!(
            "week {}: resolving {} living animals",
            self.week, population_before
        );

        let actions: Vec<PlannedAction> = match self.decision_phase() {
            Ok(actions) => {
                report.decision = Some(DecisionReport {
                    actions_collected: actions.len() as u32,
                });
                report.actions_processed = actions.len() as u32;
                report.phases_completed = 1;
                actions
            }
            Err(err) => {
                warn!("week {}: decision phase failed: {err}", self.week);
                report.error = Some(err.to_string());
                return report;
            }
        };

        match self.status_phase() {
            Ok(status) => {
                report.casualties.extend(status.casualties.iter().copied());
                report.status = Some(status);
                report.phases_completed = 2;
            }
            Err(err) => {
                warn!("week {}: status phase failed: {err}", self.week);
                report.error = Some(err.to_string());
                return report;
            }
        }

        // Animals that died of attrition never act: drop their intents.
        let actions: Vec<PlannedAction> = actions
            .into_iter()
            .filter(|planned| self.animal_index(planned.animal).is_some())
            .collect();

        match self.execution_phase(&actions) {
            Ok(execution) => {
                report.conflicts_resolved = execution.movement_conflicts;
                report
                    .casualties
                    .extend(execution.casualties.iter().copied());
                report.execution = Some(execution);
                report.phases_completed = 3;
            }
            Err(err) => {
                warn!("week {}: execution phase failed: {err}", self.week);
                report.error = Some(err.to_string());
                return report;
            }
        }

        match self.cleanup_phase() {
            Ok(cleanup) => {
                report.cleanup = Some(cleanup);
                report.phases_completed = 4;
            }
            Err(err) => {
                warn!("week {}: cleanup phase failed: {err}", self.week);
                report.error = Some(err.to_string());
                return report;
            }
        }

        self.debug_assert_consistent_state();
        debug_assert_eq!(
            report.casualties.len(),
            population_before - self.animals.len(),
            "reported casualties must equal the population delta",
        );

        report
    }
}
