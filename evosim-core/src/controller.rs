use crate::{SimError, Simulation};
use evosim_types::GenerationSummary;
use log::{info, warn};
use rand::seq::SliceRandom;

impl Simulation {
    /// Run weeks until the configured limit, a failed week, or the
    /// population collapsing to at most one survivor.
    pub fn run_generation(&mut self) -> GenerationSummary {
        let max_weeks = self.config.max_weeks;
        let mut weeks_completed = 0u32;

        info!(
            "generation {}: starting with {} animals",
            self.generation,
            self.animals.len()
        );

        for _ in 0..max_weeks {
            if self.animals.len() <= 1 {
                break;
            }
            let report = self.resolve_week();
            weeks_completed += 1;
            if !report.succeeded() {
                warn!(
                    "generation {}: week {} aborted after {} phases",
                    self.generation, report.week, report.phases_completed
                );
                break;
            }
        }

        let summary = self.generation_summary(weeks_completed);
        info!(
            "generation {}: {} weeks, {} survivors, {} casualties",
            summary.generation, summary.weeks_completed, summary.survivors, summary.casualties
        );
        summary
    }

    fn generation_summary(&self, weeks_completed: u32) -> GenerationSummary {
        let survivors = self.animals.len() as u32;
        GenerationSummary {
            generation: self.generation,
            weeks_completed,
            survivors,
            casualties: self.graveyard.len() as u32,
            winner: if survivors == 1 {
                self.animals.first().map(|animal| animal.id)
            } else {
                None
            },
            extinction: survivors == 0,
        }
    }

    /// Score the finished generation, evolve the next one, and re-place it
    /// on the world. The grid keeps its shape and remaining resources;
    /// occupancy is rebuilt from scratch and the graveyard is emptied.
    pub fn advance_generation(&mut self) -> Result<(), SimError> {
        let children = self.evolve_current_generation()?;

        self.world.clear_occupants();
        self.animals.clear();
        self.graveyard.clear();
        self.week = 0;
        self.generation += 1;

        let mut open_positions = self.world.passable_positions();
        open_positions.shuffle(&mut self.rng);
        if open_positions.len() < children.len() {
            warn!(
                "generation {}: only {} open tiles for {} animals; extras are not placed",
                self.generation,
                open_positions.len(),
                children.len()
            );
        }

        for mut child in children {
            let Some((x, y)) = open_positions.pop() else {
                break;
            };
            child.location = (x, y);
            self.register_animal(child)?;
        }

        self.debug_assert_consistent_state();
        Ok(())
    }

    /// Drive the configured number of generations, evolving between them.
    pub fn run(&mut self) -> Result<Vec<GenerationSummary>, SimError> {
        let generations = self.config.max_generations;
        let mut summaries = Vec::with_capacity(generations as usize);
        for remaining in (0..generations).rev() {
            summaries.push(self.run_generation());
            if remaining > 0 {
                self.advance_generation()?;
            }
        }
        Ok(summaries)
    }
}
