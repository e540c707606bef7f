use crate::brain::DecisionNetwork;
use evosim_config::{SimulationConfig, TraitConfig};
use evosim_types::{AnimalCategory, AnimalId, Effect, EffectKind, FitnessComponents, TraitId};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const HUNGER_MAX: f32 = 100.0;
pub const THIRST_MAX: f32 = 100.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TraitBlock {
    pub strength: i32,
    pub agility: i32,
    pub intelligence: i32,
    pub endurance: i32,
    pub perception: i32,
}

impl TraitBlock {
    pub fn uniform(value: i32) -> Self {
        Self {
            strength: value,
            agility: value,
            intelligence: value,
            endurance: value,
            perception: value,
        }
    }

    pub fn get(&self, id: TraitId) -> i32 {
        match id {
            TraitId::Strength => self.strength,
            TraitId::Agility => self.agility,
            TraitId::Intelligence => self.intelligence,
            TraitId::Endurance => self.endurance,
            TraitId::Perception => self.perception,
        }
    }

    pub fn set(&mut self, id: TraitId, value: i32) {
        match id {
            TraitId::Strength => self.strength = value,
            TraitId::Agility => self.agility = value,
            TraitId::Intelligence => self.intelligence = value,
            TraitId::Endurance => self.endurance = value,
            TraitId::Perception => self.perception = value,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct StatusBlock {
    pub health: f32,
    pub hunger: f32,
    pub thirst: f32,
    pub energy: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Animal {
    pub id: AnimalId,
    pub category: AnimalCategory,
    pub location: (i32, i32),
    pub traits: TraitBlock,
    pub status: StatusBlock,
    pub effects: Vec<Effect>,
    pub fitness: FitnessComponents,
    pub brain: DecisionNetwork,
}

impl Animal {
    pub fn is_alive(&self) -> bool {
        self.status.health > 0.0
    }

    pub fn max_health(&self, traits_config: &TraitConfig) -> f32 {
        (traits_config.base_health + self.traits.endurance * traits_config.health_per_endurance)
            as f32
    }

    pub fn max_energy(&self, traits_config: &TraitConfig) -> f32 {
        (traits_config.base_energy + self.traits.endurance * traits_config.energy_per_endurance)
            as f32
    }

    /// Base trait plus the sum of active effect modifiers, floored at 1.
    pub fn effective_trait(&self, id: TraitId) -> i32 {
        let mut value = self.traits.get(id);
        for effect in &self.effects {
            for &(modified, delta) in &effect.modifiers {
                if modified == id {
                    value += delta;
                }
            }
        }
        value.max(1)
    }

    pub fn has_effect(&self, kind: EffectKind) -> bool {
        self.effects.iter().any(|effect| effect.kind == kind)
    }
}

/// Roll a fresh animal: the category's primary trait from the primary
/// range, everything else from the standard range, full status, and a
/// randomly initialized brain. The location is a placeholder until the
/// animal is placed on a tile.
pub fn create_random_animal<R: Rng + ?Sized>(
    id: AnimalId,
    category: AnimalCategory,
    config: &SimulationConfig,
    rng: &mut R,
) -> Animal {
    let primary = category.primary_trait();
    let mut traits = TraitBlock::uniform(config.traits.standard_min);
    for trait_id in TraitId::ALL {
        let value = if trait_id == primary {
            rng.random_range(config.traits.primary_min..=config.traits.primary_max)
        } else {
            rng.random_range(config.traits.standard_min..=config.traits.standard_max)
        };
        traits.set(trait_id, value);
    }

    let mut animal = Animal {
        id,
        category,
        location: (0, 0),
        traits,
        status: StatusBlock {
            health: 0.0,
            hunger: HUNGER_MAX,
            thirst: THIRST_MAX,
            energy: 0.0,
        },
        effects: Vec::new(),
        fitness: FitnessComponents::default(),
        brain: DecisionNetwork::random(&config.network, rng),
    };
    animal.status.health = animal.max_health(&config.traits);
    animal.status.energy = animal.max_energy(&config.traits);
    animal
}
