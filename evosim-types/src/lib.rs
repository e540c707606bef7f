use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimalId(pub u64);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AnimalCategory {
    Herbivore,
    Carnivore,
    Omnivore,
}

impl AnimalCategory {
    pub const ALL: [AnimalCategory; 3] = [
        AnimalCategory::Herbivore,
        AnimalCategory::Carnivore,
        AnimalCategory::Omnivore,
    ];

    /// The trait rolled in the primary range when animals of this category
    /// are created; it is also the trait floored by category minimums.
    pub fn primary_trait(self) -> TraitId {
        match self {
            AnimalCategory::Herbivore => TraitId::Agility,
            AnimalCategory::Carnivore => TraitId::Strength,
            AnimalCategory::Omnivore => TraitId::Endurance,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TerrainType {
    Plains,
    Forest,
    Jungle,
    Water,
    Swamp,
    Mountains,
}

impl TerrainType {
    pub const ALL: [TerrainType; 6] = [
        TerrainType::Plains,
        TerrainType::Forest,
        TerrainType::Jungle,
        TerrainType::Water,
        TerrainType::Swamp,
        TerrainType::Mountains,
    ];

    /// Movement cost multiplier, `None` for impassable terrain.
    pub fn movement_cost(self) -> Option<f32> {
        match self {
            TerrainType::Plains => Some(1.0),
            TerrainType::Forest => Some(1.5),
            TerrainType::Swamp => Some(1.8),
            TerrainType::Jungle => Some(2.0),
            TerrainType::Water | TerrainType::Mountains => None,
        }
    }

    pub fn is_passable(self) -> bool {
        self.movement_cost().is_some()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Plant,
    Prey,
    Water,
    Carcass,
}

impl ResourceKind {
    pub fn is_food(self) -> bool {
        !matches!(self, ResourceKind::Water)
    }

    /// Dietary rules: herbivores graze, carnivores hunt and scavenge,
    /// omnivores take anything edible.
    pub fn edible_by(self, category: AnimalCategory) -> bool {
        match category {
            AnimalCategory::Herbivore => matches!(self, ResourceKind::Plant),
            AnimalCategory::Carnivore => {
                matches!(self, ResourceKind::Prey | ResourceKind::Carcass)
            }
            AnimalCategory::Omnivore => self.is_food(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Resource {
    pub kind: ResourceKind,
    /// Amount gained per use.
    pub quantity: u32,
    pub uses_left: u32,
}

impl Resource {
    pub fn new(kind: ResourceKind, quantity: u32, uses_left: u32) -> Self {
        Self {
            kind,
            quantity,
            uses_left,
        }
    }

    /// Consume one use and return the quantity gained. A depleted resource
    /// yields zero and `uses_left` never goes negative.
    pub fn consume(&mut self) -> u32 {
        if self.uses_left == 0 {
            return 0;
        }
        self.uses_left -= 1;
        self.quantity
    }

    pub fn is_depleted(&self) -> bool {
        self.uses_left == 0
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TraitId {
    Strength,
    Agility,
    Intelligence,
    Endurance,
    Perception,
}

impl TraitId {
    pub const ALL: [TraitId; 5] = [
        TraitId::Strength,
        TraitId::Agility,
        TraitId::Intelligence,
        TraitId::Endurance,
        TraitId::Perception,
    ];
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EffectKind {
    WellFed,
    Hydrated,
    Rested,
    AdrenalineRush,
    Injured,
    Poisoned,
    Exhausted,
    Sick,
}

impl EffectKind {
    pub fn is_buff(self) -> bool {
        matches!(
            self,
            EffectKind::WellFed
                | EffectKind::Hydrated
                | EffectKind::Rested
                | EffectKind::AdrenalineRush
        )
    }

    /// Additive trait modifiers applied while the effect is active.
    /// Poisoned/Exhausted/Rested act through status dynamics instead.
    pub fn modifiers(self) -> &'static [(TraitId, i32)] {
        match self {
            EffectKind::WellFed => &[(TraitId::Strength, 1), (TraitId::Endurance, 1)],
            EffectKind::Hydrated => &[(TraitId::Agility, 1)],
            EffectKind::AdrenalineRush => &[(TraitId::Strength, 2), (TraitId::Agility, 2)],
            EffectKind::Injured => &[(TraitId::Agility, -2)],
            EffectKind::Sick => &[
                (TraitId::Strength, -1),
                (TraitId::Agility, -1),
                (TraitId::Intelligence, -1),
                (TraitId::Endurance, -1),
                (TraitId::Perception, -1),
            ],
            EffectKind::Rested | EffectKind::Poisoned | EffectKind::Exhausted => &[],
        }
    }
}

/// A timed buff or debuff. Created with the kind's standard modifier table,
/// or with custom modifiers for externally triggered effects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Effect {
    pub kind: EffectKind,
    pub remaining: u32,
    pub modifiers: Vec<(TraitId, i32)>,
}

impl Effect {
    pub fn new(kind: EffectKind, duration: u32) -> Self {
        Self {
            kind,
            remaining: duration,
            modifiers: kind.modifiers().to_vec(),
        }
    }

    pub fn with_modifiers(kind: EffectKind, duration: u32, modifiers: Vec<(TraitId, i32)>) -> Self {
        Self {
            kind,
            remaining: duration,
            modifiers,
        }
    }

    /// Decrement the remaining duration. Ticking an expired effect is a
    /// no-op: the duration never goes negative and never un-expires.
    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Action {
    Move(Direction),
    Rest,
    Eat,
    Drink,
    Attack,
}

impl Action {
    /// Network output order: the softmax head indexes into this table.
    pub const ALL: [Action; 8] = [
        Action::Move(Direction::North),
        Action::Move(Direction::East),
        Action::Move(Direction::South),
        Action::Move(Direction::West),
        Action::Rest,
        Action::Eat,
        Action::Drink,
        Action::Attack,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn from_index(index: usize) -> Option<Action> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            Action::Move(Direction::North) => 0,
            Action::Move(Direction::East) => 1,
            Action::Move(Direction::South) => 2,
            Action::Move(Direction::West) => 3,
            Action::Rest => 4,
            Action::Eat => 5,
            Action::Drink => 6,
            Action::Attack => 7,
        }
    }

    pub fn is_movement(self) -> bool {
        matches!(self, Action::Move(_))
    }
}

/// One animal's intent for the week, produced by the decision phase and
/// consumed unchanged by the execution phase.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlannedAction {
    pub animal: AnimalId,
    pub action: Action,
    /// Destination cell for movement; the animal's own cell otherwise.
    pub target: (i32, i32),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DeathCause {
    Starvation,
    Dehydration,
    Attrition,
    Combat,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Casualty {
    pub animal: AnimalId,
    pub cause: DeathCause,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DecisionReport {
    pub actions_collected: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StatusReport {
    pub animals_processed: u32,
    pub hunger_depletions: u32,
    pub thirst_depletions: u32,
    pub energy_regenerations: u32,
    pub health_losses: u32,
    pub casualties: Vec<Casualty>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionOutcome {
    pub animal: AnimalId,
    pub action: Action,
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ExecutionReport {
    pub actions_executed: u32,
    pub actions_failed: u32,
    pub movement_conflicts: u32,
    pub combat_encounters: u32,
    pub outcomes: Vec<ActionOutcome>,
    pub casualties: Vec<Casualty>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CleanupReport {
    pub animals_processed: u32,
    pub effects_added: u32,
    pub effects_removed: u32,
    pub effects_updated: u32,
}

/// Aggregate result of one week's four-phase resolution. A sub-report is
/// `None` when its phase never ran; `error` carries the message of the
/// phase that aborted the week.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct WeekReport {
    pub week: u64,
    pub phases_completed: u8,
    pub actions_processed: u32,
    pub conflicts_resolved: u32,
    pub casualties: Vec<Casualty>,
    pub decision: Option<DecisionReport>,
    pub status: Option<StatusReport>,
    pub execution: Option<ExecutionReport>,
    pub cleanup: Option<CleanupReport>,
    pub error: Option<String>,
}

impl WeekReport {
    pub fn succeeded(&self) -> bool {
        self.phases_completed == 4
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationSummary {
    pub generation: u32,
    pub weeks_completed: u32,
    pub survivors: u32,
    pub casualties: u32,
    pub winner: Option<AnimalId>,
    pub extinction: bool,
}

/// Additive fitness accumulators. Components only ever grow; the weighted
/// scalar score is computed by the core from these at any time, alive or
/// post-mortem.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct FitnessComponents {
    pub time: f64,
    pub resource: f64,
    pub kill: f64,
    pub distance: f64,
    pub event: f64,
}

impl FitnessComponents {
    pub fn add_time(&mut self, weeks: f64) {
        self.time += weeks;
    }

    pub fn add_resource(&mut self, units: f64) {
        self.resource += units;
    }

    pub fn add_kill(&mut self, count: f64) {
        self.kill += count;
    }

    pub fn add_distance(&mut self, tiles: f64) {
        self.distance += tiles;
    }

    pub fn add_event(&mut self, count: f64) {
        self.event += count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_index_round_trips() {
        for (idx, action) in Action::ALL.into_iter().enumerate() {
            assert_eq!(action.index(), idx);
            assert_eq!(Action::from_index(idx), Some(action));
        }
        assert_eq!(Action::from_index(Action::COUNT), None);
    }

    #[test]
    fn depleted_resource_yields_zero_and_stays_at_zero() {
        let mut resource = Resource::new(ResourceKind::Plant, 40, 1);
        assert_eq!(resource.consume(), 40);
        assert!(resource.is_depleted());
        assert_eq!(resource.consume(), 0);
        assert_eq!(resource.uses_left, 0);
    }

    #[test]
    fn effect_tick_expires_without_underflow() {
        let mut effect = Effect::new(EffectKind::WellFed, 1);
        assert!(!effect.is_expired());
        effect.tick();
        assert!(effect.is_expired());
        effect.tick();
        assert!(effect.is_expired());
        assert_eq!(effect.remaining, 0);
    }

    #[test]
    fn dietary_rules_match_categories() {
        assert!(ResourceKind::Plant.edible_by(AnimalCategory::Herbivore));
        assert!(!ResourceKind::Prey.edible_by(AnimalCategory::Herbivore));
        assert!(ResourceKind::Carcass.edible_by(AnimalCategory::Carnivore));
        assert!(!ResourceKind::Plant.edible_by(AnimalCategory::Carnivore));
        assert!(ResourceKind::Prey.edible_by(AnimalCategory::Omnivore));
        assert!(!ResourceKind::Water.edible_by(AnimalCategory::Omnivore));
    }

    #[test]
    fn impassable_terrain_has_no_movement_cost() {
        for terrain in TerrainType::ALL {
            match terrain {
                TerrainType::Water | TerrainType::Mountains => {
                    assert!(terrain.movement_cost().is_none());
                }
                _ => {
                    let cost = terrain.movement_cost().expect("passable terrain has a cost");
                    assert!(cost >= 1.0);
                }
            }
        }
    }

    #[test]
    fn report_serialization_round_trips() {
        let report = WeekReport {
            week: 3,
            phases_completed: 4,
            actions_processed: 5,
            conflicts_resolved: 1,
            casualties: vec![Casualty {
                animal: AnimalId(7),
                cause: DeathCause::Dehydration,
            }],
            decision: Some(DecisionReport {
                actions_collected: 5,
            }),
            status: Some(StatusReport::default()),
            execution: Some(ExecutionReport::default()),
            cleanup: Some(CleanupReport::default()),
            error: None,
        };
        let json = serde_json::to_string(&report).expect("serialize week report");
        let parsed: WeekReport = serde_json::from_str(&json).expect("deserialize week report");
        assert_eq!(parsed, report);
        assert!(parsed.succeeded());
    }
}
