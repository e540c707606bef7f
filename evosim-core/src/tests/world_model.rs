use super::support::*;
use crate::world::World;
use evosim_types::{AnimalId, Effect, EffectKind, Resource, ResourceKind, TerrainType, TraitId};

#[test]
fn occupied_tile_is_not_passable() {
    let config = test_config();
    let mut world = make_world(&config);
    assert!(world.tile(2, 2).expect("tile in bounds").is_passable());

    world.tile_mut(2, 2).expect("tile in bounds").occupant = Some(AnimalId(9));
    assert!(!world.tile(2, 2).expect("tile in bounds").is_passable());
    assert_eq!(world.occupant_at(2, 2), Some(AnimalId(9)));
}

#[test]
fn impassable_terrain_blocks_regardless_of_occupancy() {
    let config = test_config();
    let mut world = make_world(&config);
    world.tile_mut(1, 1).expect("tile in bounds").terrain = TerrainType::Mountains;
    world.tile_mut(1, 2).expect("tile in bounds").terrain = TerrainType::Water;

    assert!(!world.tile(1, 1).expect("tile in bounds").is_passable());
    assert!(!world.tile(1, 2).expect("tile in bounds").is_passable());
    assert_eq!(world.tile(1, 1).expect("tile in bounds").movement_cost(), None);
}

#[test]
fn adjacency_is_in_bounds_and_ordered() {
    let config = test_config();
    let world = make_world(&config);

    // Corner: only east and south neighbors survive the bounds filter.
    assert_eq!(world.adjacent(0, 0), vec![(1, 0), (0, 1)]);
    // Interior: fixed N/E/S/W order.
    assert_eq!(
        world.adjacent(2, 2),
        vec![(2, 1), (3, 2), (2, 3), (1, 2)]
    );
}

#[test]
fn passable_positions_exclude_blocked_tiles() {
    let mut world = World::new(2, 2, TerrainType::Plains);
    world.tile_mut(0, 0).expect("tile in bounds").terrain = TerrainType::Mountains;
    world.tile_mut(1, 0).expect("tile in bounds").occupant = Some(AnimalId(1));

    assert_eq!(world.passable_positions(), vec![(0, 1), (1, 1)]);
}

#[test]
fn adjacent_terrain_lookup_finds_water() {
    let config = test_config();
    let mut world = make_world(&config);
    world.tile_mut(3, 2).expect("tile in bounds").terrain = TerrainType::Water;

    assert!(world.has_adjacent_terrain(2, 2, TerrainType::Water));
    assert!(!world.has_adjacent_terrain(0, 0, TerrainType::Water));
}

#[test]
fn effective_trait_sums_modifiers_with_floor() {
    let config = test_config();
    let mut animal = make_animal(&config, 0, 0, 0, evosim_types::Action::Rest);

    assert_eq!(animal.effective_trait(TraitId::Agility), 5);

    animal.effects.push(Effect::new(EffectKind::Hydrated, 3));
    assert_eq!(animal.effective_trait(TraitId::Agility), 6);

    animal.effects.push(Effect::new(EffectKind::Injured, 5));
    animal.effects.push(Effect::new(EffectKind::Injured, 5));
    // 5 + 1 - 2 - 2 = 2
    assert_eq!(animal.effective_trait(TraitId::Agility), 2);

    animal.effects.push(Effect::new(EffectKind::Injured, 5));
    animal.effects.push(Effect::new(EffectKind::Injured, 5));
    // Would be negative; floored at 1.
    assert_eq!(animal.effective_trait(TraitId::Agility), 1);
}

#[test]
fn status_caps_derive_from_endurance() {
    let config = test_config();
    let mut animal = make_animal(&config, 0, 0, 0, evosim_types::Action::Rest);
    animal.traits.endurance = 8;

    assert_eq!(animal.max_health(&config.traits), 180.0);
    assert_eq!(animal.max_energy(&config.traits), 140.0);
}

#[test]
fn depleted_resource_is_inert() {
    let mut resource = Resource::new(ResourceKind::Prey, 50, 2);
    assert_eq!(resource.consume(), 50);
    assert_eq!(resource.consume(), 50);
    assert!(resource.is_depleted());
    assert_eq!(resource.consume(), 0);
    assert_eq!(resource.uses_left, 0);
}
