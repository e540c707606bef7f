use super::support::*;
use evosim_types::{Action, AnimalId, Direction, Resource, ResourceKind};

#[test]
fn a_clean_week_completes_all_four_phases() {
    let config = test_config();
    let mut sim = build_sim(
        config.clone(),
        vec![
            make_animal(&config, 0, 1, 1, Action::Rest),
            make_animal(&config, 1, 4, 4, Action::Move(Direction::East)),
        ],
        7,
    );

    let report = sim.resolve_week();

    assert!(report.succeeded());
    assert_eq!(report.phases_completed, 4);
    assert_eq!(report.week, 1);
    assert_eq!(report.actions_processed, 2);
    assert!(report.decision.is_some());
    assert!(report.status.is_some());
    assert!(report.execution.is_some());
    assert!(report.cleanup.is_some());
    assert!(report.error.is_none());
    assert_eq!(sim.week(), 1);
}

#[test]
fn casualty_count_equals_population_delta() {
    let config = test_config();
    let mut doomed = make_animal(&config, 0, 1, 1, Action::Rest);
    doomed.status.thirst = 1.0;
    doomed.status.health = 4.0;
    let mut sim = build_sim(
        config.clone(),
        vec![doomed, make_animal(&config, 1, 4, 4, Action::Rest)],
        7,
    );

    let before = sim.living_count();
    let report = sim.resolve_week();

    assert!(report.succeeded());
    assert_eq!(report.casualties.len(), before - sim.living_count());
    assert_eq!(report.casualties.len(), 1);
    assert_eq!(report.casualties[0].animal, AnimalId(0));
}

#[test]
fn animals_dead_after_status_never_act() {
    let config = test_config();
    // This animal would eat, but it dies of dehydration first.
    let mut doomed = make_animal(&config, 0, 1, 1, Action::Eat);
    doomed.status.thirst = 0.0;
    doomed.status.health = 5.0;
    let mut sim = build_sim(config.clone(), vec![doomed], 7);
    sim.world.tile_mut(1, 1).expect("tile in bounds").resource =
        Some(Resource::new(ResourceKind::Plant, 40, 1));

    let report = sim.resolve_week();

    assert!(report.succeeded());
    let execution = report.execution.expect("execution phase ran");
    assert_eq!(execution.actions_executed + execution.actions_failed, 0);
    // The corpse never drew from the tile.
    let tile = sim.world().tile(1, 1).expect("tile in bounds");
    assert_eq!(
        tile.resource.as_ref().map(|resource| resource.uses_left),
        Some(1)
    );
}

#[test]
fn conflicting_moves_surface_in_the_week_report() {
    // 3x3 world, both animals converging on the free center cell.
    let mut config = test_config();
    config.world_width = 3;
    config.world_height = 3;
    let mut fast = make_animal(&config, 0, 0, 1, Action::Move(Direction::East));
    fast.traits.agility = 60;
    let mut slow = make_animal(&config, 1, 2, 1, Action::Move(Direction::West));
    slow.traits.agility = 50;
    let mut sim = build_sim(config, vec![fast, slow], 7);

    let report = sim.resolve_week();

    assert!(report.succeeded());
    assert_eq!(report.conflicts_resolved, 1);
    assert_eq!(animal_location(&sim, 0), (1, 1));
    assert_eq!(animal_location(&sim, 1), (2, 1));
}

#[test]
fn ten_resting_weeks_accrue_exactly_ten_time_fitness() {
    let config = test_config();
    let mut sim = build_sim(
        config.clone(),
        vec![make_animal(&config, 0, 2, 2, Action::Rest)],
        7,
    );
    sim.world.tile_mut(2, 2).expect("tile in bounds").resource =
        Some(Resource::new(ResourceKind::Plant, 40, 10));

    for _ in 0..10 {
        let report = sim.resolve_week();
        assert!(report.succeeded());
        assert_eq!(report.phases_completed, 4);
    }

    let animal = sim.animal(AnimalId(0)).expect("animal survives ten weeks");
    assert_eq!(animal.fitness.time, 10.0);
    assert_eq!(sim.week(), 10);
}
