use super::support::*;
use evosim_types::{Action, AnimalId};

#[test]
fn generation_ends_early_with_a_single_survivor() {
    let config = test_config();
    let survivor = make_animal(&config, 0, 1, 1, Action::Rest);
    let mut doomed = make_animal(&config, 1, 4, 4, Action::Rest);
    doomed.status.thirst = 1.0;
    doomed.status.health = 4.0;
    let mut sim = build_sim(config, vec![survivor, doomed], 7);

    let summary = sim.run_generation();

    assert_eq!(summary.generation, 0);
    assert_eq!(summary.weeks_completed, 1);
    assert_eq!(summary.survivors, 1);
    assert_eq!(summary.casualties, 1);
    assert_eq!(summary.winner, Some(AnimalId(0)));
    assert!(!summary.extinction);
}

#[test]
fn generation_runs_to_the_week_limit_otherwise() {
    let mut config = test_config();
    config.max_weeks = 3;
    let mut sim = build_sim(
        config.clone(),
        vec![
            make_animal(&config, 0, 1, 1, Action::Rest),
            make_animal(&config, 1, 4, 4, Action::Rest),
        ],
        7,
    );

    let summary = sim.run_generation();

    assert_eq!(summary.weeks_completed, 3);
    assert_eq!(summary.survivors, 2);
    assert_eq!(summary.winner, None);
    assert!(!summary.extinction);
}

#[test]
fn extinction_is_reported_as_such() {
    let config = test_config();
    let mut first = make_animal(&config, 0, 1, 1, Action::Rest);
    first.status.thirst = 1.0;
    first.status.health = 4.0;
    let mut second = make_animal(&config, 1, 4, 4, Action::Rest);
    second.status.thirst = 1.0;
    second.status.health = 4.0;
    let mut sim = build_sim(config, vec![first, second], 7);

    let summary = sim.run_generation();

    assert_eq!(summary.survivors, 0);
    assert!(summary.extinction);
    assert_eq!(summary.winner, None);
    assert_eq!(sim.graveyard().len(), 2);
}

#[test]
fn advancing_a_generation_evolves_and_places_a_fresh_population() {
    let config = test_config();
    let mut sim = build_sim(
        config.clone(),
        vec![
            make_animal(&config, 0, 1, 1, Action::Rest),
            make_animal(&config, 1, 4, 4, Action::Rest),
        ],
        7,
    );
    sim.run_generation();

    sim.advance_generation().expect("advance should succeed");

    assert_eq!(sim.generation(), 1);
    assert_eq!(sim.week(), 0);
    assert_eq!(sim.living_count(), 2);
    assert!(sim.graveyard().is_empty());
    // Children got fresh ids and valid, mutually consistent placements.
    for animal in sim.animals() {
        assert!(animal.id.0 >= 2);
        let (x, y) = animal.location;
        assert_eq!(sim.world().occupant_at(x, y), Some(animal.id));
    }
}

#[test]
fn evolution_pool_includes_the_graveyard() {
    let config = test_config();
    let survivor = make_animal(&config, 0, 1, 1, Action::Rest);
    let mut doomed = make_animal(&config, 1, 4, 4, Action::Rest);
    doomed.status.thirst = 1.0;
    doomed.status.health = 4.0;
    let mut sim = build_sim(config, vec![survivor, doomed], 7);
    sim.run_generation();
    assert_eq!(sim.living_count(), 1);

    sim.advance_generation().expect("advance should succeed");

    // Next generation is sized like the full scored pool, not just the
    // survivors.
    assert_eq!(sim.living_count(), 2);
}

#[test]
fn run_drives_the_configured_number_of_generations() {
    let mut config = test_config();
    config.max_weeks = 2;
    config.max_generations = 3;
    let mut sim = build_sim(
        config.clone(),
        vec![
            make_animal(&config, 0, 1, 1, Action::Rest),
            make_animal(&config, 1, 4, 4, Action::Rest),
        ],
        7,
    );

    let summaries = sim.run().expect("run should succeed");

    assert_eq!(summaries.len(), 3);
    assert_eq!(
        summaries.iter().map(|s| s.generation).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
    assert_eq!(sim.generation(), 2);
}
