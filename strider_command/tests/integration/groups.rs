//! Sequential and parallel groups driven by the scheduler.

use strider_command::{ConfigError, ParallelGroup, Requirements, SequentialGroup};

use super::support::{Recorder, log, scheduler_with, take};

#[test]
fn sequential_children_hand_over_on_the_next_tick() {
    let (mut scheduler, _) = scheduler_with(&[]);
    let log = log();

    let group = SequentialGroup::new(vec![
        Recorder::new("A", Some(2), &log).boxed(),
        Recorder::new("B", Some(1), &log).boxed(),
        Recorder::new("C", Some(1), &log).boxed(),
    ]);
    let (id, _) = scheduler.schedule(Box::new(group)).unwrap();

    scheduler.run();
    scheduler.run();
    assert_eq!(take(&log), vec!["A.init", "A.exec", "A.exec"]);

    scheduler.run();
    assert_eq!(take(&log), vec!["A.end(false)", "B.init", "B.exec"]);

    // C finishes on tick 4.
    scheduler.run();
    assert_eq!(take(&log), vec!["B.end(false)", "C.init", "C.exec"]);
    assert!(scheduler.is_scheduled(id));

    scheduler.run();
    assert_eq!(take(&log), vec!["C.end(false)"]);
    assert!(!scheduler.is_scheduled(id));
}

#[test]
fn parallel_children_finish_independently() {
    let (mut scheduler, _) = scheduler_with(&[]);
    let log = log();

    let group = ParallelGroup::new(vec![
        Recorder::new("A", Some(3), &log).boxed(),
        Recorder::new("B", Some(5), &log).boxed(),
    ])
    .unwrap();
    let (id, _) = scheduler.schedule(Box::new(group)).unwrap();

    for _ in 0..3 {
        scheduler.run();
    }
    assert!(take(&log).iter().any(|e| e == "A.end(false)"));

    scheduler.run();
    assert_eq!(take(&log), vec!["B.exec"]);
    assert!(scheduler.is_scheduled(id));

    scheduler.run();
    assert_eq!(take(&log), vec!["B.exec", "B.end(false)"]);
    assert!(!scheduler.is_scheduled(id));
}

#[test]
fn overlapping_parallel_children_are_rejected() {
    let (_, ids) = scheduler_with(&["drivetrain"]);
    let log = log();

    let result = ParallelGroup::new(vec![
        Recorder::new("AutoDrive", None, &log).requiring(Requirements::of(ids[0])).boxed(),
        Recorder::new("AutoTurn", None, &log).requiring(Requirements::of(ids[0])).boxed(),
    ]);
    assert!(matches!(
        result,
        Err(ConfigError::OverlappingRequirements { .. })
    ));
}

#[test]
fn empty_groups_finish_on_first_tick() {
    let (mut scheduler, _) = scheduler_with(&[]);

    let (seq, _) = scheduler.schedule(Box::new(SequentialGroup::new(Vec::new()))).unwrap();
    let (par, _) = scheduler
        .schedule(Box::new(ParallelGroup::new(Vec::new()).unwrap()))
        .unwrap();
    scheduler.run();

    assert!(!scheduler.is_scheduled(seq));
    assert!(!scheduler.is_scheduled(par));
}

#[test]
fn group_holds_union_of_child_requirements_for_its_whole_run() {
    let (mut scheduler, ids) = scheduler_with(&["shooter", "drivetrain"]);
    let (shooter, drive) = (ids[0], ids[1]);
    let log = log();

    scheduler
        .register_default_command(
            drive,
            Recorder::new("Drive", None, &log).requiring(Requirements::of(drive)).boxed(),
        )
        .unwrap();

    let group = SequentialGroup::new(vec![
        Recorder::new("AutoShoot", Some(2), &log).requiring(Requirements::of(shooter)).boxed(),
        Recorder::new("AutoDrive", Some(1), &log).requiring(Requirements::of(drive)).boxed(),
    ]);
    let (id, _) = scheduler.schedule(Box::new(group)).unwrap();
    assert_eq!(scheduler.claimant(shooter), Some(id));
    assert_eq!(scheduler.claimant(drive), Some(id));

    for _ in 0..4 {
        scheduler.run();
    }
    let entries = take(&log);
    assert!(!entries.iter().any(|e| e.starts_with("Drive.")));
    assert_eq!(entries.last().map(String::as_str), Some("AutoDrive.end(false)"));

    scheduler.run();
    assert_eq!(take(&log), vec!["Drive.init", "Drive.exec"]);
}

#[test]
fn preempting_a_sequence_interrupts_only_the_active_child() {
    let (mut scheduler, ids) = scheduler_with(&["drivetrain"]);
    let drive = ids[0];
    let log = log();

    let group = SequentialGroup::new(vec![
        Recorder::new("A", Some(1), &log).requiring(Requirements::of(drive)).boxed(),
        Recorder::new("B", None, &log).requiring(Requirements::of(drive)).boxed(),
        Recorder::new("C", None, &log).requiring(Requirements::of(drive)).boxed(),
    ]);
    scheduler.schedule(Box::new(group)).unwrap();
    scheduler.run();
    scheduler.run();
    take(&log);

    scheduler
        .schedule(Recorder::new("Manual", None, &log).requiring(Requirements::of(drive)).boxed())
        .unwrap();
    assert_eq!(take(&log), vec!["B.end(true)"]);
}

#[test]
fn nested_parallel_is_opaque_to_its_sequence() {
    let (mut scheduler, _) = scheduler_with(&[]);
    let log = log();

    let inner = ParallelGroup::new(vec![
        Recorder::new("A", Some(1), &log).boxed(),
        Recorder::new("B", Some(2), &log).boxed(),
    ])
    .unwrap();
    let group = SequentialGroup::new(vec![
        Box::new(inner),
        Recorder::new("C", Some(1), &log).boxed(),
    ]);
    let (id, _) = scheduler.schedule(Box::new(group)).unwrap();

    scheduler.run();
    assert_eq!(take(&log), vec!["A.init", "B.init", "A.exec", "A.end(false)", "B.exec"]);
    scheduler.run();
    assert_eq!(take(&log), vec!["B.exec", "B.end(false)"]);
    scheduler.run();
    assert_eq!(take(&log), vec!["C.init", "C.exec"]);
    scheduler.run();
    assert_eq!(take(&log), vec!["C.end(false)"]);
    assert!(!scheduler.is_scheduled(id));
}
