//! Lifecycle call order and default-command backfill.

use strider_command::{CommandState, InstantCommand, Requirements, Trigger};

use super::support::{Button, Recorder, log, scheduler_with, take};

#[test]
fn natural_finish_calls_each_phase_once() {
    let (mut scheduler, _) = scheduler_with(&[]);
    let log = log();

    let (id, _) = scheduler.schedule(Recorder::new("X", Some(3), &log).boxed()).unwrap();
    for _ in 0..5 {
        scheduler.run();
    }

    assert_eq!(
        take(&log),
        vec!["X.init", "X.exec", "X.exec", "X.exec", "X.end(false)"]
    );
    assert_eq!(scheduler.state(id), None);
}

#[test]
fn state_follows_lifecycle() {
    let (mut scheduler, _) = scheduler_with(&[]);
    let log = log();

    let id = scheduler.register(Recorder::new("X", Some(2), &log).boxed()).unwrap();
    assert_eq!(scheduler.state(id), None);

    scheduler.schedule_registered(id).unwrap();
    assert_eq!(scheduler.state(id), Some(CommandState::Pending));
    scheduler.run();
    assert_eq!(scheduler.state(id), Some(CommandState::Running));
    scheduler.run();
    assert_eq!(scheduler.state(id), Some(CommandState::Finished));
}

#[test]
fn instant_command_completes_in_one_tick() {
    let (mut scheduler, _) = scheduler_with(&[]);
    let log = log();
    let fired = log.clone();

    scheduler
        .schedule(Box::new(InstantCommand::new("Reset", move || {
            fired.lock().push("Reset.action".into());
        })))
        .unwrap();
    scheduler.run();

    assert_eq!(take(&log), vec!["Reset.action"]);
    assert!(scheduler.scheduled().is_empty());
}

#[test]
fn registered_command_reinitializes_each_episode() {
    let (mut scheduler, _) = scheduler_with(&[]);
    let log = log();
    let id = scheduler.register(Recorder::new("X", Some(1), &log).boxed()).unwrap();

    for _ in 0..2 {
        scheduler.schedule_registered(id).unwrap();
        scheduler.run();
    }

    assert_eq!(
        take(&log),
        vec!["X.init", "X.exec", "X.end(false)", "X.init", "X.exec", "X.end(false)"]
    );
}

#[test]
fn unrelated_commands_execute_in_admission_order() {
    let (mut scheduler, ids) = scheduler_with(&["drivetrain", "collector"]);
    let log = log();

    scheduler
        .schedule(Recorder::new("B", None, &log).requiring(Requirements::of(ids[1])).boxed())
        .unwrap();
    scheduler
        .schedule(Recorder::new("A", None, &log).requiring(Requirements::of(ids[0])).boxed())
        .unwrap();
    scheduler.run();
    scheduler.run();

    assert_eq!(
        take(&log),
        vec!["B.init", "B.exec", "A.init", "A.exec", "B.exec", "A.exec"]
    );
}

#[test]
fn default_runs_until_claimed_and_returns_after() {
    let (mut scheduler, ids) = scheduler_with(&["collector"]);
    let collector = ids[0];
    let log = log();

    let default = scheduler
        .register_default_command(
            collector,
            Recorder::new("D", None, &log).requiring(Requirements::of(collector)).boxed(),
        )
        .unwrap();

    for _ in 0..3 {
        scheduler.run();
        assert!(scheduler.is_scheduled(default));
        assert_eq!(scheduler.claimant(collector), Some(default));
    }
    assert_eq!(take(&log), vec!["D.init", "D.exec", "D.exec", "D.exec"]);

    let (y, _) = scheduler
        .schedule(Recorder::new("Y", Some(2), &log).requiring(Requirements::of(collector)).boxed())
        .unwrap();
    assert_eq!(take(&log), vec!["D.end(true)"]);
    assert_eq!(scheduler.claimant(collector), Some(y));

    scheduler.run();
    scheduler.run();
    assert_eq!(take(&log), vec!["Y.init", "Y.exec", "Y.exec", "Y.end(false)"]);
    assert!(!scheduler.is_scheduled(default));
    assert_eq!(scheduler.claimant(collector), None);

    scheduler.run();
    assert_eq!(take(&log), vec!["D.init", "D.exec"]);
}

#[test]
fn trigger_preempts_default_within_the_same_tick() {
    let (mut scheduler, ids) = scheduler_with(&["shooter"]);
    let shooter = ids[0];
    let log = log();
    let button = Button::default();

    scheduler
        .register_default_command(
            shooter,
            Recorder::new("Idle", None, &log).requiring(Requirements::of(shooter)).boxed(),
        )
        .unwrap();
    let fire = scheduler
        .bind_new(
            Trigger::new(button.supplier()),
            Recorder::new("Fire", None, &log).requiring(Requirements::of(shooter)).boxed(),
        )
        .unwrap();

    scheduler.run();
    take(&log);

    button.set(true);
    scheduler.run();
    assert_eq!(take(&log), vec!["Idle.end(true)", "Fire.init", "Fire.exec"]);
    assert_eq!(scheduler.claimant(shooter), Some(fire));
}
