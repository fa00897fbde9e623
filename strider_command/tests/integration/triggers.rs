//! Trigger bindings polled by the scheduler.

use strider_command::{Requirements, Trigger};

use super::support::{Button, Recorder, log, scheduler_with, take};

#[test]
fn rising_trigger_schedules_once_per_press() {
    let (mut scheduler, ids) = scheduler_with(&["hopper"]);
    let log = log();
    let button = Button::default();

    let id = scheduler
        .bind_new(
            Trigger::on_rising(button.supplier()),
            Recorder::new("Toggle", Some(1), &log).requiring(Requirements::of(ids[0])).boxed(),
        )
        .unwrap();

    button.set(true);
    for _ in 0..4 {
        scheduler.run();
    }
    assert_eq!(take(&log), vec!["Toggle.init", "Toggle.exec", "Toggle.end(false)"]);

    button.set(false);
    scheduler.run();
    button.set(true);
    scheduler.run();
    assert_eq!(take(&log), vec!["Toggle.init", "Toggle.exec", "Toggle.end(false)"]);
    assert!(!scheduler.is_scheduled(id));
}

#[test]
fn held_trigger_reschedules_after_finish() {
    let (mut scheduler, _) = scheduler_with(&[]);
    let log = log();
    let button = Button::default();

    scheduler
        .bind_new(Trigger::new(button.supplier()), Recorder::new("Pulse", Some(2), &log).boxed())
        .unwrap();

    button.set(true);
    for _ in 0..3 {
        scheduler.run();
    }
    assert_eq!(
        take(&log),
        vec!["Pulse.init", "Pulse.exec", "Pulse.exec", "Pulse.end(false)", "Pulse.init", "Pulse.exec"]
    );
}

#[test]
fn held_trigger_does_not_restart_running_command() {
    let (mut scheduler, _) = scheduler_with(&[]);
    let log = log();
    let button = Button::default();

    scheduler
        .bind_new(Trigger::new(button.supplier()), Recorder::new("Spin", None, &log).boxed())
        .unwrap();

    button.set(true);
    for _ in 0..3 {
        scheduler.run();
    }
    assert_eq!(take(&log), vec!["Spin.init", "Spin.exec", "Spin.exec", "Spin.exec"]);

    // Releasing the button does not cancel; only preemption or cancel does.
    button.set(false);
    scheduler.run();
    assert_eq!(take(&log), vec!["Spin.exec"]);
}

#[test]
fn disabled_scheduler_ignores_triggers() {
    let (mut scheduler, _) = scheduler_with(&[]);
    let log = log();
    let button = Button::default();

    let id = scheduler
        .bind_new(Trigger::on_rising(button.supplier()), Recorder::new("Jump", None, &log).boxed())
        .unwrap();

    scheduler.set_enabled(false);
    button.set(true);
    scheduler.run();
    assert!(!scheduler.is_scheduled(id));
    assert!(take(&log).is_empty());

    scheduler.set_enabled(true);
    scheduler.run();
    assert!(scheduler.is_scheduled(id));
}
