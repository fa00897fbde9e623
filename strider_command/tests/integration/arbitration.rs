//! Subsystem arbitration: mutual exclusion, preemption, the interruptible
//! seam and cancellation.

use strider_command::{Requirements, ScheduleOutcome, Trigger};

use super::support::{Button, Recorder, assert_exclusive, log, scheduler_with, take};

#[test]
fn mutual_exclusion_holds_every_tick() {
    let (mut scheduler, ids) = scheduler_with(&["drivetrain", "collector", "shooter"]);
    let [drive, collector, shooter] = [ids[0], ids[1], ids[2]];
    let log = log();

    for (&id, name) in ids.iter().zip(["Drive", "Collect", "Shoot"]) {
        scheduler
            .register_default_command(
                id,
                Recorder::new(name, None, &log).requiring(Requirements::of(id)).boxed(),
            )
            .unwrap();
    }

    let a = Button::default();
    let b = Button::default();
    scheduler
        .bind_new(
            Trigger::on_rising(a.supplier()),
            Recorder::new("DriveAndCollect", Some(3), &log)
                .requiring(Requirements::of(drive).with(collector))
                .boxed(),
        )
        .unwrap();
    scheduler
        .bind_new(
            Trigger::new(b.supplier()),
            Recorder::new("CollectAndShoot", Some(2), &log)
                .requiring(Requirements::of(collector).with(shooter))
                .boxed(),
        )
        .unwrap();

    for tick in 0..30u32 {
        a.set(tick % 7 == 2);
        b.set((10..14).contains(&tick) || tick == 21);
        scheduler.run();
        assert_exclusive(&scheduler, &ids);
    }
}

#[test]
fn preemption_ends_holder_before_successor_initializes() {
    let (mut scheduler, ids) = scheduler_with(&["shooter"]);
    let shooter = ids[0];
    let log = log();

    let (x, _) = scheduler
        .schedule(Recorder::new("X", None, &log).requiring(Requirements::of(shooter)).boxed())
        .unwrap();
    scheduler.run();
    scheduler.run();
    take(&log);

    let (y, outcome) = scheduler
        .schedule(Recorder::new("Y", None, &log).requiring(Requirements::of(shooter)).boxed())
        .unwrap();
    assert_eq!(outcome, ScheduleOutcome::Scheduled);
    assert_eq!(take(&log), vec!["X.end(true)"]);
    assert_eq!(scheduler.claimant(shooter), Some(y));
    assert!(!scheduler.is_scheduled(x));

    scheduler.run();
    assert_eq!(take(&log), vec!["Y.init", "Y.exec"]);
}

#[test]
fn partial_overlap_ends_whole_holder() {
    let (mut scheduler, ids) = scheduler_with(&["shooter", "hopper"]);
    let (shooter, hopper) = (ids[0], ids[1]);
    let log = log();

    scheduler
        .register_default_command(
            shooter,
            Recorder::new("Shoot", None, &log).requiring(Requirements::of(shooter)).boxed(),
        )
        .unwrap();
    let (x, _) = scheduler
        .schedule(
            Recorder::new("AutoShoot", None, &log)
                .requiring(Requirements::of(shooter).with(hopper))
                .boxed(),
        )
        .unwrap();
    scheduler.run();
    take(&log);

    let (y, _) = scheduler
        .schedule(Recorder::new("Feed", None, &log).requiring(Requirements::of(hopper)).boxed())
        .unwrap();
    assert_eq!(take(&log), vec!["AutoShoot.end(true)"]);
    assert!(!scheduler.is_scheduled(x));
    assert_eq!(scheduler.claimant(shooter), None);
    assert_eq!(scheduler.claimant(hopper), Some(y));

    // Freed shooter goes back to its default on the next tick.
    scheduler.run();
    assert_eq!(take(&log), vec!["Feed.init", "Feed.exec", "Shoot.init", "Shoot.exec"]);
    assert_exclusive(&scheduler, &ids);
}

#[test]
fn pending_command_preempted_gets_no_callbacks() {
    let (mut scheduler, ids) = scheduler_with(&["climber"]);
    let climber = ids[0];
    let log = log();

    let (x, _) = scheduler
        .schedule(Recorder::new("X", None, &log).requiring(Requirements::of(climber)).boxed())
        .unwrap();
    scheduler
        .schedule(Recorder::new("Y", None, &log).requiring(Requirements::of(climber)).boxed())
        .unwrap();

    assert!(take(&log).is_empty());
    assert!(!scheduler.is_scheduled(x));

    scheduler.run();
    assert_eq!(take(&log), vec!["Y.init", "Y.exec"]);
}

#[test]
fn uninterruptible_holder_rejects_newcomer() {
    let (mut scheduler, ids) = scheduler_with(&["climber"]);
    let climber = ids[0];
    let log = log();

    let (x, _) = scheduler
        .schedule(
            Recorder::new("Lock", Some(2), &log)
                .requiring(Requirements::of(climber))
                .uninterruptible()
                .boxed(),
        )
        .unwrap();
    scheduler.run();

    let (_, outcome) = scheduler
        .schedule(Recorder::new("Climb", None, &log).requiring(Requirements::of(climber)).boxed())
        .unwrap();
    assert_eq!(
        outcome,
        ScheduleOutcome::Rejected {
            subsystem: climber,
            held_by: x,
        }
    );
    assert_eq!(scheduler.claimant(climber), Some(x));

    scheduler.run();
    assert!(!scheduler.is_scheduled(x));
    let (y, outcome) = scheduler
        .schedule(Recorder::new("Climb", None, &log).requiring(Requirements::of(climber)).boxed())
        .unwrap();
    assert_eq!(outcome, ScheduleOutcome::Scheduled);
    assert_eq!(scheduler.claimant(climber), Some(y));
    assert!(!take(&log).iter().any(|e| e == "Lock.end(true)"));
}

#[test]
fn uninterruptible_default_still_yields() {
    let (mut scheduler, ids) = scheduler_with(&["stats"]);
    let stats = ids[0];
    let log = log();

    let default = scheduler
        .register_default_command(
            stats,
            Recorder::new("UpdateStats", None, &log)
                .requiring(Requirements::of(stats))
                .uninterruptible()
                .boxed(),
        )
        .unwrap();
    scheduler.run();

    let (_, outcome) = scheduler
        .schedule(Recorder::new("Reset", Some(1), &log).requiring(Requirements::of(stats)).boxed())
        .unwrap();
    assert_eq!(outcome, ScheduleOutcome::Scheduled);
    assert!(!scheduler.is_scheduled(default));
}

#[test]
fn cancel_interrupts_and_releases() {
    let (mut scheduler, ids) = scheduler_with(&["collector"]);
    let collector = ids[0];
    let log = log();

    let (x, _) = scheduler
        .schedule(Recorder::new("X", None, &log).requiring(Requirements::of(collector)).boxed())
        .unwrap();
    scheduler.run();
    take(&log);

    assert!(scheduler.cancel(x));
    assert_eq!(take(&log), vec!["X.end(true)"]);
    assert_eq!(scheduler.claimant(collector), None);
    assert!(!scheduler.cancel(x));
}

#[test]
fn cancel_all_ends_in_admission_order() {
    let (mut scheduler, ids) = scheduler_with(&["drivetrain", "shooter"]);
    let log = log();

    scheduler
        .schedule(Recorder::new("B", None, &log).requiring(Requirements::of(ids[1])).boxed())
        .unwrap();
    scheduler
        .schedule(Recorder::new("A", None, &log).requiring(Requirements::of(ids[0])).boxed())
        .unwrap();
    scheduler.run();
    take(&log);

    scheduler.cancel_all();
    assert_eq!(take(&log), vec!["B.end(true)", "A.end(true)"]);
    assert!(scheduler.scheduled().is_empty());
}
