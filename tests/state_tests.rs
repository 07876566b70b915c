use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, TimeZone, Utc};

use agolabel::app::Capabilities;
use agolabel::app::actions::{Action, SideEffect};
use agolabel::app::state::{DisplayState, SchedulerState};
use agolabel::app::update::update;
use agolabel::display::{DisplayConfig, RenderKind};
use agolabel::locale::{Direction, LocaleCatalog};
use agolabel::util::host::{FixedClock, StaticEnvironment};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 14, 17, 0, 0).unwrap()
}

fn caps() -> Capabilities {
    Capabilities::new(
        StaticEnvironment::utc("en-US"),
        FixedClock(now()),
        LocaleCatalog::builtin(),
    )
}

fn config(target: DateTime<Utc>) -> DisplayConfig {
    DisplayConfig::builder(target)
        .time_update_interval_ms(1000)
        .build()
        .unwrap()
}

fn mounted(target: DateTime<Utc>) -> DisplayState {
    let mut state = DisplayState::new();
    update(&mut state, Action::Mount(config(target)), &caps());
    state
}

// --- Initial state ---

#[test]
fn test_initial_state_is_idle() {
    let state = DisplayState::new();
    assert_eq!(state.scheduler, SchedulerState::Idle);
    assert_eq!(state.evaluations, 0);
    assert!(state.rendered.is_none());
    assert_eq!(state.text(), "");
    assert!(!state.torn_down);
}

// --- Mount ---

#[test]
fn test_mount_evaluates_and_arms_timer() {
    let mut state = DisplayState::new();
    let effects = update(
        &mut state,
        Action::Mount(config(now() - Duration::seconds(30))),
        &caps(),
    );

    assert_eq!(effects.len(), 2);
    assert!(matches!(&effects[0], SideEffect::Publish(r) if r.text == "30s ago"));
    assert_eq!(effects[1], SideEffect::ArmTimer(StdDuration::from_millis(1000)));
    assert_eq!(state.text(), "30s ago");
    assert_eq!(
        state.rendered.as_ref().unwrap().kind,
        RenderKind::Relative(Direction::Past)
    );
    assert_eq!(state.evaluations, 1);
    assert!(state.is_scheduled());
    assert_eq!(state.locale.as_ref().unwrap().key(), "enUS");
}

#[test]
fn test_mount_without_updates_stays_idle() {
    let mut state = DisplayState::new();
    let config = DisplayConfig::builder(now() + Duration::minutes(45))
        .use_time_updates(false)
        .build()
        .unwrap();
    let effects = update(&mut state, Action::Mount(config), &caps());

    assert_eq!(effects.len(), 1);
    assert!(matches!(&effects[0], SideEffect::Publish(r) if r.text == "in 45m"));
    assert_eq!(state.scheduler, SchedulerState::Idle);

    assert!(update(&mut state, Action::Tick, &caps()).is_empty());
    assert_eq!(state.evaluations, 1);
}

// --- Ticks ---

#[test]
fn test_three_ticks_evaluate_four_times() {
    let mut state = mounted(now() - Duration::seconds(30));
    for _ in 0..3 {
        let effects = update(&mut state, Action::Tick, &caps());
        assert_eq!(effects.len(), 1);
        assert!(matches!(effects[0], SideEffect::Publish(_)));
    }
    assert_eq!(state.evaluations, 4);
}

#[test]
fn test_tick_before_mount_is_ignored() {
    let mut state = DisplayState::new();
    assert!(update(&mut state, Action::Tick, &caps()).is_empty());
    assert_eq!(state.evaluations, 0);
}

// --- Teardown ---

#[test]
fn test_teardown_cancels_and_stops_ticks() {
    let mut state = mounted(now() - Duration::seconds(30));
    update(&mut state, Action::Tick, &caps());

    let effects = update(&mut state, Action::Teardown, &caps());
    assert_eq!(effects, vec![SideEffect::CancelTimer]);
    assert_eq!(state.scheduler, SchedulerState::Idle);
    assert!(state.torn_down);

    for _ in 0..5 {
        assert!(update(&mut state, Action::Tick, &caps()).is_empty());
    }
    assert_eq!(state.evaluations, 2);
}

#[test]
fn test_teardown_is_idempotent() {
    let mut state = mounted(now());
    assert_eq!(
        update(&mut state, Action::Teardown, &caps()),
        vec![SideEffect::CancelTimer]
    );
    assert!(update(&mut state, Action::Teardown, &caps()).is_empty());
    assert!(update(&mut state, Action::Teardown, &caps()).is_empty());
}

// --- Reconfigure ---

#[test]
fn test_reconfigure_with_new_target_restarts() {
    let mut state = mounted(now() - Duration::seconds(30));
    let effects = update(
        &mut state,
        Action::Reconfigure(config(now() + Duration::minutes(45))),
        &caps(),
    );

    assert_eq!(effects.len(), 3);
    assert_eq!(effects[0], SideEffect::CancelTimer);
    assert!(matches!(&effects[1], SideEffect::Publish(r) if r.text == "in 45m"));
    assert_eq!(effects[2], SideEffect::ArmTimer(StdDuration::from_millis(1000)));
    assert_eq!(state.evaluations, 2);
}

#[test]
fn test_reconfigure_with_new_threshold_restarts() {
    let mut state = mounted(now() - Duration::days(3));
    let narrower = DisplayConfig::builder(now() - Duration::days(3))
        .time_update_interval_ms(1000)
        .days_passed_threshold(1.0)
        .build()
        .unwrap();
    let effects = update(&mut state, Action::Reconfigure(narrower), &caps());
    assert_eq!(effects[0], SideEffect::CancelTimer);
    assert_eq!(state.text(), "03/11/24 5:00 PM");
}

#[test]
fn test_reconfigure_same_identity_keeps_timer() {
    let target = now() - Duration::seconds(30);
    let mut state = mounted(target);
    let slower = DisplayConfig::builder(target)
        .time_update_interval_ms(5000)
        .build()
        .unwrap();

    let effects = update(&mut state, Action::Reconfigure(slower), &caps());
    assert!(effects.is_empty());
    assert_eq!(state.evaluations, 1);
    assert_eq!(
        state.scheduler,
        SchedulerState::Scheduled {
            interval: StdDuration::from_millis(1000)
        }
    );
    assert_eq!(
        state.config.as_ref().unwrap().time_update_interval,
        StdDuration::from_millis(5000)
    );
}

#[test]
fn test_mount_after_teardown_rearms() {
    let mut state = mounted(now());
    update(&mut state, Action::Teardown, &caps());
    let effects = update(
        &mut state,
        Action::Mount(config(now() - Duration::minutes(2))),
        &caps(),
    );
    assert!(!state.torn_down);
    assert!(state.is_scheduled());
    assert!(matches!(effects.last(), Some(SideEffect::ArmTimer(_))));
    assert_eq!(state.text(), "2m ago");
}
