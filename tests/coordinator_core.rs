// tests/coordinator_core.rs

use std::path::PathBuf;

use livereset::engine::{CoordinatorState, CoreCommand, CoreRuntime, RuntimeEvent};
use livereset::shell::WindowId;
use livereset::types::WatchSource;
use livereset_test_utils::fakes::FakeWindow;

fn changed(source: WatchSource, path: &str) -> RuntimeEvent {
    RuntimeEvent::FileChanged {
        source,
        path: PathBuf::from(path),
    }
}

fn kinds(commands: &[CoreCommand]) -> Vec<&'static str> {
    commands
        .iter()
        .map(|c| match c {
            CoreCommand::TrackWindow(_) => "track",
            CoreCommand::ForgetWindow(_) => "forget",
            CoreCommand::SoftReset { .. } => "soft",
            CoreCommand::HardReset { .. } => "hard",
            CoreCommand::CloseWatcher(WatchSource::Soft) => "close-soft",
            CoreCommand::CloseWatcher(WatchSource::Hard) => "close-hard",
        })
        .collect()
}

#[test]
fn initial_state_is_decided_from_executable_and_force_flag() {
    assert_eq!(CoordinatorState::plan(false, false), CoordinatorState::SoftOnly);
    assert_eq!(CoordinatorState::plan(false, true), CoordinatorState::SoftOnly);
    assert_eq!(CoordinatorState::plan(true, false), CoordinatorState::SoftAndHard);
    assert_eq!(CoordinatorState::plan(true, true), CoordinatorState::HardOnly);
}

#[test]
fn soft_changes_repeat_while_soft_is_live() {
    let mut core = CoreRuntime::new(CoordinatorState::SoftAndHard);

    for _ in 0..3 {
        let step = core.step(changed(WatchSource::Soft, "/p/src/a.js"));
        assert_eq!(kinds(&step.commands), vec!["soft"]);
        assert!(step.keep_running);
    }
    assert_eq!(core.state(), CoordinatorState::SoftAndHard);
}

#[test]
fn first_hard_change_retires_the_watcher_then_resets() {
    let mut core = CoreRuntime::new(CoordinatorState::SoftAndHard);

    let step = core.step(changed(WatchSource::Hard, "/p/main.js"));
    assert_eq!(kinds(&step.commands), vec!["close-hard", "hard"]);
    assert_eq!(core.state(), CoordinatorState::Terminated);

    // One-shot: a second hard change does nothing.
    let step = core.step(changed(WatchSource::Hard, "/p/main.js"));
    assert!(step.commands.is_empty());
}

#[test]
fn soft_changes_after_termination_are_dropped() {
    let mut core = CoreRuntime::new(CoordinatorState::SoftAndHard);
    core.step(changed(WatchSource::Hard, "/p/main.js"));

    let step = core.step(changed(WatchSource::Soft, "/p/src/a.js"));
    assert!(step.commands.is_empty());
}

#[test]
fn hard_only_ignores_stale_soft_events() {
    let mut core = CoreRuntime::new(CoordinatorState::HardOnly);

    let step = core.step(changed(WatchSource::Soft, "/p/src/a.js"));
    assert!(step.commands.is_empty());

    let step = core.step(changed(WatchSource::Hard, "/p/src/a.js"));
    assert_eq!(kinds(&step.commands), vec!["close-hard", "hard"]);
    assert_eq!(core.state(), CoordinatorState::Terminated);
}

#[test]
fn soft_only_never_hard_resets() {
    let mut core = CoreRuntime::new(CoordinatorState::SoftOnly);

    let step = core.step(changed(WatchSource::Hard, "/p/main.js"));
    assert!(step.commands.is_empty());
    assert_eq!(core.state(), CoordinatorState::SoftOnly);
}

#[test]
fn failed_relaunch_falls_back_to_soft_resets() {
    let mut core = CoreRuntime::new(CoordinatorState::SoftAndHard);
    core.step(changed(WatchSource::Hard, "/p/main.js"));

    core.hard_reset_failed();
    assert_eq!(core.state(), CoordinatorState::SoftOnly);

    let step = core.step(changed(WatchSource::Soft, "/p/src/a.js"));
    assert_eq!(kinds(&step.commands), vec!["soft"]);

    // The hard watcher stays retired.
    let step = core.step(changed(WatchSource::Hard, "/p/main.js"));
    assert!(step.commands.is_empty());
}

#[test]
fn failed_relaunch_in_force_mode_goes_idle() {
    let mut core = CoreRuntime::new(CoordinatorState::HardOnly);
    core.step(changed(WatchSource::Hard, "/p/src/a.js"));

    core.hard_reset_failed();
    assert_eq!(core.state(), CoordinatorState::Idle);
}

#[test]
fn hard_reset_failed_outside_termination_is_ignored() {
    let mut core = CoreRuntime::new(CoordinatorState::SoftAndHard);
    core.hard_reset_failed();
    assert_eq!(core.state(), CoordinatorState::SoftAndHard);
}

#[test]
fn window_events_become_registry_commands() {
    let mut core = CoreRuntime::new(CoordinatorState::SoftOnly);

    let step = core.step(RuntimeEvent::WindowCreated(FakeWindow::new(1)));
    assert_eq!(kinds(&step.commands), vec!["track"]);

    let step = core.step(RuntimeEvent::WindowClosed(WindowId(1)));
    match step.commands.as_slice() {
        [CoreCommand::ForgetWindow(id)] => assert_eq!(*id, WindowId(1)),
        other => panic!("unexpected commands: {other:?}"),
    }
}

#[test]
fn shutdown_closes_both_watchers_and_stops() {
    let mut core = CoreRuntime::new(CoordinatorState::SoftAndHard);

    let step = core.step(RuntimeEvent::ShutdownRequested);
    assert_eq!(kinds(&step.commands), vec!["close-soft", "close-hard"]);
    assert!(!step.keep_running);
}
