// tests/hard_reset.rs

use std::ffi::OsString;
use std::path::PathBuf;

use livereset::errors::LiveResetError;
use livereset::reset::{DetachedSpawner, HardResetDispatcher, ProcessSpawner};
use livereset::types::HardResetMethod;
use livereset_test_utils::builders::ResetOptionsBuilder;
use livereset_test_utils::fakes::{call_log, FakeApplication, FakeSpawner};

fn os(args: &[&str]) -> Vec<OsString> {
    args.iter().map(OsString::from).collect()
}

#[test]
fn relaunch_args_are_executable_flags_then_entry_then_app_args() {
    let dispatcher = HardResetDispatcher::new(
        "/usr/bin/electron",
        vec![PathBuf::from("/app/main.js")],
        HardResetMethod::Quit,
        vec!["--foo".to_string()],
        vec!["--flag".to_string()],
    );

    assert_eq!(
        dispatcher.relaunch_args(),
        os(&["--flag", "/app/main.js", "--foo"])
    );
}

#[test]
fn multiple_entry_files_keep_their_order() {
    let dispatcher = HardResetDispatcher::new(
        "/usr/bin/electron",
        vec![PathBuf::from("/app/a.js"), PathBuf::from("/app/b.js")],
        HardResetMethod::Quit,
        vec!["--x".to_string(), "--y".to_string()],
        vec![],
    );

    assert_eq!(
        dispatcher.relaunch_args(),
        os(&["/app/a.js", "/app/b.js", "--x", "--y"])
    );
}

#[test]
fn dispatch_spawns_then_quits_by_default() {
    let log = call_log();
    let spawner = FakeSpawner::new(log.clone());
    let app = FakeApplication::new(log.clone());

    let config = ResetOptionsBuilder::new()
        .glob("src")
        .main_file("main.js")
        .electron("/bin/electron")
        .electron_arg("--flag")
        .app_arg("--foo")
        .build();
    let dispatcher = HardResetDispatcher::from_config("/bin/electron", &config);

    dispatcher.dispatch(&*spawner, &*app).unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["spawn", "quit"]);
    let spawned = spawner.spawned();
    assert_eq!(spawned.len(), 1);
    assert_eq!(spawned[0].0, PathBuf::from("/bin/electron"));
    assert_eq!(
        spawned[0].1,
        os(&["--flag", "/project/main.js", "--foo"])
    );
}

#[test]
fn exit_method_uses_the_immediate_primitive() {
    let log = call_log();
    let spawner = FakeSpawner::new(log.clone());
    let app = FakeApplication::new(log.clone());

    let dispatcher = HardResetDispatcher::new(
        "/bin/electron",
        vec![PathBuf::from("/app/main.js")],
        HardResetMethod::Exit,
        vec![],
        vec![],
    );
    dispatcher.dispatch(&*spawner, &*app).unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["spawn", "exit"]);
}

#[test]
fn method_parsing_only_recognises_exit() {
    let parse = |s: &str| s.parse::<HardResetMethod>().unwrap();

    assert_eq!(parse("exit"), HardResetMethod::Exit);
    assert_eq!(parse("quit"), HardResetMethod::Quit);
    assert_eq!(parse(""), HardResetMethod::Quit);
    assert_eq!(parse("EXIT"), HardResetMethod::Quit);
    assert_eq!(parse("kill"), HardResetMethod::Quit);
    assert_eq!(HardResetMethod::default(), HardResetMethod::Quit);
}

#[test]
fn spawn_failure_is_returned_and_nothing_terminates() {
    let log = call_log();
    let spawner = FakeSpawner::failing(log.clone());
    let app = FakeApplication::new(log.clone());

    let dispatcher = HardResetDispatcher::new(
        "/missing/electron",
        vec![PathBuf::from("/app/main.js")],
        HardResetMethod::Exit,
        vec![],
        vec![],
    );
    let err = dispatcher
        .dispatch(&*spawner, &*app)
        .unwrap_err();

    match err {
        LiveResetError::SpawnError { program, .. } => {
            assert_eq!(program, PathBuf::from("/missing/electron"));
        }
        other => panic!("expected SpawnError, got {other:?}"),
    }
    assert_eq!(*log.lock().unwrap(), vec!["spawn-failed"]);
}

#[tokio::test]
async fn real_spawner_reports_missing_executable() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("no-such-electron");

    let err = DetachedSpawner
        .spawn_detached(&missing, &os(&["main.js"]))
        .unwrap_err();

    assert!(matches!(err, LiveResetError::SpawnError { .. }));
}

#[cfg(unix)]
#[tokio::test]
async fn real_spawner_starts_a_detached_child() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("relaunched");

    let script = format!("touch '{}'", marker.display());
    DetachedSpawner
        .spawn_detached(std::path::Path::new("/bin/sh"), &os(&["-c", script.as_str()]))
        .unwrap();

    // The spawner never waits on the child, so poll for its side effect.
    let deadline = tokio::time::Instant::now() + std::time::Duration::from_secs(5);
    while !marker.exists() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "child never ran"
        );
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
}
