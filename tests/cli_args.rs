// tests/cli_args.rs

use std::path::PathBuf;

use clap::Parser;

use livereset::cli::{CliArgs, LogLevel};
use livereset::config::ResetOptions;
use livereset::logging::{filter_for_level, filter_from_directives};
use livereset::types::HardResetMethod;

fn parse(args: &[&str]) -> CliArgs {
    CliArgs::try_parse_from(std::iter::once("livereset").chain(args.iter().copied()))
        .expect("arguments should parse")
}

#[test]
fn flags_map_onto_options() {
    let args = parse(&[
        "src",
        "static/**/*.css",
        "--electron",
        "node_modules/.bin/electron",
        "--main-file",
        "main.js",
        "--electron-arg",
        "--inspect",
        "--app-arg",
        "--dev",
        "--hard-reset-method",
        "exit",
        "--force-hard-reset",
        "--ignore",
        "**/*.map",
        "--poll",
        "200",
    ]);

    let options = args.apply(ResetOptions::default());

    assert_eq!(options.glob, vec!["src", "static/**/*.css"]);
    assert_eq!(options.electron, Some(PathBuf::from("node_modules/.bin/electron")));
    assert_eq!(options.main_file, vec![PathBuf::from("main.js")]);
    assert_eq!(options.electron_argv, vec!["--inspect"]);
    assert_eq!(options.app_argv, vec!["--dev"]);
    assert_eq!(options.hard_reset_method, HardResetMethod::Exit);
    assert!(options.force_hard_reset);
    assert_eq!(options.ignored, vec!["**/*.map"]);
    assert!(options.use_polling);
    assert_eq!(options.poll_interval_ms, 200);
}

#[test]
fn command_line_extends_lists_and_overrides_scalars_from_file() {
    let from_file = ResetOptions {
        glob: vec!["src".to_string()],
        electron: Some(PathBuf::from("/old/electron")),
        hard_reset_method: HardResetMethod::Exit,
        ..ResetOptions::default()
    };

    let args = parse(&["static", "--electron", "/new/electron"]);
    let options = args.apply(from_file);

    assert_eq!(options.glob, vec!["src", "static"]);
    assert_eq!(options.electron, Some(PathBuf::from("/new/electron")));
    // Not given on the command line, so the file's value stays.
    assert_eq!(options.hard_reset_method, HardResetMethod::Exit);
    assert!(!options.use_polling);
}

#[test]
fn any_other_method_string_means_quit() {
    let args = parse(&["src", "--hard-reset-method", "graceful"]);
    let options = args.apply(ResetOptions {
        hard_reset_method: HardResetMethod::Exit,
        ..ResetOptions::default()
    });
    assert_eq!(options.hard_reset_method, HardResetMethod::Quit);
}

#[test]
fn log_level_and_dry_run_parse() {
    let args = parse(&["--log-level", "debug", "--dry-run", "src"]);
    assert!(matches!(args.log_level, Some(LogLevel::Debug)));
    assert!(args.dry_run);

    assert!(CliArgs::try_parse_from(["livereset", "--log-level", "loud"]).is_err());
}

#[test]
fn log_filters_come_from_the_flag_or_directives() {
    use tracing::level_filters::LevelFilter;

    assert_eq!(
        filter_for_level(LogLevel::Warn).max_level_hint(),
        Some(LevelFilter::WARN)
    );
    assert_eq!(
        filter_from_directives(" info,livereset::watch=trace ").max_level_hint(),
        Some(LevelFilter::TRACE)
    );
    // Blank or malformed directives fall back to info.
    assert_eq!(
        filter_from_directives("").max_level_hint(),
        Some(LevelFilter::INFO)
    );
    assert_eq!(
        filter_from_directives("livereset=loud").max_level_hint(),
        Some(LevelFilter::INFO)
    );
}
