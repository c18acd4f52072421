// tests/watch_patterns.rs

use std::path::{Path, PathBuf};

use livereset::watch::path_utils::{glob_base, literal_path, resolve_pattern};
use livereset::watch::{WatchMatcher, WatchTarget};
use livereset_test_utils::builders::ResetOptionsBuilder;

fn matcher(target: &WatchTarget) -> WatchMatcher {
    WatchMatcher::compile("/project", target).unwrap()
}

#[test]
fn directory_targets_are_recursive() {
    let m = matcher(&WatchTarget::new(["src"]));

    assert!(m.matches(Path::new("/project/src/app.js")));
    assert!(m.matches(Path::new("/project/src/deep/nested/view.html")));
    assert!(!m.matches(Path::new("/project/srcfoo/app.js")));
    assert!(!m.matches(Path::new("/project/main.js")));
}

#[test]
fn globs_respect_path_separators() {
    let m = matcher(&WatchTarget::new(["src/*.js"]));

    assert!(m.matches(Path::new("/project/src/app.js")));
    assert!(!m.matches(Path::new("/project/src/lib/app.js")));

    let m = matcher(&WatchTarget::new(["src/**/*.js"]));
    assert!(m.matches(Path::new("/project/src/lib/app.js")));
    assert!(!m.matches(Path::new("/project/src/lib/app.css")));
}

#[test]
fn root_and_dot_prefixed_patterns_resolve_the_same() {
    let root = Path::new("/project");
    assert_eq!(resolve_pattern(root, "."), "/project");
    assert_eq!(resolve_pattern(root, "./src/**"), "/project/src/**");
    assert_eq!(resolve_pattern(root, "src/**"), "/project/src/**");
    assert_eq!(resolve_pattern(root, "/elsewhere/x.js"), "/elsewhere/x.js");

    let m = matcher(&WatchTarget::new(["."]));
    assert!(m.matches(Path::new("/project/anything/at/all.txt")));
}

#[test]
fn glob_base_stops_at_the_first_wildcard() {
    assert_eq!(glob_base("/app/src/**/*.js"), PathBuf::from("/app/src"));
    assert_eq!(glob_base("/app/main.js"), PathBuf::from("/app/main.js"));
    assert_eq!(glob_base("/*.js"), PathBuf::from("/"));
}

#[test]
fn exclusions_win_over_inclusions() {
    let target = WatchTarget::new(["."]).with_ignored(["**/*.log", "main.js"]);
    let m = matcher(&target);

    assert!(m.matches(Path::new("/project/src/app.js")));
    assert!(!m.matches(Path::new("/project/server.log")));
    assert!(!m.matches(Path::new("/project/main.js")));
}

#[test]
fn dependency_and_hidden_paths_never_match() {
    let m = matcher(&WatchTarget::new(["."]));

    assert!(!m.matches(Path::new("/project/node_modules/x/index.js")));
    assert!(!m.matches(Path::new("/project/src/.DS_Store")));
    assert!(!m.matches(Path::new("/project/.git/index")));
}

#[test]
fn hidden_ancestors_above_the_root_are_fine() {
    let m = WatchMatcher::compile("/home/me/.config/app", &WatchTarget::new(["src"])).unwrap();

    assert!(m.matches(Path::new("/home/me/.config/app/src/app.js")));
    assert!(!m.matches(Path::new("/home/me/.config/app/src/.hidden.js")));
}

#[test]
fn widening_adds_patterns_but_keeps_exclusions() {
    let hard = WatchTarget::new(["/project/main.js"]).with_ignored(["**/*.tmp"]);
    let globs = WatchTarget::new(["src"]);

    let widened = hard.widened(&globs);
    assert_eq!(
        widened.patterns(),
        ["/project/main.js".to_string(), "src".to_string()]
    );
    assert_eq!(widened.ignored(), ["**/*.tmp".to_string()]);

    let mut m = matcher(&hard);
    assert!(!m.matches(Path::new("/project/src/app.js")));

    m.widen(&globs).unwrap();
    assert!(m.matches(Path::new("/project/src/app.js")));
    assert!(m.matches(Path::new("/project/main.js")));
    assert!(!m.matches(Path::new("/project/src/app.tmp")));
}

#[test]
fn widening_twice_does_not_duplicate_patterns() {
    let base = WatchTarget::new(["a", "b"]);
    let widened = base.widened(&WatchTarget::new(["b", "c"]));
    assert_eq!(
        widened.patterns(),
        ["a".to_string(), "b".to_string(), "c".to_string()]
    );
}

#[test]
fn glob_characters_in_the_root_are_literal() {
    let root = "/home/u/app[dev]";
    let m = WatchMatcher::compile(root, &WatchTarget::new(["."])).unwrap();

    assert!(m.matches(Path::new("/home/u/app[dev]/src/app.js")));
    assert!(m.matches(Path::new("/home/u/app[dev]/main.js")));
    assert!(!m.matches(Path::new("/home/u/appd/src/app.js")));

    let m = WatchMatcher::compile(root, &WatchTarget::new(["src/*.js"])).unwrap();
    assert!(m.matches(Path::new("/home/u/app[dev]/src/app.js")));
    assert!(!m.matches(Path::new("/home/u/app[dev]/src/app.css")));
}

#[test]
fn escaped_paths_still_yield_literal_watch_roots() {
    let resolved = resolve_pattern(Path::new("/home/u/app{x}"), "src/**/*.js");
    assert_eq!(glob_base(&resolved), PathBuf::from("/home/u/app{x}/src"));

    let resolved = resolve_pattern(Path::new("/home/u/app[dev]"), "main.js");
    assert_eq!(
        literal_path(&resolved),
        Some(PathBuf::from("/home/u/app[dev]/main.js"))
    );
    assert_eq!(literal_path("/home/u/*.js"), None);
}

#[test]
fn entry_files_under_a_bracketed_root_are_split_correctly() {
    let config = ResetOptionsBuilder::new()
        .root("/home/u/app[dev]")
        .glob(".")
        .main_file("main.js")
        .build();
    let root = config.root().to_path_buf();

    let soft = WatchMatcher::compile(&root, &config.soft_target()).unwrap();
    let hard = WatchMatcher::compile(&root, &config.hard_target()).unwrap();

    let entry = Path::new("/home/u/app[dev]/main.js");
    let other = Path::new("/home/u/app[dev]/src/app.js");
    assert!(!soft.matches(entry));
    assert!(soft.matches(other));
    assert!(hard.matches(entry));
    assert!(!hard.matches(other));
}
