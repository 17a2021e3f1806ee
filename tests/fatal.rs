//! The fatal wrappers exit the process, so each scenario re-runs this test
//! binary as a child filtered down to the one test, with environment
//! variables selecting the child branch.

use std::{env, fs, path::Path, process::Command};

use linelog::Logger;

const CHILD_ENV: &str = "LINELOG_FATAL_CHILD";
const PATH_ENV: &str = "LINELOG_FATAL_PATH";

fn run_child(test_name: &str, log_path: &Path) -> std::process::Output {
    Command::new(env::current_exe().unwrap())
        .args([test_name, "--exact"])
        .env(CHILD_ENV, "1")
        .env(PATH_ENV, log_path)
        .output()
        .unwrap()
}

#[test]
fn fatal_method_exits_with_status_one() {
    if env::var_os(CHILD_ENV).is_some() {
        let logger = Logger::create(env::var(PATH_ENV).unwrap()).unwrap();
        logger.fatal(&["shutting down", "sink broken"]);
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fatal.log");
    let output = run_child("fatal_method_exits_with_status_one", &path);
    assert_eq!(output.status.code(), Some(1));
    // the line is flushed before the process exits
    let contents = fs::read_to_string(&path).unwrap();
    assert!(
        contents.ends_with("]-[fatal]-[???] shutting down : sink broken\n"),
        "unexpected log contents: {contents:?}"
    );
}

#[test]
fn fatal_macro_tags_module_path() {
    if env::var_os(CHILD_ENV).is_some() {
        let logger = Logger::create(env::var(PATH_ENV).unwrap()).unwrap();
        linelog::fatal!(logger, "boom");
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fatal_macro.log");
    let output = run_child("fatal_macro_tags_module_path", &path);
    assert_eq!(output.status.code(), Some(1));
    let contents = fs::read_to_string(&path).unwrap();
    assert!(
        contents.ends_with("]-[fatal]-[fatal] boom\n"),
        "unexpected log contents: {contents:?}"
    );
}
