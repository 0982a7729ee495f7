//! Builds the native fixture library once per test binary.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;

use tempfile::TempDir;

const FIXTURE_SOURCE: &str = include_str!("../fixtures/testlib.rs");

static FIXTURE: OnceLock<(TempDir, PathBuf)> = OnceLock::new();

/// Path of the compiled fixture library
pub fn fixture_library() -> &'static Path {
    let (_dir, library) = FIXTURE.get_or_init(build_fixture);
    library
}

/// Path that no loader can open
pub fn missing_library() -> PathBuf {
    fixture_dir().join(format!(
        "{}does_not_exist{}",
        env::consts::DLL_PREFIX,
        env::consts::DLL_SUFFIX
    ))
}

fn fixture_dir() -> &'static Path {
    let (dir, _library) = FIXTURE.get_or_init(build_fixture);
    dir.path()
}

fn build_fixture() -> (TempDir, PathBuf) {
    let dir = tempfile::Builder::new()
        .prefix("symbol-fixture")
        .tempdir()
        .expect("failed to create fixture directory");
    let source = dir.path().join("testlib.rs");
    fs::write(&source, FIXTURE_SOURCE).expect("failed to write fixture source");

    let library = dir.path().join(format!(
        "{}testlib{}",
        env::consts::DLL_PREFIX,
        env::consts::DLL_SUFFIX
    ));
    let output = Command::new(rustc())
        .arg("--crate-type")
        .arg("cdylib")
        .arg("--crate-name")
        .arg("testlib")
        .arg("--edition")
        .arg("2021")
        .arg("-o")
        .arg(&library)
        .arg(&source)
        .output()
        .expect("failed to run rustc");
    assert!(
        output.status.success(),
        "fixture compilation failed:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    (dir, library)
}

fn rustc() -> PathBuf {
    if let Some(rustc) = env::var_os("RUSTC") {
        return PathBuf::from(rustc);
    }
    let sibling = Path::new(env!("CARGO")).with_file_name(format!("rustc{}", env::consts::EXE_SUFFIX));
    if sibling.exists() {
        sibling
    } else {
        PathBuf::from("rustc")
    }
}
