//! # netreport Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test file
//! is compiled as its own crate and runs the compiled `netreport` binary.
//!

// Not every test file uses every helper.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::{Path, PathBuf};

/// # Get netreport Command (`netreport_cmd`)
///
/// Creates an `assert_cmd::Command` for the `netreport` binary built for this test run.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn netreport_cmd() -> Command {
    Command::cargo_bin("netreport").expect("Failed to find netreport binary for testing")
}

/// # Write Offline Config (`write_offline_config`)
///
/// Writes a configuration file into `dir` that points every tool at a program
/// name that does not exist, so a run never touches the real network and every
/// external command fails to start.
///
/// ## Returns
/// * `PathBuf` - Path of the written `netreport.toml`.
pub fn write_offline_config(dir: &Path, extra: &str) -> PathBuf {
    let path = dir.join("netreport.toml");
    let content = format!(
        "[tools]\n\
         ip = \"netreport-test-missing-ip\"\n\
         iw = \"netreport-test-missing-iw\"\n\
         nmap = \"netreport-test-missing-nmap\"\n\
         speedtest = \"netreport-test-missing-speedtest\"\n\
         {extra}"
    );
    std::fs::write(&path, content).expect("Failed to write test config");
    path
}
