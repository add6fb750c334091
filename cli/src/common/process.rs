//! # netreport Process Execution Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//!
//! ## Overview
//!
//! Every piece of information in a report comes from an external program
//! (`ip`, `iw`, `nmap`, `speedtest`). This module is the single boundary
//! through which those programs are executed.
//!
//! ## Architecture
//!
//! - **`Runner`**: trait with one method, `run(program, args) -> CommandOutput`.
//!   Context resolution and the probes only ever talk to this trait, so tests
//!   substitute a fake that returns canned output.
//! - **`SystemRunner`**: the real implementation on top of `std::process::Command`.
//! - **`CommandOutput`**: captured text plus an optional `ProcessError`.
//!
//! A program that cannot be started and a program that exits non-zero are
//! reported the same way: `CommandOutput` is "not ok" and keeps whatever text
//! was captured. Nothing is retried.
//!
//! ## Usage
//!
//! ```rust
//! let runner = SystemRunner;
//! let output = runner.run("iw", &["dev"]);
//! if output.is_ok() {
//!     println!("{}", output.text);
//! }
//! ```
//!
use crate::core::error::ProcessError;
use std::io::{self, Read};
use std::process::{Command, Stdio};
use tracing::{debug, trace};

/// Captured result of one external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Standard output and standard error, interleaved as the program wrote them.
    pub text: String,
    /// `None` when the program ran and exited successfully.
    pub error: Option<ProcessError>,
}

impl CommandOutput {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            error: None,
        }
    }

    pub fn failure(text: impl Into<String>, error: ProcessError) -> Self {
        Self {
            text: text.into(),
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Executes external programs on behalf of the resolver and the probes.
///
/// Implementations block until the program terminates. They must be
/// shareable across the probe tasks.
pub trait Runner: Send + Sync {
    fn run(&self, program: &str, args: &[&str]) -> CommandOutput;
}

/// `Runner` backed by real OS processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> CommandOutput {
        debug!("Running: {} {}", program, args.join(" "));

        let (mut reader, writer) = match io::pipe() {
            Ok(pipe) => pipe,
            Err(e) => return CommandOutput::failure(String::new(), ProcessError::Spawn(e.to_string())),
        };

        // stdout and stderr share one pipe so their lines keep the order they were written in.
        let spawned = writer.try_clone().and_then(|stderr_writer| {
            Command::new(program)
                .args(args)
                .stdin(Stdio::null())
                .stdout(writer)
                .stderr(stderr_writer)
                .spawn()
        });
        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                debug!("Failed to start '{}': {}", program, e);
                return CommandOutput::failure(String::new(), ProcessError::Spawn(e.to_string()));
            }
        };

        // The write ends were moved into the dropped `Command`, so this reads until the child exits.
        let mut bytes = Vec::new();
        let read = reader.read_to_end(&mut bytes);
        let text = String::from_utf8_lossy(&bytes).into_owned();

        let status = match child.wait() {
            Ok(status) => status,
            Err(e) => return CommandOutput::failure(text, ProcessError::Wait(e.to_string())),
        };
        trace!("Output of '{}' ({}):\n{}", program, status, text);
        if let Err(e) = read {
            return CommandOutput::failure(text, ProcessError::Wait(e.to_string()));
        }

        if status.success() {
            CommandOutput::success(text)
        } else {
            debug!("'{}' exited unsuccessfully: {}", program, status);
            CommandOutput::failure(text, ProcessError::Exit(status.to_string()))
        }
    }
}
