//! # netreport Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout netreport. Almost
//! every failure in this application is *local*: a failed external command
//! becomes text inside one report section, a failed context lookup becomes a
//! one-line console notice. The typed errors below exist so those messages
//! are produced consistently in one place.
//!
//! ## Architecture
//!
//! - `ProcessError`: a single external command failed to start or exited non-zero.
//! - `ContextError`: one step of network context discovery failed (non-fatal).
//! - `NetreportError`: application-level errors that abort the run (configuration only).
//! - `Result<T>`: alias for `anyhow::Result<T>` used by handlers and `main`.
//!
//! ## Examples
//!
//! ```rust
//! // Non-fatal context failure: print and keep going with an empty field.
//! if let Err(e) = network::resolve_wifi_interface(runner, tools) {
//!     println!("WiFi interface error: {}", e);
//! }
//!
//! // Fatal configuration failure, propagated to main with anyhow.
//! return Err(anyhow!(NetreportError::Config("tools.nmap must not be empty".into())));
//! ```
//!
use thiserror::Error;

/// Failure of one external command invocation.
///
/// The captured output travels separately (see `common::process::CommandOutput`),
/// so this only describes *how* the command failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    /// The program could not be started at all (not installed, permission denied, ...).
    #[error("failed to start: {0}")]
    Spawn(String),

    /// The program ran and exited unsuccessfully; holds the exit status description.
    #[error("{0}")]
    Exit(String),

    /// The program started but its output or exit status could not be collected.
    #[error("failed to collect output: {0}")]
    Wait(String),
}

/// Failure of one network context discovery step.
///
/// None of these abort the run. The resolver prints them and leaves the
/// corresponding `NetworkContext` field empty.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    #[error("get default interface: {source}: {output}")]
    RouteLookup {
        source: ProcessError,
        output: String,
    },

    #[error("default interface not found")]
    DefaultInterfaceNotFound,

    #[error("get CIDR: {source}: {output}")]
    CidrLookup {
        interface: String,
        source: ProcessError,
        output: String,
    },

    #[error("list wifi interfaces: {source}: {output}")]
    WifiLookup {
        source: ProcessError,
        output: String,
    },

    #[error("no wifi interface found")]
    NoWifiInterface,
}

impl ContextError {
    /// Interface name that was already resolved when the failure happened.
    ///
    /// Only the CIDR lookup fails *after* learning the interface; the report
    /// still shows that name.
    pub fn partial_interface(&self) -> Option<&str> {
        match self {
            ContextError::CidrLookup { interface, .. } => Some(interface),
            _ => None,
        }
    }
}

/// Application-level errors that stop the run before a report is produced.
#[derive(Error, Debug)]
pub enum NetreportError {
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let config_err = NetreportError::Config("tools.nmap must not be empty".to_string());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: tools.nmap must not be empty"
        );

        assert_eq!(
            ContextError::DefaultInterfaceNotFound.to_string(),
            "default interface not found"
        );
        assert_eq!(
            ContextError::NoWifiInterface.to_string(),
            "no wifi interface found"
        );

        let cidr_err = ContextError::CidrLookup {
            interface: "eth0".into(),
            source: ProcessError::Exit("exit status: 1".into()),
            output: "Device \"eth0\" does not exist.".into(),
        };
        assert_eq!(
            cidr_err.to_string(),
            "get CIDR: exit status: 1: Device \"eth0\" does not exist."
        );
    }

    #[test]
    fn test_partial_interface() {
        let cidr_err = ContextError::CidrLookup {
            interface: "eth0".into(),
            source: ProcessError::Spawn("No such file or directory (os error 2)".into()),
            output: String::new(),
        };
        assert_eq!(cidr_err.partial_interface(), Some("eth0"));
        assert_eq!(ContextError::DefaultInterfaceNotFound.partial_interface(), None);
    }
}
