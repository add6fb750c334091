//! # netreport Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the command handlers reachable from `main.rs`.
//! netreport has a single command, so the binary runs the report handler
//! directly without a subcommand.
//!
//! - `report`: context resolution, concurrent probes, report rendering
//!

/// Builds and prints the network diagnostic report.
pub mod report;
