//! # netreport Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared building blocks used by the report command:
//!
//! - **`process`**: the `Runner` boundary for executing external programs and capturing their output.
//! - **`network`**: discovery of the default interface, its CIDR and the wireless interface.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::network;
//! use crate::common::process::SystemRunner;
//!
//! let context = network::resolve_context(&SystemRunner, &config.tools);
//! ```
//!

/// Network context discovery (default route, CIDR, wifi interface).
pub mod network;
/// Execution of external programs behind the `Runner` trait.
pub mod process;
