//! # netreport Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the infrastructure shared by the rest of the
//! application:
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types and the crate-wide `Result` alias
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config::{self, Config};
//! use crate::core::error::{ContextError, ProcessError, Result};
//! ```
//!
pub mod config;
pub mod error;
