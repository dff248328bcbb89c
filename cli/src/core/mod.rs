//! # fileutils Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the infrastructure shared by the helpers and the
//! command-line front end:
//! - `config`: Layered TOML configuration (defaults, user file, project file)
//! - `error`: Error types and the crate-wide `Result` alias
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{FileUtilsError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
