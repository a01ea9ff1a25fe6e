//! # dapper-common
//!
//! Shared types, error definitions, configuration models, and constants
//! used across the Dapper workspace.
//!
//! This crate is the leaf of the dependency graph. It depends on no other
//! internal crate and holds the vocabulary the runtime and the CLI share:
//! image tags, run modes, descriptor key names and the error enum.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
