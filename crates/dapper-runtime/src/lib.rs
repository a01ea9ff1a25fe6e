//! Build and run orchestration for the Dapper tool.
//!
//! A [`dapperfile::Dapperfile`] session builds an image from a definition
//! file, reads the [`environment::Environment`] baked into it, optionally
//! derives a copy-mode image, and runs one container through a
//! [`engine::ContainerEngine`].

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used, clippy::panic))]

pub mod args;
pub mod dapperfile;
pub mod engine;
pub mod environment;
pub mod guard;
pub mod host;
pub mod tag;
