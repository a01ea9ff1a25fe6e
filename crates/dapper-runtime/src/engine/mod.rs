//! Container engine abstraction.
//!
//! Dapper never talks to a daemon itself. Every image and container
//! operation goes through an implementation of [`ContainerEngine`]; the
//! default one drives the engine's command-line interface.

pub mod cli;

use std::path::Path;

use dapper_common::error::Result;
use dapper_common::types::ImageTag;

pub use cli::EngineCli;

/// The engine subcommands a session relies on.
///
/// Every method blocks until the engine exits. A non-zero exit is an
/// error; nothing is retried at this layer.
pub trait ContainerEngine {
    /// Builds `definition` with the working directory as context and
    /// tags the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the build fails.
    fn build(&self, tag: &ImageTag, definition: &Path) -> Result<()>;

    /// Returns the image's configured environment as raw JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be inspected.
    fn inspect_env(&self, tag: &ImageTag) -> Result<Vec<u8>>;

    /// Runs a container with the given `run` arguments in the foreground.
    ///
    /// # Errors
    ///
    /// Returns an error if the container exits unsuccessfully.
    fn run(&self, args: &[String]) -> Result<()>;

    /// Force-removes a container and its anonymous volumes.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal fails.
    fn remove(&self, name: &str) -> Result<()>;

    /// Copies `path` out of the named container into the working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the copy fails.
    fn copy_out(&self, name: &str, path: &str) -> Result<()>;
}

impl<E: ContainerEngine + ?Sized> ContainerEngine for &E {
    fn build(&self, tag: &ImageTag, definition: &Path) -> Result<()> {
        (**self).build(tag, definition)
    }

    fn inspect_env(&self, tag: &ImageTag) -> Result<Vec<u8>> {
        (**self).inspect_env(tag)
    }

    fn run(&self, args: &[String]) -> Result<()> {
        (**self).run(args)
    }

    fn remove(&self, name: &str) -> Result<()> {
        (**self).remove(name)
    }

    fn copy_out(&self, name: &str, path: &str) -> Result<()> {
        (**self).copy_out(name, path)
    }
}
