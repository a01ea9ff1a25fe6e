//! Engine backend that shells out to a Docker-compatible CLI.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use dapper_common::constants::INSPECT_ENV_FORMAT;
use dapper_common::error::{DapperError, Result};
use dapper_common::types::ImageTag;

use super::ContainerEngine;

/// Drives an engine executable such as `docker` or `podman`.
#[derive(Debug, Clone)]
pub struct EngineCli {
    binary: PathBuf,
}

impl EngineCli {
    /// Wraps an engine executable at a known path.
    #[must_use]
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Locates `name` on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns an error if the executable cannot be found.
    pub fn locate(name: &str) -> Result<Self> {
        let binary = which::which(name).map_err(|e| DapperError::NotFound {
            kind: "container engine",
            id: format!("{name} ({e})"),
        })?;
        tracing::debug!(engine = %binary.display(), "engine located");
        Ok(Self::new(binary))
    }

    /// Path of the engine executable.
    #[must_use]
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Runs the engine with inherited stdio.
    fn exec(&self, args: &[OsString]) -> Result<()> {
        let command = self.display(args);
        tracing::debug!(%command, "running");
        let status = Command::new(&self.binary)
            .args(args)
            .status()
            .map_err(|e| DapperError::Io {
                path: self.binary.clone(),
                source: e,
            })?;
        if !status.success() {
            tracing::debug!(%command, %status, "engine command failed");
            return Err(DapperError::Engine {
                command,
                status: status.to_string(),
                stderr: None,
            });
        }
        Ok(())
    }

    /// Runs the engine and captures its standard output.
    ///
    /// Failures are returned, not logged; callers pick the level.
    fn capture(&self, args: &[OsString]) -> Result<Vec<u8>> {
        let command = self.display(args);
        tracing::debug!(%command, "running");
        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .map_err(|e| DapperError::Io {
                path: self.binary.clone(),
                source: e,
            })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            return Err(DapperError::Engine {
                command,
                status: output.status.to_string(),
                stderr: Some(stderr),
            });
        }
        Ok(output.stdout)
    }

    fn display(&self, args: &[OsString]) -> String {
        std::iter::once(self.binary.as_os_str())
            .chain(args.iter().map(OsString::as_os_str))
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn os_args<I, S>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    args.into_iter().map(Into::into).collect()
}

impl ContainerEngine for EngineCli {
    fn build(&self, tag: &ImageTag, definition: &Path) -> Result<()> {
        self.exec(&os_args([
            OsString::from("build"),
            "-t".into(),
            tag.as_str().into(),
            "-f".into(),
            definition.as_os_str().to_owned(),
            ".".into(),
        ]))
    }

    fn inspect_env(&self, tag: &ImageTag) -> Result<Vec<u8>> {
        self.capture(&os_args(["inspect", "-f", INSPECT_ENV_FORMAT, tag.as_str()]))
    }

    fn run(&self, args: &[String]) -> Result<()> {
        self.exec(&os_args(std::iter::once("run").chain(args.iter().map(String::as_str))))
    }

    fn remove(&self, name: &str) -> Result<()> {
        self.capture(&os_args(["rm", "-fv", name])).map(|_| ())
    }

    fn copy_out(&self, name: &str, path: &str) -> Result<()> {
        let source = format!("{name}:{path}");
        self.exec(&os_args(["cp", source.as_str(), "."]))
    }
}
