//! Build/run session for one definition file.
//!
//! A session walks `build -> inspect -> (derived copy build) -> run`,
//! then copies declared outputs back and removes the container. Every
//! scoped resource (temporary definition file, ephemeral container) is
//! released on all exit paths.

use std::io::Write;
use std::path::{Path, PathBuf};

use dapper_common::config::SessionConfig;
use dapper_common::error::{DapperError, Result};
use dapper_common::types::{ImageTag, ModeOverride, RunMode};

use crate::args::{self, RunInvocation, RunRequest};
use crate::engine::{ContainerEngine, EngineCli};
use crate::environment::Environment;
use crate::guard::ContainerGuard;
use crate::host::HostContext;

/// An image ready to run, with the configuration read back from it.
#[derive(Debug, Clone)]
pub struct BuiltImage {
    /// Tag the image was built under.
    pub tag: ImageTag,
    /// Mode resolved from the caller's override and the image.
    pub mode: RunMode,
    /// Descriptor parsed from the image environment.
    pub env: Environment,
}

/// A one-shot session over a definition file.
///
/// `run`, `shell` and `build_only` consume the session.
#[derive(Debug)]
pub struct Dapperfile<E = EngineCli> {
    file: PathBuf,
    engine: E,
    host: HostContext,
    socket: bool,
}

impl Dapperfile<EngineCli> {
    /// Opens a session for the configured file, driving the configured
    /// engine executable.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or the engine cannot
    /// be found on `PATH`.
    pub fn lookup(config: &SessionConfig) -> Result<Self> {
        ensure_exists(&config.file)?;
        let engine = EngineCli::locate(&config.engine)?;
        let mut session = Self::with_engine(&config.file, engine, HostContext::detect())?;
        session.set_socket(config.socket);
        Ok(session)
    }
}

impl<E: ContainerEngine> Dapperfile<E> {
    /// Opens a session with an explicit engine and host context.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist.
    pub fn with_engine(file: impl Into<PathBuf>, engine: E, host: HostContext) -> Result<Self> {
        let file = file.into();
        ensure_exists(&file)?;
        Ok(Self {
            file,
            engine,
            host,
            socket: false,
        })
    }

    /// Forces engine socket passthrough. Only ever adds the mount.
    pub fn set_socket(&mut self, socket: bool) {
        self.socket = socket;
    }

    /// Definition file this session builds.
    #[must_use]
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Builds the image without running it.
    ///
    /// # Errors
    ///
    /// Returns an error if any build or the inspect step fails.
    pub fn build_only(self, mode: ModeOverride) -> Result<BuiltImage> {
        self.build(mode)
    }

    /// Builds the image, then runs its default command with `command_args`.
    ///
    /// In copy mode each declared output is copied to the working directory
    /// before the container is removed; the first failing copy is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if building, running or copying an output fails.
    pub fn run(self, mode: ModeOverride, command_args: &[String]) -> Result<()> {
        let built = self.build(mode)?;
        tracing::debug!(tag = %built.tag, "running build");

        let RunInvocation { name, args } = self.run_args(&built, None, command_args);
        let container = ContainerGuard::new(&self.engine, name);

        self.engine.run(&args)?;

        if built.mode != RunMode::Bind {
            for path in built.env.output() {
                tracing::info!(container = container.name(), path = %path, "copying output");
                self.engine.copy_out(container.name(), path)?;
            }
        }
        Ok(())
    }

    /// Builds the image and opens its shell in an auto-removed container.
    ///
    /// # Errors
    ///
    /// Returns an error if building fails or the shell exits unsuccessfully.
    pub fn shell(self, mode: ModeOverride, command_args: &[String]) -> Result<()> {
        let built = self.build(mode)?;
        tracing::debug!(tag = %built.tag, "running shell");

        let RunInvocation { args, .. } =
            self.run_args(&built, Some(built.env.shell()), command_args);
        let args: Vec<String> = std::iter::once("--rm".to_string()).chain(args).collect();

        self.engine.run(&args)
    }

    /// Builds the primary image, reads its environment and, outside bind
    /// mode, bakes the workspace into a derived image under the same tag.
    fn build(&self, mode: ModeOverride) -> Result<BuiltImage> {
        let tag = self.host.tag();
        tracing::debug!(tag = %tag, file = %self.file.display(), "building");
        self.engine.build(&tag, &self.file)?;

        let env = self.read_env(&tag)?;
        let mode = env.mode(mode);
        tracing::debug!(%mode, "resolved mode");

        if mode != RunMode::Bind {
            let content = format!("FROM {tag}\nCOPY {} {}", env.cp(), env.source());
            self.build_with_content(&tag, &content)?;
        }

        Ok(BuiltImage { tag, mode, env })
    }

    fn read_env(&self, tag: &ImageTag) -> Result<Environment> {
        let payload = self
            .engine
            .inspect_env(tag)
            .inspect_err(|e| tracing::error!(%tag, error = %e, "failed to inspect image"))?;
        Environment::from_inspect(&payload)
    }

    /// Builds `content` as a throwaway definition next to the source file.
    fn build_with_content(&self, tag: &ImageTag, content: &str) -> Result<()> {
        let dir = match self.file.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let prefix = self
            .file
            .file_name()
            .map_or_else(|| "Dockerfile".into(), |n| n.to_string_lossy().into_owned());

        let mut temp = tempfile::Builder::new()
            .prefix(&prefix)
            .tempfile_in(&dir)
            .map_err(|e| DapperError::Io {
                path: dir.clone(),
                source: e,
            })?;
        let temp_path = temp.path().to_path_buf();
        tracing::debug!(path = %temp_path.display(), "created tempfile");

        temp.write_all(content.as_bytes())
            .and_then(|()| temp.flush())
            .map_err(|e| DapperError::Io {
                path: temp_path.clone(),
                source: e,
            })?;

        let result = self.engine.build(tag, &temp_path);

        tracing::debug!(path = %temp_path.display(), "deleting tempfile");
        if let Err(e) = temp.close() {
            tracing::error!(path = %temp_path.display(), error = %e, "failed to delete tempfile");
        }
        result
    }

    fn run_args(
        &self,
        built: &BuiltImage,
        shell: Option<&str>,
        command_args: &[String],
    ) -> RunInvocation {
        let req = RunRequest {
            tag: &built.tag,
            mode: built.mode,
            env: &built.env,
            shell,
            command_args,
            socket_override: self.socket,
            host: &self.host,
        };
        args::run_args(&req, &args::random_suffix())
    }
}

fn ensure_exists(file: &Path) -> Result<()> {
    if file.is_file() {
        return Ok(());
    }
    Err(DapperError::NotFound {
        kind: "definition file",
        id: file.display().to_string(),
    })
}
