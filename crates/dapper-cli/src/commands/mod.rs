//! CLI command definitions and dispatch.

pub mod build;
pub mod run;
pub mod shell;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dapper_common::config::SessionConfig;
use dapper_common::constants::{DEFAULT_ENGINE, DEFAULT_FILE};
use dapper_common::types::ModeOverride;

/// Dapper — containerized build environments from a definition file.
#[derive(Parser, Debug)]
#[command(name = "dapper", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Build definition file.
    #[arg(short, long, global = true, env = "DAPPER_FILE", default_value = DEFAULT_FILE)]
    pub file: PathBuf,

    /// Run mode: auto, bind or cp.
    #[arg(short, long, global = true, env = "DAPPER_RUN_MODE", default_value = "auto")]
    pub mode: ModeOverride,

    /// Bind-mount the engine socket into the container.
    #[arg(short = 'k', long, global = true)]
    pub socket: bool,

    /// Container engine executable.
    #[arg(long, global = true, env = "DAPPER_ENGINE", default_value = DEFAULT_ENGINE)]
    pub engine: String,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub debug: bool,
}

impl Cli {
    /// Session configuration derived from the global flags.
    #[must_use]
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            file: self.file.clone(),
            engine: self.engine.clone(),
            mode: self.mode,
            socket: self.socket,
        }
    }
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the environment and run its default command.
    Run(run::RunArgs),
    /// Build the environment and open an interactive shell in it.
    Shell(shell::ShellArgs),
    /// Build the environment image and print its tag.
    Build,
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = cli.session_config();
    tracing::debug!(?config, "session configuration");
    match cli.command {
        Command::Run(args) => {
            forward_interrupts()?;
            run::execute(&config, &args)
        }
        Command::Shell(args) => {
            forward_interrupts()?;
            shell::execute(&config, &args)
        }
        Command::Build => build::execute(&config),
    }
}

/// Keeps the tool alive on Ctrl+C so the engine child, which receives
/// the same signal, can exit first and cleanup still runs.
fn forward_interrupts() -> anyhow::Result<()> {
    ctrlc::set_handler(|| tracing::debug!("interrupt received, waiting for engine to exit"))
        .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {e}"))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_constants() {
        let cli = Cli::try_parse_from(["dapper", "build"]).expect("parse");
        let config = cli.session_config();
        assert_eq!(config.file, PathBuf::from("Dockerfile.dapper"));
        assert_eq!(config.engine, "docker");
        assert_eq!(config.mode, ModeOverride::Auto);
        assert!(!config.socket);
    }

    #[test]
    fn run_passes_trailing_arguments_verbatim() {
        let cli = Cli::try_parse_from(["dapper", "-m", "cp", "-k", "run", "make", "-j4", "--keep-going"])
            .expect("parse");
        assert_eq!(cli.mode, ModeOverride::Copy);
        assert!(cli.socket);
        match cli.command {
            Command::Run(args) => assert_eq!(args.command, ["make", "-j4", "--keep-going"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["dapper", "-m", "mount", "build"]).is_err());
    }
}
