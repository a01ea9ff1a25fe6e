//! `dapper shell` — Open an interactive shell in the environment.

use clap::Args;
use dapper_common::config::SessionConfig;
use dapper_runtime::dapperfile::Dapperfile;

/// Arguments for the `shell` command.
#[derive(Args, Debug)]
pub struct ShellArgs {
    /// Arguments for the shell; without any it reads commands from stdin.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

/// Executes the `shell` command.
///
/// # Errors
///
/// Returns an error if the session cannot start, the build fails, or the
/// shell exits unsuccessfully.
pub fn execute(config: &SessionConfig, args: &ShellArgs) -> anyhow::Result<()> {
    let dapper = Dapperfile::lookup(config)?;
    dapper.shell(config.mode, &args.command)?;
    Ok(())
}
