//! `dapper run` — Build the environment and run a one-shot container.

use clap::Args;
use dapper_common::config::SessionConfig;
use dapper_runtime::dapperfile::Dapperfile;

/// Arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Arguments appended after the image, handled by its entrypoint.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

/// Executes the `run` command.
///
/// # Errors
///
/// Returns an error if the session cannot start, the build fails, the
/// container exits unsuccessfully, or an output cannot be copied.
pub fn execute(config: &SessionConfig, args: &RunArgs) -> anyhow::Result<()> {
    let dapper = Dapperfile::lookup(config)?;
    dapper.run(config.mode, &args.command)?;
    Ok(())
}
