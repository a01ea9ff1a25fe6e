//! `dapper build` — Build the environment image only.

use std::io::Write;

use dapper_common::config::SessionConfig;
use dapper_runtime::dapperfile::Dapperfile;

/// Executes the `build` command, printing the tag on stdout.
///
/// # Errors
///
/// Returns an error if the session cannot start or a build fails.
pub fn execute(config: &SessionConfig) -> anyhow::Result<()> {
    let dapper = Dapperfile::lookup(config)?;
    let built = dapper.build_only(config.mode)?;
    tracing::info!(tag = %built.tag, mode = %built.mode, "image built");
    writeln!(std::io::stdout(), "{}", built.tag)?;
    Ok(())
}
