//! Environment descriptor read from a built image.
//!
//! Images cooperate with Dapper through `DAPPER_*` variables in their
//! configured environment. After the primary build the engine reports that
//! environment as a JSON array of `KEY=VALUE` strings, which is parsed once
//! into an [`Environment`] and read-only afterwards.

use std::collections::BTreeMap;

use dapper_common::constants::{
    DEFAULT_CP, DEFAULT_SHELL, DEFAULT_SOURCE, KEY_CP, KEY_ENV, KEY_MODE, KEY_OUTPUT,
    KEY_RUN_ARGS, KEY_SHELL, KEY_SOCKET, KEY_SOURCE,
};
use dapper_common::error::{DapperError, Result};
use dapper_common::types::{ModeOverride, RunMode};

/// Typed view of the `DAPPER_*` keys of an image environment.
///
/// Absent keys stay `None` or empty; the accessors apply the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    mode: Option<String>,
    source: Option<String>,
    cp: Option<String>,
    socket: Option<String>,
    shell: Option<String>,
    env: Vec<String>,
    run_args: Vec<String>,
    output: Vec<String>,
}

impl Environment {
    /// Parses the raw output of `inspect -f '{{json .ContainerConfig.Env}}'`.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is empty, is not a JSON array of
    /// strings, or holds an entry with an empty key.
    pub fn from_inspect(payload: &[u8]) -> Result<Self> {
        if payload.iter().all(u8::is_ascii_whitespace) {
            return Err(DapperError::MalformedEnv {
                message: "inspect returned no output".into(),
            });
        }
        let entries: Vec<String> = serde_json::from_slice(payload)?;
        Self::from_entries(&entries)
    }

    /// Builds a descriptor from `KEY=VALUE` entries.
    ///
    /// An entry without `=` is a key with an empty value. When a key
    /// repeats, the last entry wins.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry has an empty key.
    pub fn from_entries<S: AsRef<str>>(entries: &[S]) -> Result<Self> {
        let mut vars = BTreeMap::new();
        for entry in entries {
            let entry = entry.as_ref();
            let (key, value) = entry.split_once('=').unwrap_or((entry, ""));
            if key.is_empty() {
                return Err(DapperError::MalformedEnv {
                    message: format!("entry '{entry}' has no key"),
                });
            }
            tracing::debug!(key, value, "reading env");
            let _ = vars.insert(key.to_string(), value.to_string());
        }

        let env = Self {
            mode: vars.remove(KEY_MODE),
            source: vars.remove(KEY_SOURCE),
            cp: vars.remove(KEY_CP),
            socket: vars.remove(KEY_SOCKET),
            shell: vars.remove(KEY_SHELL),
            env: split_list(vars.get(KEY_ENV)),
            run_args: split_list(vars.get(KEY_RUN_ARGS)),
            output: split_list(vars.get(KEY_OUTPUT)),
        };

        tracing::debug!(
            source = env.source(),
            cp = env.cp(),
            socket = env.socket(),
            mode = %env.mode(ModeOverride::Auto),
            shell = env.shell(),
            env = ?env.env,
            run_args = ?env.run_args,
            output = ?env.output,
            "environment descriptor"
        );
        Ok(env)
    }

    /// Resolves the run mode: a forced override wins, then `DAPPER_MODE`,
    /// then bind.
    #[must_use]
    pub fn mode(&self, over: ModeOverride) -> RunMode {
        if let Some(forced) = over.forced() {
            return forced;
        }
        match self.mode.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => RunMode::from_descriptor(value),
            _ => RunMode::Bind,
        }
    }

    /// Container path the workspace is bound or copied to.
    #[must_use]
    pub fn source(&self) -> &str {
        non_empty(self.source.as_deref()).unwrap_or(DEFAULT_SOURCE)
    }

    /// Host path, relative to the working directory, bound or copied in.
    #[must_use]
    pub fn cp(&self) -> &str {
        non_empty(self.cp.as_deref()).unwrap_or(DEFAULT_CP)
    }

    /// Whether the image asks for the engine control socket.
    #[must_use]
    pub fn socket(&self) -> bool {
        self.socket
            .as_deref()
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
    }

    /// Interactive shell used by `shell` sessions.
    #[must_use]
    pub fn shell(&self) -> &str {
        non_empty(self.shell.as_deref()).unwrap_or(DEFAULT_SHELL)
    }

    /// Extra variables forwarded with `-e`, in declaration order.
    #[must_use]
    pub fn env(&self) -> &[String] {
        &self.env
    }

    /// Extra engine `run` flags, in declaration order.
    #[must_use]
    pub fn run_args(&self) -> &[String] {
        &self.run_args
    }

    /// Container paths copied back to the host after a copy-mode run.
    #[must_use]
    pub fn output(&self) -> &[String] {
        &self.output
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn split_list(value: Option<&String>) -> Vec<String> {
    value
        .map(|v| v.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}
