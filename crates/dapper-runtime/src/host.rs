//! Facts about the invoking process that shape a run.

use std::io::IsTerminal;
use std::path::PathBuf;

use dapper_common::types::ImageTag;

/// Host-side inputs to tag derivation and run-argument assembly.
///
/// Gathered once per session so the rest of the pipeline stays pure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostContext {
    /// Current working directory, if it could be read.
    pub cwd: Option<PathBuf>,
    /// Raw version-control branch lookup output, if any.
    pub branch: Option<String>,
    /// Numeric user id of the invoking user, where the platform has one.
    pub uid: Option<u32>,
    /// Numeric group id of the invoking user, where the platform has one.
    pub gid: Option<u32>,
    /// Whether standard input is attached to a terminal.
    pub tty: bool,
}

impl HostContext {
    /// Inspects the current process.
    #[must_use]
    pub fn detect() -> Self {
        let (uid, gid) = identity();
        let ctx = Self {
            cwd: std::env::current_dir().ok(),
            branch: crate::tag::current_branch(),
            uid,
            gid,
            tty: std::io::stdin().is_terminal(),
        };
        tracing::debug!(cwd = ?ctx.cwd, branch = ?ctx.branch, ?uid, ?gid, tty = ctx.tty, "host context");
        ctx
    }

    /// Tag for images built from this host context.
    #[must_use]
    pub fn tag(&self) -> ImageTag {
        crate::tag::derive_tag(self.cwd.as_deref(), self.branch.as_deref())
    }
}

#[cfg(unix)]
fn identity() -> (Option<u32>, Option<u32>) {
    use nix::unistd::{getgid, getuid};

    (Some(getuid().as_raw()), Some(getgid().as_raw()))
}

/// No numeric identity outside unix; nothing is forwarded.
#[cfg(not(unix))]
const fn identity() -> (Option<u32>, Option<u32>) {
    (None, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_reads_working_directory() {
        let ctx = HostContext::detect();
        assert_eq!(ctx.cwd, std::env::current_dir().ok());
    }

    #[cfg(unix)]
    #[test]
    fn detect_reads_numeric_identity() {
        let ctx = HostContext::detect();
        assert_eq!(ctx.uid, Some(nix::unistd::getuid().as_raw()));
        assert_eq!(ctx.gid, Some(nix::unistd::getgid().as_raw()));
    }

    #[test]
    fn tag_uses_cwd_and_branch() {
        let ctx = HostContext {
            cwd: Some(PathBuf::from("/work/proj")),
            branch: Some("release/1.0\n".into()),
            uid: Some(1000),
            gid: Some(1000),
            tty: false,
        };
        assert_eq!(ctx.tag().as_str(), "proj:release/1.0");
    }
}
