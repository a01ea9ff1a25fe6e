//! Assembly of the engine `run` argument list.

use dapper_common::constants::{ENGINE_SOCKET, GID_VAR, UID_VAR};
use dapper_common::types::{ImageTag, RunMode};

use crate::environment::Environment;
use crate::host::HostContext;

/// Everything that decides how a container is started.
#[derive(Debug, Clone, Copy)]
pub struct RunRequest<'a> {
    /// Image to run.
    pub tag: &'a ImageTag,
    /// Resolved run mode.
    pub mode: RunMode,
    /// Descriptor read from the built image.
    pub env: &'a Environment,
    /// Entrypoint override for interactive shells.
    pub shell: Option<&'a str>,
    /// Arguments supplied by the caller after the image.
    pub command_args: &'a [String],
    /// Force socket passthrough regardless of the descriptor.
    pub socket_override: bool,
    /// Host identity and working directory.
    pub host: &'a HostContext,
}

/// A generated container name and the arguments following `run`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunInvocation {
    /// Name passed with `--name`, used again for cleanup and copies.
    pub name: String,
    /// Arguments for the engine `run` subcommand.
    pub args: Vec<String>,
}

/// Returns a short random suffix for container names.
#[must_use]
pub fn random_suffix() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(12);
    id
}

/// Builds the `run` arguments for a request.
///
/// Only the container name depends on `suffix`; the rest is a pure
/// function of the request.
#[must_use]
pub fn run_args(req: &RunRequest<'_>, suffix: &str) -> RunInvocation {
    let name = format!("{}-{suffix}", req.tag.prefix());
    let mut args: Vec<String> = vec!["-i".into(), "--name".into(), name.clone()];

    if req.host.tty {
        args.push("-t".into());
    }

    if req.env.socket() || req.socket_override {
        args.push("-v".into());
        args.push(format!("{ENGINE_SOCKET}:{ENGINE_SOCKET}"));
    }

    if req.mode == RunMode::Bind {
        if let Some(cwd) = &req.host.cwd {
            args.push("-v".into());
            args.push(format!("{}/{}:{}", cwd.display(), req.env.cp(), req.env.source()));
        }
    }

    if let Some(uid) = req.host.uid {
        args.push("-e".into());
        args.push(format!("{UID_VAR}={uid}"));
    }
    if let Some(gid) = req.host.gid {
        args.push("-e".into());
        args.push(format!("{GID_VAR}={gid}"));
    }

    for var in req.env.env() {
        args.push("-e".into());
        args.push(var.clone());
    }

    if let Some(shell) = req.shell {
        args.push("--entrypoint".into());
        args.push(shell.to_string());
        args.push("-e".into());
        args.push("TERM".into());
    }

    args.extend(req.env.run_args().iter().cloned());
    args.push(req.tag.to_string());

    if req.shell.is_some() && req.command_args.is_empty() {
        args.push("-".into());
    } else {
        args.extend(req.command_args.iter().cloned());
    }

    RunInvocation { name, args }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn host(tty: bool) -> HostContext {
        HostContext {
            cwd: Some(PathBuf::from("/work/proj")),
            branch: None,
            uid: Some(1000),
            gid: Some(100),
            tty,
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    fn has_pair(args: &[String], flag: &str, value: &str) -> bool {
        args.windows(2).any(|w| w[0] == flag && w[1] == value)
    }

    #[test]
    fn bind_mode_batch_run_layout() {
        let tag = ImageTag::new("proj:main");
        let env = Environment::from_entries(&["DAPPER_SOURCE=/src", "DAPPER_ENV=A B=1"]).unwrap();
        let host = host(false);
        let cmd = strings(&["make", "ci"]);
        let inv = run_args(
            &RunRequest {
                tag: &tag,
                mode: RunMode::Bind,
                env: &env,
                shell: None,
                command_args: &cmd,
                socket_override: false,
                host: &host,
            },
            "abc",
        );

        assert_eq!(inv.name, "proj-abc");
        assert_eq!(
            inv.args,
            strings(&[
                "-i",
                "--name",
                "proj-abc",
                "-v",
                "/work/proj/.:/src",
                "-e",
                "DAPPER_UID=1000",
                "-e",
                "DAPPER_GID=100",
                "-e",
                "A",
                "-e",
                "B=1",
                "proj:main",
                "make",
                "ci",
            ])
        );
    }

    #[test]
    fn copy_mode_has_no_bind_mount() {
        let tag = ImageTag::new("proj");
        let env = Environment::default();
        let host = host(false);
        let inv = run_args(
            &RunRequest {
                tag: &tag,
                mode: RunMode::Copy,
                env: &env,
                shell: None,
                command_args: &[],
                socket_override: false,
                host: &host,
            },
            "x",
        );
        assert!(!inv.args.iter().any(|a| a == "-v"));
    }

    #[test]
    fn socket_mount_is_or_of_descriptor_and_override() {
        let tag = ImageTag::new("proj");
        let host = host(false);
        let plain = Environment::default();
        let wants = Environment::from_entries(&["DAPPER_DOCKER_SOCKET=true"]).unwrap();
        let socket = "/var/run/docker.sock:/var/run/docker.sock";

        for (env, over, expected) in [
            (&plain, false, false),
            (&plain, true, true),
            (&wants, false, true),
            (&wants, true, true),
        ] {
            let inv = run_args(
                &RunRequest {
                    tag: &tag,
                    mode: RunMode::Copy,
                    env,
                    shell: None,
                    command_args: &[],
                    socket_override: over,
                    host: &host,
                },
                "x",
            );
            assert_eq!(has_pair(&inv.args, "-v", socket), expected);
        }
    }

    #[test]
    fn unknown_identity_is_not_forwarded() {
        let tag = ImageTag::new("proj");
        let env = Environment::default();
        let host = HostContext {
            uid: None,
            gid: None,
            ..host(false)
        };
        let inv = run_args(
            &RunRequest {
                tag: &tag,
                mode: RunMode::Copy,
                env: &env,
                shell: None,
                command_args: &[],
                socket_override: false,
                host: &host,
            },
            "x",
        );
        assert_eq!(inv.args, strings(&["-i", "--name", "proj-x", "proj"]));
    }

    #[test]
    fn tty_flag_follows_stdin() {
        let tag = ImageTag::new("proj");
        let env = Environment::default();
        for tty in [true, false] {
            let host = host(tty);
            let inv = run_args(
                &RunRequest {
                    tag: &tag,
                    mode: RunMode::Copy,
                    env: &env,
                    shell: None,
                    command_args: &[],
                    socket_override: false,
                    host: &host,
                },
                "x",
            );
            assert_eq!(inv.args.iter().any(|a| a == "-t"), tty);
        }
    }

    #[test]
    fn shell_without_command_reads_stdin() {
        let tag = ImageTag::new("proj");
        let env = Environment::from_entries(&["DAPPER_RUN_ARGS=--privileged"]).unwrap();
        let host = host(true);
        let inv = run_args(
            &RunRequest {
                tag: &tag,
                mode: RunMode::Copy,
                env: &env,
                shell: Some("/bin/sh"),
                command_args: &[],
                socket_override: false,
                host: &host,
            },
            "x",
        );
        assert!(has_pair(&inv.args, "--entrypoint", "/bin/sh"));
        assert!(has_pair(&inv.args, "-e", "TERM"));
        assert_eq!(
            inv.args[inv.args.len() - 3..],
            strings(&["--privileged", "proj", "-"])
        );
    }

    #[test]
    fn shell_with_command_passes_it_verbatim() {
        let tag = ImageTag::new("proj");
        let env = Environment::default();
        let host = host(false);
        let cmd = strings(&["echo", "hi"]);
        let inv = run_args(
            &RunRequest {
                tag: &tag,
                mode: RunMode::Copy,
                env: &env,
                shell: Some("/bin/bash"),
                command_args: &cmd,
                socket_override: false,
                host: &host,
            },
            "x",
        );
        let tag_pos = inv.args.iter().position(|a| a == "proj").unwrap();
        assert_eq!(inv.args[tag_pos + 1..], cmd[..]);
    }

    #[test]
    fn same_request_same_args_apart_from_name() {
        let tag = ImageTag::new("proj:dev");
        let env = Environment::from_entries(&["DAPPER_OUTPUT=bin"]).unwrap();
        let host = host(false);
        let req = RunRequest {
            tag: &tag,
            mode: RunMode::Bind,
            env: &env,
            shell: None,
            command_args: &[],
            socket_override: true,
            host: &host,
        };
        let a = run_args(&req, &random_suffix());
        let b = run_args(&req, &random_suffix());
        assert_ne!(a.name, b.name);
        assert_eq!(a.args[3..], b.args[3..]);
        assert_eq!(run_args(&req, "fixed"), run_args(&req, "fixed"));
    }

    #[test]
    fn random_suffix_is_short_hex() {
        let suffix = random_suffix();
        assert_eq!(suffix.len(), 12);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
