//! System-wide constants, descriptor key names and defaults.

/// Default build definition file looked up in the working directory.
pub const DEFAULT_FILE: &str = "Dockerfile.dapper";

/// Default container engine executable.
pub const DEFAULT_ENGINE: &str = "docker";

/// Tag base name used when the working directory cannot be read.
pub const UNKNOWN_TAG: &str = "dapper-unknown";

/// Engine control socket, mounted at the same path inside the container.
pub const ENGINE_SOCKET: &str = "/var/run/docker.sock";

/// Go template handed to `inspect` to extract the image environment.
pub const INSPECT_ENV_FORMAT: &str = "{{json .ContainerConfig.Env}}";

/// Descriptor key selecting `bind` or copy mode.
pub const KEY_MODE: &str = "DAPPER_MODE";
/// Descriptor key for the container-side workspace path.
pub const KEY_SOURCE: &str = "DAPPER_SOURCE";
/// Descriptor key for the host-relative path bound or copied in.
pub const KEY_CP: &str = "DAPPER_CP";
/// Descriptor key requesting engine socket passthrough.
pub const KEY_SOCKET: &str = "DAPPER_DOCKER_SOCKET";
/// Descriptor key naming the interactive shell.
pub const KEY_SHELL: &str = "DAPPER_SHELL";
/// Descriptor key listing extra variables to forward.
pub const KEY_ENV: &str = "DAPPER_ENV";
/// Descriptor key listing extra engine `run` flags.
pub const KEY_RUN_ARGS: &str = "DAPPER_RUN_ARGS";
/// Descriptor key listing container paths copied back after a run.
pub const KEY_OUTPUT: &str = "DAPPER_OUTPUT";

/// Default container-side workspace path.
pub const DEFAULT_SOURCE: &str = "/source/";
/// Default host-relative path bound or copied into the container.
pub const DEFAULT_CP: &str = ".";
/// Default interactive shell.
pub const DEFAULT_SHELL: &str = "/bin/bash";

/// Variable carrying the invoking user's numeric uid.
pub const UID_VAR: &str = "DAPPER_UID";
/// Variable carrying the invoking user's numeric gid.
pub const GID_VAR: &str = "DAPPER_GID";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "dapper";
