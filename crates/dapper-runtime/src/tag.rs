//! Image tag derivation.
//!
//! The tag is `<directory>:<branch>`, so rebuilding the same project on
//! the same branch overwrites the same image.

use std::path::Path;
use std::process::Command;

use dapper_common::constants::UNKNOWN_TAG;
use dapper_common::types::ImageTag;

/// Derives the image tag from a working directory and a raw branch lookup.
///
/// The branch is trimmed; without one the tag is just the directory name.
#[must_use]
pub fn derive_tag(cwd: Option<&Path>, branch: Option<&str>) -> ImageTag {
    let base = cwd
        .and_then(Path::file_name)
        .map_or_else(|| UNKNOWN_TAG.to_string(), |n| n.to_string_lossy().into_owned());

    match branch {
        Some(branch) => ImageTag::new(format!("{base}:{}", branch.trim())),
        None => ImageTag::new(base),
    }
}

/// Returns the raw output of `git rev-parse --abbrev-ref HEAD`, or `None`
/// if git is missing or the lookup fails.
#[must_use]
pub fn current_branch() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--abbrev-ref", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        tracing::debug!(status = %output.status, "no branch for tag");
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_without_branch_is_directory_name() {
        let tag = derive_tag(Some(Path::new("/home/me/proj")), None);
        assert_eq!(tag.as_str(), "proj");
    }

    #[test]
    fn tag_with_branch_trims_newline() {
        let tag = derive_tag(Some(Path::new("/home/me/proj")), Some("main\n"));
        assert_eq!(tag.as_str(), "proj:main");
    }

    #[test]
    fn unreadable_cwd_falls_back() {
        let tag = derive_tag(None, None);
        assert_eq!(tag.as_str(), "dapper-unknown");
        let tag = derive_tag(None, Some(" dev "));
        assert_eq!(tag.as_str(), "dapper-unknown:dev");
    }

    #[test]
    fn root_directory_has_no_name() {
        let tag = derive_tag(Some(Path::new("/")), None);
        assert_eq!(tag.as_str(), "dapper-unknown");
    }
}
