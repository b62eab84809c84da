use std::path::Path;

use anyhow::Result;

pub const PUSH_ARGS: &[&str] = &["push"];

/// Push the current branch to its configured upstream.
///
/// Wraps `git push`.
pub fn push(workdir: &Path) -> Result<()> {
    super::run_git(workdir, PUSH_ARGS)
}
