pub mod git_commit;
pub mod git_push;

use std::borrow::Cow;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};

/// Run a git command in the given working directory.
/// On failure, returns an error containing stderr output.
pub fn run_git(workdir: &Path, args: &[&str]) -> Result<()> {
    run_git_stdout(workdir, args).map(|_| ())
}

/// Run a git command and return its stdout.
pub fn run_git_stdout(workdir: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .current_dir(workdir)
        .args(args)
        .output()
        .with_context(|| format!("Failed to run git {}", args.join(" ")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        // `git commit` reports "nothing to commit" on stdout.
        let detail = if stderr.trim().is_empty() { stdout } else { stderr };
        bail!("git {} failed:\n{}", args.join(" "), detail.trim_end());
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Check that a usable `git` is on PATH and return its (major, minor) version.
pub fn check_git_version() -> Result<(u32, u32)> {
    let output = Command::new("git")
        .arg("--version")
        .output()
        .context("Git is not installed or not on PATH")?;
    let version_str = String::from_utf8_lossy(&output.stdout);

    parse_git_version(&version_str)
        .with_context(|| format!("Could not parse Git version from: {}", version_str.trim()))
}

/// Parse "git version X.Y.Z..." into (major, minor).
fn parse_git_version(version_str: &str) -> Option<(u32, u32)> {
    let version_part = version_str.trim().strip_prefix("git version ")?;
    let mut parts = version_part.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    Some((major, minor))
}

/// Render a git invocation as a copy-pasteable shell line.
pub fn display_command(args: &[&str]) -> String {
    std::iter::once("git")
        .chain(args.iter().copied())
        .map(|a| shell_escape::unix::escape(Cow::Borrowed(a)))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "git_commands_test.rs"]
mod tests;
