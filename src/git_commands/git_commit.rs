use std::path::Path;

use anyhow::Result;

/// Stage specific files.
///
/// Wraps `git add -- <files>`.
pub fn stage_files(workdir: &Path, files: &[&str]) -> Result<()> {
    super::run_git(workdir, &stage_args(files))
}

/// Commit only `files`, leaving anything else in the index staged.
///
/// Wraps `git commit -m <message> -- <files>`.
pub fn commit(workdir: &Path, message: &str, files: &[&str]) -> Result<()> {
    super::run_git(workdir, &commit_args(message, files))
}

pub fn stage_args<'a>(files: &[&'a str]) -> Vec<&'a str> {
    let mut args = vec!["add", "--"];
    args.extend(files);
    args
}

pub fn commit_args<'a>(message: &'a str, files: &[&'a str]) -> Vec<&'a str> {
    let mut args = vec!["commit", "-m", message, "--"];
    args.extend(files);
    args
}
