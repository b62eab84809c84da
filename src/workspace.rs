use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

/// Environment variable that overrides the data directory.
pub const DIR_ENV: &str = "CARDATA_DIR";

const CSV_FILE: &str = "cardata.csv";
const DATA_FILE: &str = "maintenance_data.json";
const CONFIG_FILE: &str = "maintenance_config.yaml";
const RULES_FILE: &str = "schedule_rules.yaml";

/// The data directory holding `cardata.csv` and the generated files.
///
/// Every file access and child process is anchored here, so the directory
/// the tool was started from never matters.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Resolve the data directory.
    ///
    /// Priority: explicit `dir` → `$CARDATA_DIR` → the directory containing
    /// the executable.
    pub fn resolve(dir: Option<PathBuf>) -> Result<Self> {
        let root = match dir {
            Some(dir) => dir,
            None => match std::env::var_os(DIR_ENV).filter(|v| !v.is_empty()) {
                Some(dir) => PathBuf::from(dir),
                None => exe_dir()?,
            },
        };
        Self::at(root)
    }

    /// Use `root` as the data directory. It must be an existing directory.
    pub fn at(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            bail!("Data directory does not exist: {}", root.display());
        }
        Ok(Workspace { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn csv_path(&self) -> PathBuf {
        self.root.join(CSV_FILE)
    }

    pub fn data_path(&self) -> PathBuf {
        self.root.join(DATA_FILE)
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn rules_path(&self) -> PathBuf {
        self.root.join(RULES_FILE)
    }
}

/// Directory of the running binary.
///
/// During `cargo test`, `current_exe()` is the test harness in
/// `target/<profile>/deps/`. The real `cardata` binary lives one level up,
/// so that directory is used when the binary is present there.
fn exe_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Could not locate the cardata executable")?;
    let parent = exe
        .parent()
        .context("Executable path has no parent directory")?;

    if parent.file_name().and_then(|n| n.to_str()) == Some("deps")
        && let Some(profile_dir) = parent.parent()
    {
        let bin_name = if cfg!(windows) {
            "cardata.exe"
        } else {
            "cardata"
        };
        if profile_dir.join(bin_name).exists() {
            return Ok(profile_dir.to_path_buf());
        }
    }

    Ok(parent.to_path_buf())
}

#[cfg(test)]
#[path = "workspace_test.rs"]
mod tests;
