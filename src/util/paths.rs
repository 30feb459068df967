//! Locations of pawnav's files on disk.
//!
//! Everything lives under one data directory: `~/.pawnav`, unless startup
//! picked another one with `--data-dir`.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// The data directory chosen at startup
static ACTIVE: OnceLock<DataDir> = OnceLock::new();

/// File layout under a data directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `~/.pawnav`, or `.pawnav` in the working directory when there is no home
    pub fn home_default() -> Self {
        let home = dirs::home_dir().unwrap_or_default();
        Self::new(home.join(".pawnav"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    pub fn logs(&self) -> PathBuf {
        self.root.join("logs")
    }

    pub fn log_file(&self) -> PathBuf {
        self.logs().join("pawnav.log")
    }
}

/// Choose the data directory for this process. Call once, early in `main`.
///
/// Later calls keep the first choice and return it.
pub fn init_data_dir(custom_path: Option<PathBuf>) -> &'static DataDir {
    let requested = custom_path.map_or_else(DataDir::home_default, DataDir::new);
    let active = ACTIVE.get_or_init(|| requested.clone());
    if *active != requested {
        tracing::debug!(
            requested = %requested.root().display(),
            active = %active.root().display(),
            "Data directory already chosen"
        );
    }
    active
}

fn active() -> DataDir {
    ACTIVE.get().cloned().unwrap_or_else(DataDir::home_default)
}

pub fn config_path() -> PathBuf {
    active().config_file()
}
