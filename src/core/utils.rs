use dirs::home_dir;
use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::{EngineError, Result};

const DEFAULT_DIR_NAME: &str = ".budget_engine";
const HOME_ENV: &str = "BUDGET_ENGINE_HOME";
const STATES_DIR: &str = "states";
const PROJECTIONS_DIR: &str = "projections";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Resolves the on-disk layout below the application data directory.
pub struct PathResolver;

impl PathResolver {
    /// `$BUDGET_ENGINE_HOME`, falling back to `~/.budget_engine`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn resolve_base(root: Option<PathBuf>) -> PathBuf {
        root.unwrap_or_else(Self::base_dir)
    }

    pub fn states_dir_in(base: &Path) -> PathBuf {
        base.join(STATES_DIR)
    }

    pub fn projections_dir_in(base: &Path) -> PathBuf {
        base.join(PROJECTIONS_DIR)
    }

    pub fn config_dir_in(base: &Path) -> PathBuf {
        base.join(CONFIG_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        Self::config_dir_in(base).join(CONFIG_FILE)
    }
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Writes `data` next to `path` and renames it into place. The temp file is
/// removed when any step fails.
pub fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    let written = write_file(&tmp, data)
        .and_then(|()| fs::rename(&tmp, path).map_err(EngineError::from));
    if written.is_err() && tmp.exists() {
        if let Err(err) = fs::remove_file(&tmp) {
            tracing::warn!(path = %tmp.display(), error = %err, "failed to remove temp file");
        }
    }
    written
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
