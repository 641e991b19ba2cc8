//! Secrets file discovery and loading.
//!
//! The secrets file is a dotenv file (`KEY=VALUE` per line). Its location is
//! taken from `MI_AGENT_ENV_FILE` when set, otherwise the nearest `.env` in
//! the start directory or one of its ancestors is used.
//!
//! Values from the file never replace variables that are already present
//! in the environment.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::env::EnvStore;

/// Environment variable that overrides the secrets file location.
pub const ENV_FILE_VAR: &str = "MI_AGENT_ENV_FILE";

/// Conventional secrets file name searched for in ancestor directories.
pub const ENV_FILE_NAME: &str = ".env";

/// Result of merging a secrets file into an environment.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Keys that were set from the file.
    pub applied: Vec<String>,
    /// Keys left untouched because they were already present.
    pub skipped: Vec<String>,
}

/// Determine which secrets file to load, if any.
///
/// The override variable wins even when it points at a missing file, so a
/// typo in `MI_AGENT_ENV_FILE` never silently picks up some other `.env`.
pub fn locate_env_file(env: &impl EnvStore, start_dir: &Path) -> Option<PathBuf> {
    // Whitespace-only counts as unset and falls back to the `.env` search
    // instead of naming a (missing) file called "  ".
    if let Some(raw) = env.get(ENV_FILE_VAR).filter(|v| !v.trim().is_empty()) {
        let path = expand_path(raw.trim(), start_dir);
        log::debug!("Using secrets file from ${}: {}", ENV_FILE_VAR, path.display());
        return Some(path);
    }

    find_env_file(start_dir)
}

/// Search `start_dir` and its ancestors for a `.env` file.
pub fn find_env_file(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .map(|dir| dir.join(ENV_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Expand a leading `~` and resolve relative paths against `base`.
pub fn expand_path(raw: &str, base: &Path) -> PathBuf {
    let expanded = if raw == "~" {
        dirs::home_dir()
    } else if let Some(rest) = raw.strip_prefix("~/") {
        dirs::home_dir().map(|home| home.join(rest))
    } else {
        None
    };

    let path = expanded.unwrap_or_else(|| PathBuf::from(raw));
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Parse a secrets file into ordered `(key, value)` pairs.
///
/// Keys are unique: when a key repeats, its last value wins and it keeps the
/// position of its first occurrence. A missing file yields no pairs.
/// Anything that is present but cannot be read or parsed is an error.
pub fn load_env_file(path: &Path) -> Result<Vec<(String, String)>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let iter = dotenvy::from_path_iter(path)
        .with_context(|| format!("Failed to open secrets file: {:?}", path))?;

    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for item in iter {
        let (key, value) =
            item.with_context(|| format!("Failed to parse secrets file: {:?}", path))?;
        match positions.get(&key) {
            Some(&index) => pairs[index].1 = value,
            None => {
                positions.insert(key.clone(), pairs.len());
                pairs.push((key, value));
            }
        }
    }

    Ok(pairs)
}

/// Merge pairs into `env` without overwriting anything already present.
///
/// Expects unique keys, as returned by [`load_env_file`].
pub fn merge_into(env: &mut impl EnvStore, pairs: Vec<(String, String)>) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();

    for (key, value) in pairs {
        if env.contains(&key) {
            log::debug!("Keeping existing value for {}", key);
            outcome.skipped.push(key);
        } else {
            env.set(&key, &value);
            outcome.applied.push(key);
        }
    }

    outcome
}
