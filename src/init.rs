//! Environment initialization for mi-agent.
//!
//! This module runs once at startup, before any agent code, and leaves the
//! process environment holding every secret the agent needs.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::env::EnvStore;
use crate::env_file::{load_env_file, locate_env_file, merge_into};
use crate::secrets::{apply_tracing_defaults, ensure_required_secrets, SecretPrompter};

/// Initialization configuration
#[derive(Debug, Clone)]
pub struct InitConfig {
    /// Directory where the `.env` search starts
    pub search_from: PathBuf,
}

impl InitConfig {
    /// Search from the current working directory.
    pub fn from_current_dir() -> Result<Self> {
        let search_from =
            std::env::current_dir().context("Failed to get current directory")?;
        Ok(Self { search_from })
    }
}

/// What initialization did. Holds variable names only, never values.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InitReport {
    /// Secrets file that was read, if one was located
    pub env_file: Option<PathBuf>,
    /// Keys set from the secrets file
    pub applied: Vec<String>,
    /// Keys in the secrets file that were already set
    pub skipped: Vec<String>,
    /// Required secrets obtained from the prompter
    pub prompted: Vec<String>,
}

/// Load the secrets file, fill in missing secrets and force tracing settings.
///
/// Steps, in order:
/// 1. Locate the secrets file (`MI_AGENT_ENV_FILE`, else nearest `.env`)
/// 2. Merge its pairs into `env` without overwriting
/// 3. Ask `prompter` for each required secret still missing
/// 4. Set the tracing variables
pub fn init_environment(
    config: &InitConfig,
    env: &mut impl EnvStore,
    prompter: &mut dyn SecretPrompter,
) -> Result<InitReport> {
    let mut report = InitReport::default();

    match locate_env_file(&*env, &config.search_from) {
        Some(path) if !path.exists() => {
            log::debug!("Secrets file {} does not exist, skipping", path.display());
            report.env_file = Some(path);
        }
        Some(path) => {
            let pairs = load_env_file(&path)?;
            let outcome = merge_into(env, pairs);
            log::info!(
                "Loaded secrets file {} ({} set, {} already present)",
                path.display(),
                outcome.applied.len(),
                outcome.skipped.len()
            );
            report.applied = outcome.applied;
            report.skipped = outcome.skipped;
            report.env_file = Some(path);
        }
        None => {
            log::debug!(
                "No secrets file found from {}",
                config.search_from.display()
            );
        }
    }

    report.prompted = ensure_required_secrets(env, prompter)?;
    apply_tracing_defaults(env);

    Ok(report)
}
