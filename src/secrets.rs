//! Required secrets and how missing ones are obtained.
//!
//! # Security
//!
//! - **Hidden input**: terminal prompts never echo what is typed
//! - **NO secret logging**: only variable names are ever logged

use anyhow::{Context, Result};
use dialoguer::Password;

use crate::env::EnvStore;

/// Credentials that must be present before the agent runs.
pub const REQUIRED_SECRETS: [&str; 2] = ["OPENAI_API_KEY", "LANGCHAIN_API_KEY"];

/// Variables forced on every run to enable LangChain tracing.
pub const TRACING_DEFAULTS: [(&str, &str); 2] = [
    ("LANGCHAIN_TRACING_V2", "true"),
    ("LANGCHAIN_PROJECT", "MI-Agent"),
];

/// Source of values for secrets missing from the environment.
pub trait SecretPrompter {
    /// Obtain a value for `name`. Blocks until one is available.
    fn prompt(&mut self, name: &str) -> Result<String>;
}

/// Asks the operator on the terminal, with input hidden.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl SecretPrompter for TerminalPrompter {
    fn prompt(&mut self, name: &str) -> Result<String> {
        Password::new()
            .with_prompt(name)
            .allow_empty_password(true)
            .interact()
            .with_context(|| format!("Failed to read {} from the terminal", name))
    }
}

/// Never prompts; a missing secret is an error.
#[derive(Debug, Default)]
pub struct NoPrompt;

impl SecretPrompter for NoPrompt {
    fn prompt(&mut self, name: &str) -> Result<String> {
        anyhow::bail!(
            "{} is not set. Export it or add it to the secrets file (see ${}).",
            name,
            crate::env_file::ENV_FILE_VAR
        )
    }
}

/// Make sure `name` has a value, prompting for it if needed.
///
/// Returns `true` when the prompter was asked.
pub fn ensure_secret(
    env: &mut impl EnvStore,
    name: &str,
    prompter: &mut dyn SecretPrompter,
) -> Result<bool> {
    if env.is_set(name) {
        return Ok(false);
    }

    log::info!("{} is not set, requesting it", name);
    let value = prompter.prompt(name)?;
    env.set(name, &value);
    Ok(true)
}

/// Ensure every entry of [`REQUIRED_SECRETS`], in order.
///
/// Returns the names that had to be prompted for.
pub fn ensure_required_secrets(
    env: &mut impl EnvStore,
    prompter: &mut dyn SecretPrompter,
) -> Result<Vec<String>> {
    let mut prompted = Vec::new();

    for name in REQUIRED_SECRETS {
        if ensure_secret(env, name, prompter)? {
            prompted.push(name.to_string());
        }
    }

    Ok(prompted)
}

/// Force the tracing variables, replacing whatever was there.
pub fn apply_tracing_defaults(env: &mut impl EnvStore) {
    for (key, value) in TRACING_DEFAULTS {
        env.set(key, value);
    }
}
