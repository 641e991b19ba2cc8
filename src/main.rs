// MI Agent - command-line bootstrap
//
// This is the main entry point for the application.

use anyhow::{Context, Result};
use clap::{ArgAction, ArgGroup, Parser};
use mi_agent::config::RunConfig;
use mi_agent::crash;
use mi_agent::env::{EnvStore, ProcessEnv};
use mi_agent::init::{init_environment, InitConfig};
use mi_agent::logging::{self, Verbosity};
use mi_agent::secrets::{NoPrompt, SecretPrompter, TerminalPrompter};
use std::io::IsTerminal;
use std::path::PathBuf;

/// MI Agent - train and run the MI estimator
#[derive(Parser, Debug)]
#[command(name = "mi-agent")]
#[command(version)]
#[command(about = "Run the MI agent with the given configuration", long_about = None)]
#[command(group(
    ArgGroup::new("verbosity")
        .args(["quiet", "verbose", "very_verbose"])
        .multiple(false)
))]
struct Cli {
    /// Path to config file
    #[arg(short, long, value_name = "PATH", value_parser = existing_path)]
    config: PathBuf,

    /// Only log warnings and errors (default)
    #[arg(long)]
    quiet: bool,

    /// Log informational messages; repeat (-vv) for debug output
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Log debug messages
    #[arg(long)]
    very_verbose: bool,

    /// Never prompt for missing secrets; fail instead
    #[arg(long)]
    no_prompt: bool,
}

fn existing_path(raw: &str) -> std::result::Result<PathBuf, String> {
    let path = PathBuf::from(raw);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("path '{}' does not exist", raw))
    }
}

fn prompter_for(cli: &Cli) -> Box<dyn SecretPrompter> {
    let interactive = !cli.no_prompt && std::io::stdin().is_terminal();
    if interactive {
        Box::new(TerminalPrompter)
    } else {
        log::debug!("Secret prompts disabled; missing secrets are errors");
        Box::new(NoPrompt)
    }
}

/// `on_env_ready` runs once the environment is fully initialized, before
/// the run configuration is read.
fn run(
    cli: &Cli,
    init_config: &InitConfig,
    env: &mut impl EnvStore,
    prompter: &mut dyn SecretPrompter,
    on_env_ready: impl FnOnce(),
) -> Result<()> {
    // Step 1: Secrets and tracing settings
    let report = init_environment(init_config, env, prompter)
        .context("Environment initialization failed")?;
    if !report.prompted.is_empty() {
        log::info!("Secrets entered interactively: {}", report.prompted.join(", "));
    }
    on_env_ready();

    // Step 2: Run configuration
    let config = RunConfig::from_file(&cli.config)
        .with_context(|| format!("Failed to load config from: {}", cli.config.display()))?;
    log::info!("Using configuration {}", config.path.display());
    log::debug!("Configuration keys: [{}]", config.keys().join(", "));

    // Step 3: Agent logic plugs in here
    log::debug!("Nothing to run");

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        Verbosity::from_flags(cli.verbose, cli.very_verbose)
    };
    if let Err(e) = logging::init_logging(verbosity) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    crash::install_panic_hook();

    // The SIGINT handler runs on its own thread: it must not exist while
    // secrets are still being prompted for and written to the environment.
    let result = InitConfig::from_current_dir().and_then(|init_config| {
        let mut prompter = prompter_for(&cli);
        run(
            &cli,
            &init_config,
            &mut ProcessEnv,
            prompter.as_mut(),
            crash::install_interrupt_handler,
        )
    });

    if let Err(e) = result {
        eprintln!("\nError: {:#}", e);
        std::process::exit(1);
    }
}
