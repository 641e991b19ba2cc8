//! MI Agent - command-line bootstrap for the MI agent project.
//!
//! This library loads secrets from a `.env` file into the process
//! environment, solicits missing credentials, configures logging and
//! installs the crash handler used by the `mi-agent` binary.

pub mod env;
pub mod env_file;
pub mod secrets;
pub mod init;
pub mod config;
pub mod logging;
pub mod crash;
