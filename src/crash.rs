// MI Agent - Crash Handling Module
//
// This module installs the process-wide handlers used by the binary:
// - Panic hook (logs the panic with a full backtrace)
// - SIGINT (Ctrl+C), e.g. while a secret prompt is waiting

use std::backtrace::Backtrace;
use std::panic::PanicHookInfo;

/// Exit status used when the operator interrupts the process.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Render the crash report printed on panic.
pub fn panic_report(info: &PanicHookInfo<'_>, backtrace: &Backtrace) -> String {
    let message = info
        .payload()
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| info.payload().downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "<non-string panic payload>".to_string());

    let location = info
        .location()
        .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
        .unwrap_or_else(|| "<unknown location>".to_string());

    let thread = std::thread::current();
    let thread_name = thread.name().unwrap_or("<unnamed>");

    format!(
        "PANIC in thread '{}' at {}: {}\n\nBacktrace:\n{}",
        thread_name, location, message, backtrace
    )
}

/// Replace the default panic output with a logged, verbose report.
///
/// The backtrace is always captured, regardless of `RUST_BACKTRACE`.
///
/// # Example
/// ```no_run
/// use mi_agent::crash::install_panic_hook;
///
/// install_panic_hook();
/// ```
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let backtrace = Backtrace::force_capture();
        log::error!("Unrecoverable error: {}", info);
        eprintln!("\n{}", panic_report(info, &backtrace));
    }));
}

/// Exit cleanly with status 130 on Ctrl+C.
///
/// Spawns the handler thread, so call it only after secrets have been
/// prompted for and written to the environment. Until then Ctrl+C keeps
/// the default signal behavior.
///
/// # Example
/// ```no_run
/// use mi_agent::crash::install_interrupt_handler;
///
/// install_interrupt_handler();
/// ```
pub fn install_interrupt_handler() {
    if let Err(e) = ctrlc::set_handler(|| {
        log::warn!("Interrupted, exiting");
        eprintln!();
        std::process::exit(INTERRUPTED_EXIT_CODE);
    }) {
        log::warn!("Failed to set SIGINT handler: {}", e);
    }
}
