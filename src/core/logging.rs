//! Logging initialization and utilities

/// Initialize the logging system
///
/// Uses env_logger with default filter level of `info`.
/// Override with RUST_LOG environment variable (e.g. `RUST_LOG=kodama=debug`
/// to see per-rebuild mesh statistics).
///
/// # Example
/// ```no_run
/// kodama::core::logging::init();
/// log::info!("Tree planted");
/// ```
pub fn init() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();
}
