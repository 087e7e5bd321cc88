use tracing::Level;

/// Installs the global fmt subscriber. Lambda stamps each line itself, so
/// timestamps are left out. Calling this again after a subscriber is set is a no-op.
pub fn init_logger(level: Level) {
    let installed = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .try_init()
        .is_ok();

    if !installed {
        tracing::debug!("Global subscriber already set, keeping it");
    }
}
