//! Logging setup
//!
//! The library only emits `tracing` events. Hosts that have no subscriber
//! of their own can install a plain formatter here.

use tracing::Level;
use tracing_subscriber::fmt;

/// Install a global fmt subscriber. Debug level when `verbose`, warnings
/// otherwise. Does nothing if a subscriber is already set.
pub fn init(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = fmt()
        .with_max_level(level)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .try_init();
}
