//! Core infrastructure: fundamental types, constants and error handling.
//!
//! - [`types`]: variable kinds and index aliases
//! - [`constants`]: sentinel labels and configuration defaults
//! - [`error`]: the [`SplitError`] type and the crate [`Result`] alias

pub mod constants;
pub mod error;
pub mod types;

pub use constants::*;
pub use error::{Result, SplitError};
pub use types::*;

use std::sync::atomic::{AtomicBool, Ordering};

static CORE_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initialize logging for the crate.
///
/// Installs an `env_logger` backend when no logger is registered yet.
/// `RUST_LOG` controls verbosity and defaults to `info`. Calling this more
/// than once is harmless.
pub fn initialize_core() -> Result<()> {
    if CORE_INITIALIZED.load(Ordering::Acquire) {
        return Ok(());
    }

    let env = env_logger::Env::default().default_filter_or("info");
    // Another logger may already be installed by the host application.
    let _ = env_logger::Builder::from_env(env).try_init();

    CORE_INITIALIZED.store(true, Ordering::Release);
    log::debug!("ctree-split {} initialized", CTREE_SPLIT_VERSION);
    Ok(())
}

/// Check if the core module is initialized
pub fn is_core_initialized() -> bool {
    CORE_INITIALIZED.load(Ordering::Acquire)
}
