//! Process-wide [`Assets`] for code that cannot thread a context through.

use std::sync::{Mutex, MutexGuard};

use crate::assets::Assets;
use crate::config::AssetConfig;
use crate::error::{Error, Result};

static GLOBAL_ASSETS: Mutex<Option<Assets>> = Mutex::new(None);

fn lock() -> MutexGuard<'static, Option<Assets>> {
    GLOBAL_ASSETS.lock().unwrap_or_else(|e| e.into_inner())
}

/// Installs the global assets context.
///
/// # Errors
/// [`Error::AlreadyInitialized`] if a context is already installed.
pub fn init(config: AssetConfig) -> Result<()> {
    let mut slot = lock();
    if slot.is_some() {
        return Err(Error::AlreadyInitialized);
    }
    log::debug!("initializing global assets at {}", config.asset_root.display());
    *slot = Some(Assets::new(config));
    Ok(())
}

/// Drops the global context and everything it cached.
///
/// Returns false if nothing was installed.
pub fn shutdown() -> bool {
    let taken = lock().take();
    if taken.is_some() {
        log::debug!("global assets shut down");
    }
    taken.is_some()
}

pub fn is_initialized() -> bool {
    lock().is_some()
}

/// Runs `f` against the global context.
///
/// The global lock is held while `f` runs and it is not re-entrant: calling
/// `with_assets` or any of the crate's free functions (`load_image`, `text`,
/// `ninepatch`, ...) from inside `f` deadlocks. Use the `&mut Assets` handed to
/// `f` instead.
///
/// # Errors
/// [`Error::NotInitialized`] before [`init`] or after [`shutdown`], otherwise
/// whatever `f` returns.
pub fn with_assets<R>(f: impl FnOnce(&mut Assets) -> Result<R>) -> Result<R> {
    let mut slot = lock();
    let assets = slot.as_mut().ok_or(Error::NotInitialized)?;
    f(assets)
}
