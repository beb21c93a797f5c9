//! Scoped environment overrides for configuration tests.

use std::env;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Applies environment overrides until dropped, then restores the old values.
///
/// Holding the guard serialises every test that touches the environment.
pub struct ScopedEnv {
    saved: Vec<(String, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl ScopedEnv {
    /// Sets (`Some`) or unsets (`None`) each variable for the guard lifetime.
    pub fn apply(overrides: &[(&str, Option<&str>)]) -> Self {
        let lock = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let saved = overrides
            .iter()
            .map(|&(key, value)| {
                let previous = env::var(key).ok();
                write_var(key, value);
                (key.to_owned(), previous)
            })
            .collect();
        Self { saved, _lock: lock }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (key, previous) in self.saved.drain(..).rev() {
            write_var(&key, previous.as_deref());
        }
    }
}

fn write_var(key: &str, value: Option<&str>) {
    // SAFETY: ENV_LOCK is held by the caller for every mutation.
    unsafe {
        match value {
            Some(text) => env::set_var(key, text),
            None => env::remove_var(key),
        }
    }
}
