// src/logging.rs

//! Logging-callback registration and diagnostic emission.
//!
//! The registry holds at most one callback at a time. With no callback
//! registered, diagnostics fall back to `tracing` so they are not lost
//! on hosts without a Java-side consumer.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{Error, Result};

/// Log levels as understood by the Java-side callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    None = 0,
    Error = 1,
    Warning = 2,
    Info = 3,
    Debug = 4,
    Verbose = 5,
    Epic = 6,
}

impl LogLevel {
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(LogLevel::None),
            1 => Some(LogLevel::Error),
            2 => Some(LogLevel::Warning),
            3 => Some(LogLevel::Info),
            4 => Some(LogLevel::Debug),
            5 => Some(LogLevel::Verbose),
            6 => Some(LogLevel::Epic),
            _ => None,
        }
    }

    pub fn raw(self) -> i32 {
        self as i32
    }
}

/// A sink for diagnostic lines.
///
/// Implementations must tolerate being called from any thread, including
/// threads the host runtime has never seen.
pub trait LogCallback: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);
}

/// Single-slot callback registration.
///
/// Each [`crate::SidhKex`] owns one registry, so independent instances
/// (a production dispatcher and a test one, say) never collide. The slot
/// is only locked to swap or clone the registration; the callback itself
/// always runs with the lock released, so a callback that re-enters the
/// crate cannot deadlock.
pub struct CallbackRegistry {
    slot: Mutex<Option<Arc<dyn LogCallback>>>,
}

impl CallbackRegistry {
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Register `callback` as the active sink.
    ///
    /// Fails with [`Error::CallbackAlreadyRegistered`] while another
    /// callback is active; the existing registration is kept. Replacing
    /// a live registration in place would race against an emit holding a
    /// reference to the old target, so the caller must disable first.
    pub fn enable(&self, callback: Arc<dyn LogCallback>) -> Result<()> {
        let mut slot = self.slot.lock();
        if slot.is_some() {
            return Err(Error::CallbackAlreadyRegistered);
        }
        *slot = Some(callback);
        Ok(())
    }

    /// Drop the active registration. Safe to call when nothing is
    /// registered.
    pub fn disable(&self) {
        // Take under the lock, drop after releasing it: the callback's
        // drop handler may need to call back into the host runtime.
        let dropped = self.slot.lock().take();
        drop(dropped);
    }

    pub fn is_enabled(&self) -> bool {
        self.slot.lock().is_some()
    }

    /// Format-and-forward primitive used for every diagnostic line.
    pub fn emit(&self, level: LogLevel, message: &str) {
        let callback = self.slot.lock().clone();
        match callback {
            Some(callback) => callback.log(level, message),
            None => match level {
                LogLevel::None => {}
                LogLevel::Error => tracing::error!(target: "sidh_kex", "{message}"),
                LogLevel::Warning => tracing::warn!(target: "sidh_kex", "{message}"),
                LogLevel::Info => tracing::info!(target: "sidh_kex", "{message}"),
                LogLevel::Debug => tracing::debug!(target: "sidh_kex", "{message}"),
                LogLevel::Verbose | LogLevel::Epic => {
                    tracing::trace!(target: "sidh_kex", "{message}")
                }
            },
        }
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}
