// src/error.rs

//! Error types for sidh-kex operations.

use thiserror::Error;

use crate::variant::SidhVariant;

/// Errors that can occur while dispatching a key-exchange operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested variant has no backing engine. The compressed
    /// variants always resolve here; a live variant resolves here when
    /// no engine was bound for it.
    #[error("unsupported SIDH variant {0:?}")]
    UnsupportedVariant(SidhVariant),

    /// A caller-supplied buffer does not have the exact length the
    /// registry prescribes for its field. The engine is never invoked
    /// with such a buffer.
    #[error("{field} length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The arithmetic engine reported a non-zero status.
    #[error("{operation}: engine reported status {status}")]
    EngineFailure {
        operation: &'static str,
        status: i32,
    },

    /// A logging callback is already registered. Disable it before
    /// enabling another one.
    #[error("a logging callback is already registered")]
    CallbackAlreadyRegistered,
}

/// Type alias for results in sidh-kex.
pub type Result<T> = core::result::Result<T, Error>;
