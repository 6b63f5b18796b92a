// src/lib.rs

//! # sidh-kex
//!
//! Parameterized ephemeral SIDH (supersingular-isogeny Diffie-Hellman)
//! key exchange over the four standard parameter sets, dispatching to
//! pluggable per-level arithmetic engines, with JNI bindings for
//! Java/Android callers.
//!
//! Currently provides:
//! - `SidhVariant`: the P434/P503/P610/P751 selectors (plus reserved
//!   compressed selectors, which are permanently unsupported) and their
//!   field-length metadata
//! - `SidhKex`: the six-operation key-exchange facade with buffer
//!   validation in front of every engine call
//! - `CallbackRegistry`: single-slot logging-callback registration with
//!   a `tracing` fallback
//! - `Java_sidhjava_SidhNative_*` exports (feature `jni`)
//! - upstream engine bindings (feature `libsidh`) and a deterministic
//!   [`mock::MockEngine`] for tests
//!
//! ```
//! use std::sync::Arc;
//! use sidh_kex::{mock::MockEngine, SidhEngine, SidhKex, SidhVariant};
//!
//! let kex = SidhKex::with_engines(SidhVariant::LIVE.iter().filter_map(|&v| {
//!     MockEngine::for_variant(v).map(|e| (v, Arc::new(e) as Arc<dyn SidhEngine>))
//! }));
//!
//! let lengths = kex.field_lengths(SidhVariant::P434).unwrap();
//! let mut private_a = vec![0u8; lengths.private_key_a];
//! kex.random_mod_order_a(SidhVariant::P434, &mut private_a)?;
//! # Ok::<(), sidh_kex::Error>(())
//! ```

pub mod dispatch;
pub mod engine;
pub mod error;
pub mod logging;
pub mod mock;
pub mod variant;

#[cfg(feature = "jni")]
pub mod android;
#[cfg(feature = "libsidh")]
pub mod pqsidh;

pub use dispatch::SidhKex;
pub use engine::{EngineError, SidhEngine};
pub use error::{Error, Result};
pub use logging::{CallbackRegistry, LogCallback, LogLevel};
pub use variant::{FieldLengths, SidhVariant};
