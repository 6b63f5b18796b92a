// src/engine.rs

//! The seam between the dispatch layer and a per-level arithmetic engine.

use core::fmt;

use crate::variant::FieldLengths;

/// Non-zero status reported by an arithmetic engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineError {
    status: i32,
}

impl EngineError {
    pub fn new(status: i32) -> Self {
        Self { status }
    }

    pub fn status(&self) -> i32 {
        self.status
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "engine status {}", self.status)
    }
}

impl std::error::Error for EngineError {}

/// One parameter set's arithmetic engine.
///
/// Every buffer an implementation receives is already exactly the length
/// given by [`SidhEngine::field_lengths`]; length validation happens once
/// in the dispatch layer and is not repeated here. Implementations only
/// write into the caller-supplied output slices and keep no state across
/// calls, so a single engine instance may serve any number of threads.
///
/// Sampling is infallible by contract: a correctly seeded randomness
/// source that fails is a fatal process-level condition, not something an
/// engine reports back.
pub trait SidhEngine: Send + Sync {
    /// The field lengths this engine was built for.
    fn field_lengths(&self) -> FieldLengths;

    /// Fill `out` with a random value in Alice's scalar range.
    fn random_mod_order_a(&self, out: &mut [u8]);

    /// Fill `out` with a random value in Bob's scalar range.
    fn random_mod_order_b(&self, out: &mut [u8]);

    /// Compute Alice's public key from her private key.
    fn ephemeral_key_generation_a(
        &self,
        private_key: &[u8],
        public_key: &mut [u8],
    ) -> Result<(), EngineError>;

    /// Compute Bob's public key from his private key.
    fn ephemeral_key_generation_b(
        &self,
        private_key: &[u8],
        public_key: &mut [u8],
    ) -> Result<(), EngineError>;

    /// Compute Alice's view of the shared secret from her private key
    /// and Bob's public key.
    fn ephemeral_secret_agreement_a(
        &self,
        private_key: &[u8],
        peer_public_key: &[u8],
        shared_secret: &mut [u8],
    ) -> Result<(), EngineError>;

    /// Compute Bob's view of the shared secret from his private key and
    /// Alice's public key.
    fn ephemeral_secret_agreement_b(
        &self,
        private_key: &[u8],
        peer_public_key: &[u8],
        shared_secret: &mut [u8],
    ) -> Result<(), EngineError>;
}
