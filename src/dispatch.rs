// src/dispatch.rs

//! The six-operation key-exchange facade, parameterized by variant.
//!
//! `SidhKex` is a capability table: one optional engine per selector
//! value, resolved by index. It also carries the boundary safety checks,
//! so no caller path can reach an engine with a wrong-sized buffer.

use std::sync::Arc;

use crate::engine::{EngineError, SidhEngine};
use crate::error::{Error, Result};
use crate::logging::{CallbackRegistry, LogLevel};
use crate::variant::{FieldLengths, SidhVariant};

/// Parameter-set dispatcher for the ephemeral SIDH key exchange.
///
/// Holds no mutable state besides the logging registry, so one instance
/// may be shared freely across threads. Operations on different variants
/// are fully independent: engines only touch the caller's buffers.
pub struct SidhKex {
    engines: [Option<Arc<dyn SidhEngine>>; SidhVariant::COUNT],
    log: Arc<CallbackRegistry>,
}

impl SidhKex {
    /// A dispatcher with the default engine set.
    ///
    /// With the `libsidh` feature enabled this binds the four upstream
    /// engines; without it the table starts empty and every operation
    /// reports the variant as unsupported until engines are injected via
    /// [`SidhKex::with_engines`].
    pub fn new() -> Self {
        #[cfg(feature = "libsidh")]
        {
            Self::with_engines(crate::pqsidh::engines())
        }
        #[cfg(not(feature = "libsidh"))]
        {
            Self::with_engines([])
        }
    }

    /// A dispatcher over the given `(variant, engine)` bindings.
    ///
    /// Bindings for compressed selectors are ignored: the registry has
    /// no lengths for them, so nothing could ever be validated against
    /// such an engine.
    pub fn with_engines<I>(engines: I) -> Self
    where
        I: IntoIterator<Item = (SidhVariant, Arc<dyn SidhEngine>)>,
    {
        let mut table: [Option<Arc<dyn SidhEngine>>; SidhVariant::COUNT] = Default::default();
        for (variant, engine) in engines {
            let Some(lengths) = variant.field_lengths() else {
                tracing::warn!(
                    target: "sidh_kex",
                    "ignoring engine bound to compressed variant {variant:?}"
                );
                continue;
            };
            debug_assert_eq!(
                lengths,
                engine.field_lengths(),
                "engine lengths disagree with the registry for {variant:?}"
            );
            table[variant.index()] = Some(engine);
        }
        Self {
            engines: table,
            log: Arc::new(CallbackRegistry::new()),
        }
    }

    /// Replace the logging registry, e.g. to share one across several
    /// dispatcher instances.
    pub fn with_logging(mut self, log: Arc<CallbackRegistry>) -> Self {
        self.log = log;
        self
    }

    /// The logging registry owned by this dispatcher.
    pub fn logging(&self) -> &Arc<CallbackRegistry> {
        &self.log
    }

    /// Field lengths for `variant`, `None` for unsupported selectors.
    ///
    /// Pure registry lookup; the answer does not depend on whether an
    /// engine is currently bound.
    pub fn field_lengths(&self, variant: SidhVariant) -> Option<FieldLengths> {
        variant.field_lengths()
    }

    /// Sample Alice's private key into `out`.
    pub fn random_mod_order_a(&self, variant: SidhVariant, out: &mut [u8]) -> Result<()> {
        let (engine, lengths) = self.engine_for(variant)?;
        self.check_len("randomModOrderA", "privateKeyA", lengths.private_key_a, out.len())?;
        engine.random_mod_order_a(out);
        Ok(())
    }

    /// Sample Bob's private key into `out`.
    pub fn random_mod_order_b(&self, variant: SidhVariant, out: &mut [u8]) -> Result<()> {
        let (engine, lengths) = self.engine_for(variant)?;
        self.check_len("randomModOrderB", "privateKeyB", lengths.private_key_b, out.len())?;
        engine.random_mod_order_b(out);
        Ok(())
    }

    /// Compute Alice's public key from her private key.
    pub fn ephemeral_key_generation_a(
        &self,
        variant: SidhVariant,
        private_key: &[u8],
        public_key: &mut [u8],
    ) -> Result<()> {
        const OP: &str = "ephemeralKeyGenerationA";
        let (engine, lengths) = self.engine_for(variant)?;
        self.check_len(OP, "privateKeyA", lengths.private_key_a, private_key.len())?;
        self.check_len(OP, "publicKey", lengths.public_key, public_key.len())?;
        engine
            .ephemeral_key_generation_a(private_key, public_key)
            .map_err(|e| self.engine_failure(OP, e))
    }

    /// Compute Bob's public key from his private key.
    pub fn ephemeral_key_generation_b(
        &self,
        variant: SidhVariant,
        private_key: &[u8],
        public_key: &mut [u8],
    ) -> Result<()> {
        const OP: &str = "ephemeralKeyGenerationB";
        let (engine, lengths) = self.engine_for(variant)?;
        self.check_len(OP, "privateKeyB", lengths.private_key_b, private_key.len())?;
        self.check_len(OP, "publicKey", lengths.public_key, public_key.len())?;
        engine
            .ephemeral_key_generation_b(private_key, public_key)
            .map_err(|e| self.engine_failure(OP, e))
    }

    /// Compute Alice's view of the shared secret.
    pub fn ephemeral_secret_agreement_a(
        &self,
        variant: SidhVariant,
        private_key: &[u8],
        peer_public_key: &[u8],
        shared_secret: &mut [u8],
    ) -> Result<()> {
        const OP: &str = "ephemeralSecretAgreementA";
        let (engine, lengths) = self.engine_for(variant)?;
        self.check_len(OP, "privateKeyA", lengths.private_key_a, private_key.len())?;
        self.check_len(OP, "publicKey", lengths.public_key, peer_public_key.len())?;
        self.check_len(OP, "sharedSecret", lengths.shared_secret, shared_secret.len())?;
        engine
            .ephemeral_secret_agreement_a(private_key, peer_public_key, shared_secret)
            .map_err(|e| self.engine_failure(OP, e))
    }

    /// Compute Bob's view of the shared secret.
    pub fn ephemeral_secret_agreement_b(
        &self,
        variant: SidhVariant,
        private_key: &[u8],
        peer_public_key: &[u8],
        shared_secret: &mut [u8],
    ) -> Result<()> {
        const OP: &str = "ephemeralSecretAgreementB";
        let (engine, lengths) = self.engine_for(variant)?;
        self.check_len(OP, "privateKeyB", lengths.private_key_b, private_key.len())?;
        self.check_len(OP, "publicKey", lengths.public_key, peer_public_key.len())?;
        self.check_len(OP, "sharedSecret", lengths.shared_secret, shared_secret.len())?;
        engine
            .ephemeral_secret_agreement_b(private_key, peer_public_key, shared_secret)
            .map_err(|e| self.engine_failure(OP, e))
    }

    fn engine_for(&self, variant: SidhVariant) -> Result<(&dyn SidhEngine, FieldLengths)> {
        let lengths = variant
            .field_lengths()
            .ok_or(Error::UnsupportedVariant(variant))?;
        let engine = self.engines[variant.index()]
            .as_deref()
            .ok_or(Error::UnsupportedVariant(variant))?;
        Ok((engine, lengths))
    }

    fn check_len(
        &self,
        operation: &'static str,
        field: &'static str,
        expected: usize,
        actual: usize,
    ) -> Result<()> {
        if expected != actual {
            self.log.emit(
                LogLevel::Error,
                &format!("{operation}: {field} length mismatch, expected {expected}, got {actual}"),
            );
            return Err(Error::LengthMismatch {
                field,
                expected,
                actual,
            });
        }
        Ok(())
    }

    fn engine_failure(&self, operation: &'static str, error: EngineError) -> Error {
        self.log.emit(
            LogLevel::Error,
            &format!("{operation}: engine reported status {}", error.status()),
        );
        Error::EngineFailure {
            operation,
            status: error.status(),
        }
    }
}

impl Default for SidhKex {
    fn default() -> Self {
        Self::new()
    }
}
