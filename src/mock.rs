// src/mock.rs

//! A deterministic stand-in engine for tests and wiring checks.
//!
//! `MockEngine` produces buffers of the real field lengths and satisfies
//! the agreement property (both parties derive the same secret), but it
//! is **not cryptography** and must never back a production dispatcher.
//!
//! The construction works in the ring Z/2^(8·n) where n is the public
//! key length: a public key is `scalar · G` and a shared secret is the
//! truncation of `scalar · peer_public`. Multiplication there is
//! commutative and associative, so both parties end up with
//! `a · b · G mod 2^(8·n)`. Scalars are forced odd so a degenerate
//! all-zero private key still yields a usable public key.

use rand_core::{OsRng, RngCore};
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::Shake256;
use zeroize::Zeroizing;

use crate::engine::{EngineError, SidhEngine};
use crate::variant::{FieldLengths, SidhVariant};

/// Deterministic non-cryptographic engine at real field lengths.
pub struct MockEngine {
    lengths: FieldLengths,
    generator: Vec<u8>,
}

impl MockEngine {
    /// An engine for the given lengths.
    pub fn new(lengths: FieldLengths) -> Self {
        let mut hasher = Shake256::default();
        hasher.update(b"sidh-kex mock generator");
        hasher.update(&(lengths.public_key as u64).to_le_bytes());
        let mut reader = hasher.finalize_xof();

        let mut generator = vec![0u8; lengths.public_key];
        reader.read(&mut generator);
        generator[0] |= 1;

        Self { lengths, generator }
    }

    /// An engine for `variant`, `None` for the compressed selectors.
    pub fn for_variant(variant: SidhVariant) -> Option<Self> {
        variant.field_lengths().map(Self::new)
    }

    fn keygen(&self, private_key: &[u8], public_key: &mut [u8]) -> Result<(), EngineError> {
        let scalar = Zeroizing::new(expand(private_key, self.lengths.public_key));
        let product = Zeroizing::new(mul_mod_pow2(&scalar, &self.generator));
        public_key.copy_from_slice(&product);
        Ok(())
    }

    fn agree(
        &self,
        private_key: &[u8],
        peer_public_key: &[u8],
        shared_secret: &mut [u8],
    ) -> Result<(), EngineError> {
        let scalar = Zeroizing::new(expand(private_key, self.lengths.public_key));
        let product = Zeroizing::new(mul_mod_pow2(&scalar, peer_public_key));
        shared_secret.copy_from_slice(&product[..shared_secret.len()]);
        Ok(())
    }
}

impl SidhEngine for MockEngine {
    fn field_lengths(&self) -> FieldLengths {
        self.lengths
    }

    fn random_mod_order_a(&self, out: &mut [u8]) {
        OsRng.fill_bytes(out);
    }

    fn random_mod_order_b(&self, out: &mut [u8]) {
        OsRng.fill_bytes(out);
    }

    fn ephemeral_key_generation_a(
        &self,
        private_key: &[u8],
        public_key: &mut [u8],
    ) -> Result<(), EngineError> {
        self.keygen(private_key, public_key)
    }

    fn ephemeral_key_generation_b(
        &self,
        private_key: &[u8],
        public_key: &mut [u8],
    ) -> Result<(), EngineError> {
        self.keygen(private_key, public_key)
    }

    fn ephemeral_secret_agreement_a(
        &self,
        private_key: &[u8],
        peer_public_key: &[u8],
        shared_secret: &mut [u8],
    ) -> Result<(), EngineError> {
        self.agree(private_key, peer_public_key, shared_secret)
    }

    fn ephemeral_secret_agreement_b(
        &self,
        private_key: &[u8],
        peer_public_key: &[u8],
        shared_secret: &mut [u8],
    ) -> Result<(), EngineError> {
        self.agree(private_key, peer_public_key, shared_secret)
    }
}

/// Zero-extend a scalar to `width` bytes, little endian, forced odd.
fn expand(scalar: &[u8], width: usize) -> Vec<u8> {
    let mut out = vec![0u8; width];
    out[..scalar.len()].copy_from_slice(scalar);
    out[0] |= 1;
    out
}

/// Schoolbook product of two equal-width little-endian numbers,
/// reduced mod 2^(8·width) by dropping the high half.
fn mul_mod_pow2(a: &[u8], b: &[u8]) -> Vec<u8> {
    let width = a.len();
    let mut out = vec![0u8; width];
    for i in 0..width {
        if a[i] == 0 {
            continue;
        }
        let mut carry = 0u32;
        for j in 0..width - i {
            let t = out[i + j] as u32 + a[i] as u32 * b[j] as u32 + carry;
            out[i + j] = t as u8;
            carry = t >> 8;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keygen_is_deterministic() {
        let engine = MockEngine::for_variant(SidhVariant::P434).unwrap();
        let lengths = engine.field_lengths();

        let private_key = vec![0x42u8; lengths.private_key_a];
        let mut first = vec![0u8; lengths.public_key];
        let mut second = vec![0u8; lengths.public_key];
        engine
            .ephemeral_key_generation_a(&private_key, &mut first)
            .unwrap();
        engine
            .ephemeral_key_generation_a(&private_key, &mut second)
            .unwrap();

        assert_eq!(first, second);
        assert!(first.iter().any(|&b| b != 0));
    }

    #[test]
    fn agreement_is_commutative() {
        for variant in SidhVariant::LIVE {
            let engine = MockEngine::for_variant(variant).unwrap();
            let lengths = engine.field_lengths();

            let mut sk_a = vec![0u8; lengths.private_key_a];
            let mut sk_b = vec![0u8; lengths.private_key_b];
            engine.random_mod_order_a(&mut sk_a);
            engine.random_mod_order_b(&mut sk_b);

            let mut pk_a = vec![0u8; lengths.public_key];
            let mut pk_b = vec![0u8; lengths.public_key];
            engine.ephemeral_key_generation_a(&sk_a, &mut pk_a).unwrap();
            engine.ephemeral_key_generation_b(&sk_b, &mut pk_b).unwrap();

            let mut ss_a = vec![0u8; lengths.shared_secret];
            let mut ss_b = vec![0u8; lengths.shared_secret];
            engine
                .ephemeral_secret_agreement_a(&sk_a, &pk_b, &mut ss_a)
                .unwrap();
            engine
                .ephemeral_secret_agreement_b(&sk_b, &pk_a, &mut ss_b)
                .unwrap();

            assert_eq!(ss_a, ss_b, "secrets disagree for {variant:?}");
        }
    }

    #[test]
    fn generators_differ_between_levels() {
        let p434 = MockEngine::for_variant(SidhVariant::P434).unwrap();
        let p503 = MockEngine::for_variant(SidhVariant::P503).unwrap();
        assert_ne!(
            &p434.generator[..p434.generator.len().min(p503.generator.len())],
            &p503.generator[..p434.generator.len().min(p503.generator.len())]
        );
    }
}
