// src/pqsidh.rs

//! Adapters over the upstream SIDH arithmetic library.
//!
//! Each live parameter set gets its own engine struct forwarding to the
//! per-level C entry points. The declarations mirror the upstream
//! `P{434,503,610,751}_api.h` headers; linking requires the upstream
//! static library, which is why this module sits behind the `libsidh`
//! feature.

use std::os::raw::c_int;
use std::sync::Arc;

use crate::engine::{EngineError, SidhEngine};
use crate::variant::{
    FieldLengths, SidhVariant, P434_LENGTHS, P503_LENGTHS, P610_LENGTHS, P751_LENGTHS,
};

#[allow(non_snake_case)]
#[link(name = "sidh", kind = "static")]
extern "C" {
    fn random_mod_order_A_SIDHp434(random_digits: *mut u8);
    fn random_mod_order_B_SIDHp434(random_digits: *mut u8);
    fn EphemeralKeyGeneration_A_SIDHp434(private_key: *const u8, public_key: *mut u8) -> c_int;
    fn EphemeralKeyGeneration_B_SIDHp434(private_key: *const u8, public_key: *mut u8) -> c_int;
    fn EphemeralSecretAgreement_A_SIDHp434(
        private_key: *const u8,
        peer_public_key: *const u8,
        shared_secret: *mut u8,
    ) -> c_int;
    fn EphemeralSecretAgreement_B_SIDHp434(
        private_key: *const u8,
        peer_public_key: *const u8,
        shared_secret: *mut u8,
    ) -> c_int;

    fn random_mod_order_A_SIDHp503(random_digits: *mut u8);
    fn random_mod_order_B_SIDHp503(random_digits: *mut u8);
    fn EphemeralKeyGeneration_A_SIDHp503(private_key: *const u8, public_key: *mut u8) -> c_int;
    fn EphemeralKeyGeneration_B_SIDHp503(private_key: *const u8, public_key: *mut u8) -> c_int;
    fn EphemeralSecretAgreement_A_SIDHp503(
        private_key: *const u8,
        peer_public_key: *const u8,
        shared_secret: *mut u8,
    ) -> c_int;
    fn EphemeralSecretAgreement_B_SIDHp503(
        private_key: *const u8,
        peer_public_key: *const u8,
        shared_secret: *mut u8,
    ) -> c_int;

    fn random_mod_order_A_SIDHp610(random_digits: *mut u8);
    fn random_mod_order_B_SIDHp610(random_digits: *mut u8);
    fn EphemeralKeyGeneration_A_SIDHp610(private_key: *const u8, public_key: *mut u8) -> c_int;
    fn EphemeralKeyGeneration_B_SIDHp610(private_key: *const u8, public_key: *mut u8) -> c_int;
    fn EphemeralSecretAgreement_A_SIDHp610(
        private_key: *const u8,
        peer_public_key: *const u8,
        shared_secret: *mut u8,
    ) -> c_int;
    fn EphemeralSecretAgreement_B_SIDHp610(
        private_key: *const u8,
        peer_public_key: *const u8,
        shared_secret: *mut u8,
    ) -> c_int;

    fn random_mod_order_A_SIDHp751(random_digits: *mut u8);
    fn random_mod_order_B_SIDHp751(random_digits: *mut u8);
    fn EphemeralKeyGeneration_A_SIDHp751(private_key: *const u8, public_key: *mut u8) -> c_int;
    fn EphemeralKeyGeneration_B_SIDHp751(private_key: *const u8, public_key: *mut u8) -> c_int;
    fn EphemeralSecretAgreement_A_SIDHp751(
        private_key: *const u8,
        peer_public_key: *const u8,
        shared_secret: *mut u8,
    ) -> c_int;
    fn EphemeralSecretAgreement_B_SIDHp751(
        private_key: *const u8,
        peer_public_key: *const u8,
        shared_secret: *mut u8,
    ) -> c_int;
}

fn status(code: c_int) -> Result<(), EngineError> {
    if code == 0 {
        Ok(())
    } else {
        Err(EngineError::new(code))
    }
}

macro_rules! sidh_engine {
    ($(#[$meta:meta])* $name:ident, $lengths:expr,
     $rand_a:ident, $rand_b:ident, $keygen_a:ident, $keygen_b:ident,
     $agree_a:ident, $agree_b:ident) => {
        $(#[$meta])*
        pub struct $name;

        impl SidhEngine for $name {
            fn field_lengths(&self) -> FieldLengths {
                $lengths
            }

            fn random_mod_order_a(&self, out: &mut [u8]) {
                debug_assert_eq!(out.len(), $lengths.private_key_a);
                unsafe { $rand_a(out.as_mut_ptr()) }
            }

            fn random_mod_order_b(&self, out: &mut [u8]) {
                debug_assert_eq!(out.len(), $lengths.private_key_b);
                unsafe { $rand_b(out.as_mut_ptr()) }
            }

            fn ephemeral_key_generation_a(
                &self,
                private_key: &[u8],
                public_key: &mut [u8],
            ) -> Result<(), EngineError> {
                debug_assert_eq!(private_key.len(), $lengths.private_key_a);
                debug_assert_eq!(public_key.len(), $lengths.public_key);
                status(unsafe { $keygen_a(private_key.as_ptr(), public_key.as_mut_ptr()) })
            }

            fn ephemeral_key_generation_b(
                &self,
                private_key: &[u8],
                public_key: &mut [u8],
            ) -> Result<(), EngineError> {
                debug_assert_eq!(private_key.len(), $lengths.private_key_b);
                debug_assert_eq!(public_key.len(), $lengths.public_key);
                status(unsafe { $keygen_b(private_key.as_ptr(), public_key.as_mut_ptr()) })
            }

            fn ephemeral_secret_agreement_a(
                &self,
                private_key: &[u8],
                peer_public_key: &[u8],
                shared_secret: &mut [u8],
            ) -> Result<(), EngineError> {
                debug_assert_eq!(private_key.len(), $lengths.private_key_a);
                debug_assert_eq!(peer_public_key.len(), $lengths.public_key);
                debug_assert_eq!(shared_secret.len(), $lengths.shared_secret);
                status(unsafe {
                    $agree_a(
                        private_key.as_ptr(),
                        peer_public_key.as_ptr(),
                        shared_secret.as_mut_ptr(),
                    )
                })
            }

            fn ephemeral_secret_agreement_b(
                &self,
                private_key: &[u8],
                peer_public_key: &[u8],
                shared_secret: &mut [u8],
            ) -> Result<(), EngineError> {
                debug_assert_eq!(private_key.len(), $lengths.private_key_b);
                debug_assert_eq!(peer_public_key.len(), $lengths.public_key);
                debug_assert_eq!(shared_secret.len(), $lengths.shared_secret);
                status(unsafe {
                    $agree_b(
                        private_key.as_ptr(),
                        peer_public_key.as_ptr(),
                        shared_secret.as_mut_ptr(),
                    )
                })
            }
        }
    };
}

sidh_engine!(
    /// SIDHp434 engine.
    P434Engine,
    P434_LENGTHS,
    random_mod_order_A_SIDHp434,
    random_mod_order_B_SIDHp434,
    EphemeralKeyGeneration_A_SIDHp434,
    EphemeralKeyGeneration_B_SIDHp434,
    EphemeralSecretAgreement_A_SIDHp434,
    EphemeralSecretAgreement_B_SIDHp434
);

sidh_engine!(
    /// SIDHp503 engine.
    P503Engine,
    P503_LENGTHS,
    random_mod_order_A_SIDHp503,
    random_mod_order_B_SIDHp503,
    EphemeralKeyGeneration_A_SIDHp503,
    EphemeralKeyGeneration_B_SIDHp503,
    EphemeralSecretAgreement_A_SIDHp503,
    EphemeralSecretAgreement_B_SIDHp503
);

sidh_engine!(
    /// SIDHp610 engine.
    P610Engine,
    P610_LENGTHS,
    random_mod_order_A_SIDHp610,
    random_mod_order_B_SIDHp610,
    EphemeralKeyGeneration_A_SIDHp610,
    EphemeralKeyGeneration_B_SIDHp610,
    EphemeralSecretAgreement_A_SIDHp610,
    EphemeralSecretAgreement_B_SIDHp610
);

sidh_engine!(
    /// SIDHp751 engine.
    P751Engine,
    P751_LENGTHS,
    random_mod_order_A_SIDHp751,
    random_mod_order_B_SIDHp751,
    EphemeralKeyGeneration_A_SIDHp751,
    EphemeralKeyGeneration_B_SIDHp751,
    EphemeralSecretAgreement_A_SIDHp751,
    EphemeralSecretAgreement_B_SIDHp751
);

/// The default binding of every live variant to its upstream engine.
pub fn engines() -> [(SidhVariant, Arc<dyn SidhEngine>); 4] {
    [
        (SidhVariant::P434, Arc::new(P434Engine) as Arc<dyn SidhEngine>),
        (SidhVariant::P503, Arc::new(P503Engine) as Arc<dyn SidhEngine>),
        (SidhVariant::P610, Arc::new(P610Engine) as Arc<dyn SidhEngine>),
        (SidhVariant::P751, Arc::new(P751Engine) as Arc<dyn SidhEngine>),
    ]
}
