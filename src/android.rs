// src/android.rs

//! JNI boundary for Java and Android callers.
//!
//! Exports the `Java_sidhjava_SidhNative_*` surface: field-length
//! queries, the six key-exchange operations over Java byte arrays, and
//! the logging-callback registration. Failures of any kind surface as
//! `false` (or a null object); no exception and no panic ever crosses
//! the boundary, and any pending Java exception raised while marshaling
//! is cleared before returning.
//!
//! The logging callback target is the `SidhNative` instance on which
//! `enableLoggingCallback` was invoked. Its class and the
//! `loggingCallback(int, String)` method are resolved once and cached
//! together with a global reference to the target; invocations attach
//! the calling thread to the JVM when needed and detach it again via the
//! `jni` crate's scoped attach guard.

use std::sync::{Arc, OnceLock};

use jni::objects::{GlobalRef, JByteArray, JClass, JMethodID, JObject, JValue};
use jni::signature::{Primitive, ReturnType};
use jni::sys::{jboolean, jint, jlong, jobject, jvalue, JNI_FALSE, JNI_TRUE};
use jni::{JNIEnv, JavaVM};
use zeroize::Zeroize;

use crate::dispatch::SidhKex;
use crate::error::Result;
use crate::logging::{LogCallback, LogLevel};
use crate::variant::{FieldLengths, SidhVariant};

/// `enableLoggingCallback` status: registration active.
pub const CALLBACK_ENABLED: jint = 1;
/// `enableLoggingCallback` status: could not retain the target
/// reference, or a callback is already registered.
pub const ERR_RETAIN_TARGET: jint = -1;
/// `enableLoggingCallback` status: could not resolve the target's class.
pub const ERR_RESOLVE_CLASS: jint = -2;
/// `enableLoggingCallback` status: could not resolve
/// `loggingCallback(int, String)` on the target's class.
pub const ERR_RESOLVE_METHOD: jint = -3;

const FIELD_LENGTHS_CLASS: &str = "sidhjava/SidhNative$FieldLengths";
const CALLBACK_METHOD: &str = "loggingCallback";
const CALLBACK_SIG: &str = "(ILjava/lang/String;)V";

/// The process-wide dispatcher behind the JNI surface.
fn kex() -> &'static SidhKex {
    static KEX: OnceLock<SidhKex> = OnceLock::new();
    KEX.get_or_init(SidhKex::new)
}

struct JavaLogCallback {
    vm: JavaVM,
    target: GlobalRef,
    method: JMethodID,
}

impl LogCallback for JavaLogCallback {
    fn log(&self, level: LogLevel, message: &str) {
        // Attaches the thread if the JVM does not know it yet; the guard
        // detaches on drop only if this call performed the attachment.
        let Ok(mut env) = self.vm.attach_current_thread() else {
            return;
        };
        let Ok(jmessage) = env.new_string(message) else {
            let _ = env.exception_clear();
            return;
        };
        let args = [
            jvalue { i: level.raw() },
            jvalue {
                l: jmessage.as_raw(),
            },
        ];
        let outcome = unsafe {
            env.call_method_unchecked(
                self.target.as_obj(),
                self.method,
                ReturnType::Primitive(Primitive::Void),
                &args,
            )
        };
        if outcome.is_err() {
            let _ = env.exception_clear();
        }
    }
}

fn variant_or_log(raw: jint) -> Option<SidhVariant> {
    let variant = SidhVariant::from_raw(raw);
    if variant.is_none() {
        kex()
            .logging()
            .emit(LogLevel::Error, &format!("unknown SIDH type selector {raw}"));
    }
    variant
}

fn array_len(env: &mut JNIEnv, array: &JByteArray) -> Option<usize> {
    match env.get_array_length(array) {
        Ok(len) => usize::try_from(len).ok(),
        Err(_) => {
            let _ = env.exception_clear();
            None
        }
    }
}

fn read_array(env: &mut JNIEnv, array: &JByteArray) -> Option<Vec<u8>> {
    match env.convert_byte_array(array) {
        Ok(bytes) => Some(bytes),
        Err(_) => {
            let _ = env.exception_clear();
            None
        }
    }
}

fn write_array(env: &mut JNIEnv, array: &JByteArray, data: &[u8]) -> bool {
    let signed =
        unsafe { std::slice::from_raw_parts(data.as_ptr().cast::<i8>(), data.len()) };
    match env.set_byte_array_region(array, 0, signed) {
        Ok(()) => true,
        Err(_) => {
            let _ = env.exception_clear();
            false
        }
    }
}

fn new_field_lengths<'local>(
    env: &mut JNIEnv<'local>,
    lengths: FieldLengths,
) -> jni::errors::Result<JObject<'local>> {
    let class = env.find_class(FIELD_LENGTHS_CLASS)?;
    let object = env.new_object(&class, "()V", &[])?;
    env.set_field(
        &object,
        "privateKeyA",
        "J",
        JValue::Long(lengths.private_key_a as jlong),
    )?;
    env.set_field(
        &object,
        "privateKeyB",
        "J",
        JValue::Long(lengths.private_key_b as jlong),
    )?;
    env.set_field(
        &object,
        "publicKey",
        "J",
        JValue::Long(lengths.public_key as jlong),
    )?;
    env.set_field(
        &object,
        "sharedSecret",
        "J",
        JValue::Long(lengths.shared_secret as jlong),
    )?;
    Ok(object)
}

/// `SidhNative.getFieldLengths(int sidhType)`
///
/// Returns null for compressed or out-of-range selectors, never a
/// zero-filled object.
#[no_mangle]
pub extern "system" fn Java_sidhjava_SidhNative_getFieldLengths<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    sidh_type: jint,
) -> jobject {
    let Some(variant) = variant_or_log(sidh_type) else {
        return std::ptr::null_mut();
    };
    let Some(lengths) = kex().field_lengths(variant) else {
        return std::ptr::null_mut();
    };
    match new_field_lengths(&mut env, lengths) {
        Ok(object) => object.into_raw(),
        Err(_) => {
            let _ = env.exception_clear();
            std::ptr::null_mut()
        }
    }
}

/// `SidhNative.randomModOrderA(int sidhType, byte[] randomDigits)`
#[no_mangle]
pub extern "system" fn Java_sidhjava_SidhNative_randomModOrderA<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    sidh_type: jint,
    random_digits: JByteArray<'local>,
) -> jboolean {
    let Some(variant) = variant_or_log(sidh_type) else {
        return JNI_FALSE;
    };
    let Some(len) = array_len(&mut env, &random_digits) else {
        return JNI_FALSE;
    };
    let mut out = vec![0u8; len];
    let outcome = kex().random_mod_order_a(variant, &mut out);
    let written = outcome.is_ok() && write_array(&mut env, &random_digits, &out);
    out.zeroize();
    if written {
        JNI_TRUE
    } else {
        JNI_FALSE
    }
}

/// `SidhNative.randomModOrderB(int sidhType, byte[] randomDigits)`
#[no_mangle]
pub extern "system" fn Java_sidhjava_SidhNative_randomModOrderB<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    sidh_type: jint,
    random_digits: JByteArray<'local>,
) -> jboolean {
    let Some(variant) = variant_or_log(sidh_type) else {
        return JNI_FALSE;
    };
    let Some(len) = array_len(&mut env, &random_digits) else {
        return JNI_FALSE;
    };
    let mut out = vec![0u8; len];
    let outcome = kex().random_mod_order_b(variant, &mut out);
    let written = outcome.is_ok() && write_array(&mut env, &random_digits, &out);
    out.zeroize();
    if written {
        JNI_TRUE
    } else {
        JNI_FALSE
    }
}

/// `SidhNative.ephemeralKeyGenerationA(int sidhType, byte[] privateKey, byte[] publicKey)`
#[no_mangle]
pub extern "system" fn Java_sidhjava_SidhNative_ephemeralKeyGenerationA<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    sidh_type: jint,
    private_key: JByteArray<'local>,
    public_key: JByteArray<'local>,
) -> jboolean {
    key_generation(&mut env, sidh_type, &private_key, &public_key, |kex, v, sk, pk| {
        kex.ephemeral_key_generation_a(v, sk, pk)
    })
}

/// `SidhNative.ephemeralKeyGenerationB(int sidhType, byte[] privateKey, byte[] publicKey)`
#[no_mangle]
pub extern "system" fn Java_sidhjava_SidhNative_ephemeralKeyGenerationB<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    sidh_type: jint,
    private_key: JByteArray<'local>,
    public_key: JByteArray<'local>,
) -> jboolean {
    key_generation(&mut env, sidh_type, &private_key, &public_key, |kex, v, sk, pk| {
        kex.ephemeral_key_generation_b(v, sk, pk)
    })
}

fn key_generation(
    env: &mut JNIEnv,
    sidh_type: jint,
    private_key: &JByteArray,
    public_key: &JByteArray,
    op: impl FnOnce(&SidhKex, SidhVariant, &[u8], &mut [u8]) -> Result<()>,
) -> jboolean {
    let Some(variant) = variant_or_log(sidh_type) else {
        return JNI_FALSE;
    };
    let Some(mut sk) = read_array(env, private_key) else {
        return JNI_FALSE;
    };
    let Some(pk_len) = array_len(env, public_key) else {
        sk.zeroize();
        return JNI_FALSE;
    };
    let mut pk = vec![0u8; pk_len];
    let outcome = op(kex(), variant, &sk, &mut pk);
    sk.zeroize();
    let written = outcome.is_ok() && write_array(env, public_key, &pk);
    if written {
        JNI_TRUE
    } else {
        JNI_FALSE
    }
}

/// `SidhNative.ephemeralSecretAgreementA(int sidhType, byte[] privateKey, byte[] peerPublicKey, byte[] sharedSecret)`
#[no_mangle]
pub extern "system" fn Java_sidhjava_SidhNative_ephemeralSecretAgreementA<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    sidh_type: jint,
    private_key: JByteArray<'local>,
    peer_public_key: JByteArray<'local>,
    shared_secret: JByteArray<'local>,
) -> jboolean {
    secret_agreement(
        &mut env,
        sidh_type,
        &private_key,
        &peer_public_key,
        &shared_secret,
        |kex, v, sk, pk, ss| kex.ephemeral_secret_agreement_a(v, sk, pk, ss),
    )
}

/// `SidhNative.ephemeralSecretAgreementB(int sidhType, byte[] privateKey, byte[] peerPublicKey, byte[] sharedSecret)`
#[no_mangle]
pub extern "system" fn Java_sidhjava_SidhNative_ephemeralSecretAgreementB<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    sidh_type: jint,
    private_key: JByteArray<'local>,
    peer_public_key: JByteArray<'local>,
    shared_secret: JByteArray<'local>,
) -> jboolean {
    secret_agreement(
        &mut env,
        sidh_type,
        &private_key,
        &peer_public_key,
        &shared_secret,
        |kex, v, sk, pk, ss| kex.ephemeral_secret_agreement_b(v, sk, pk, ss),
    )
}

fn secret_agreement(
    env: &mut JNIEnv,
    sidh_type: jint,
    private_key: &JByteArray,
    peer_public_key: &JByteArray,
    shared_secret: &JByteArray,
    op: impl FnOnce(&SidhKex, SidhVariant, &[u8], &[u8], &mut [u8]) -> Result<()>,
) -> jboolean {
    let Some(variant) = variant_or_log(sidh_type) else {
        return JNI_FALSE;
    };
    let Some(mut sk) = read_array(env, private_key) else {
        return JNI_FALSE;
    };
    let Some(peer_pk) = read_array(env, peer_public_key) else {
        sk.zeroize();
        return JNI_FALSE;
    };
    let Some(ss_len) = array_len(env, shared_secret) else {
        sk.zeroize();
        return JNI_FALSE;
    };
    let mut ss = vec![0u8; ss_len];
    let outcome = op(kex(), variant, &sk, &peer_pk, &mut ss);
    sk.zeroize();
    let written = outcome.is_ok() && write_array(env, shared_secret, &ss);
    ss.zeroize();
    if written {
        JNI_TRUE
    } else {
        JNI_FALSE
    }
}

/// `SidhNative.enableLoggingCallback()`
///
/// The receiver is the callback target. Returns 1 on success or one of
/// the negative codes above, each naming the step that failed so the
/// caller can diagnose without a stack trace.
#[no_mangle]
pub extern "system" fn Java_sidhjava_SidhNative_enableLoggingCallback<'local>(
    mut env: JNIEnv<'local>,
    target: JObject<'local>,
) -> jint {
    if kex().logging().is_enabled() {
        return ERR_RETAIN_TARGET;
    }
    if target.as_raw().is_null() {
        return ERR_RETAIN_TARGET;
    }
    let Ok(vm) = env.get_java_vm() else {
        return ERR_RETAIN_TARGET;
    };
    let Ok(global) = env.new_global_ref(&target) else {
        let _ = env.exception_clear();
        return ERR_RETAIN_TARGET;
    };
    let Ok(class) = env.get_object_class(&target) else {
        let _ = env.exception_clear();
        return ERR_RESOLVE_CLASS;
    };
    let Ok(method) = env.get_method_id(&class, CALLBACK_METHOD, CALLBACK_SIG) else {
        let _ = env.exception_clear();
        return ERR_RESOLVE_METHOD;
    };
    let callback = JavaLogCallback {
        vm,
        target: global,
        method,
    };
    match kex().logging().enable(Arc::new(callback)) {
        Ok(()) => CALLBACK_ENABLED,
        Err(_) => ERR_RETAIN_TARGET,
    }
}

/// `SidhNative.disableLoggingCallback()`
///
/// Releases the retained target reference and cached method handle.
/// A no-op when nothing is registered.
#[no_mangle]
pub extern "system" fn Java_sidhjava_SidhNative_disableLoggingCallback(
    _env: JNIEnv,
    _class: JClass,
) {
    kex().logging().disable();
}
