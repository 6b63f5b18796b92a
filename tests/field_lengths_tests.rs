// tests/field_lengths_tests.rs

//! Field-length metadata tests for all parameter sets.

use sidh_kex::{SidhKex, SidhVariant};

// The values below are copied from the upstream P{434,503,610,751}_api.h
// files and must never drift.
const SIDH_434_SECRETKEYBYTES_A: usize = 27;
const SIDH_434_SECRETKEYBYTES_B: usize = 28;
const SIDH_434_PUBLICKEYBYTES: usize = 330;
const SIDH_434_BYTES: usize = 110;

const SIDH_503_SECRETKEYBYTES_A: usize = 32;
const SIDH_503_SECRETKEYBYTES_B: usize = 32;
const SIDH_503_PUBLICKEYBYTES: usize = 378;
const SIDH_503_BYTES: usize = 126;

const SIDH_610_SECRETKEYBYTES_A: usize = 39;
const SIDH_610_SECRETKEYBYTES_B: usize = 38;
const SIDH_610_PUBLICKEYBYTES: usize = 462;
const SIDH_610_BYTES: usize = 154;

const SIDH_751_SECRETKEYBYTES_A: usize = 47;
const SIDH_751_SECRETKEYBYTES_B: usize = 48;
const SIDH_751_PUBLICKEYBYTES: usize = 564;
const SIDH_751_BYTES: usize = 188;

fn check(variant: SidhVariant, sk_a: usize, sk_b: usize, pk: usize, ss: usize) {
    let lengths = variant.field_lengths().expect("live variant has lengths");
    assert_eq!(lengths.private_key_a, sk_a);
    assert_eq!(lengths.private_key_b, sk_b);
    assert_eq!(lengths.public_key, pk);
    assert_eq!(lengths.shared_secret, ss);
}

#[test]
fn field_lengths_434() {
    check(
        SidhVariant::P434,
        SIDH_434_SECRETKEYBYTES_A,
        SIDH_434_SECRETKEYBYTES_B,
        SIDH_434_PUBLICKEYBYTES,
        SIDH_434_BYTES,
    );
}

#[test]
fn field_lengths_503() {
    check(
        SidhVariant::P503,
        SIDH_503_SECRETKEYBYTES_A,
        SIDH_503_SECRETKEYBYTES_B,
        SIDH_503_PUBLICKEYBYTES,
        SIDH_503_BYTES,
    );
}

#[test]
fn field_lengths_610() {
    check(
        SidhVariant::P610,
        SIDH_610_SECRETKEYBYTES_A,
        SIDH_610_SECRETKEYBYTES_B,
        SIDH_610_PUBLICKEYBYTES,
        SIDH_610_BYTES,
    );
}

#[test]
fn field_lengths_751() {
    check(
        SidhVariant::P751,
        SIDH_751_SECRETKEYBYTES_A,
        SIDH_751_SECRETKEYBYTES_B,
        SIDH_751_PUBLICKEYBYTES,
        SIDH_751_BYTES,
    );
}

#[test]
fn lengths_are_stable_across_calls() {
    for variant in SidhVariant::LIVE {
        let first = variant.field_lengths().unwrap();
        let second = variant.field_lengths().unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn lengths_are_strictly_positive() {
    for variant in SidhVariant::LIVE {
        let lengths = variant.field_lengths().unwrap();
        assert!(lengths.private_key_a > 0);
        assert!(lengths.private_key_b > 0);
        assert!(lengths.public_key > 0);
        assert!(lengths.shared_secret > 0);
    }
}

#[test]
fn compressed_variants_are_unsupported() {
    let kex = SidhKex::with_engines([]);
    for variant in [
        SidhVariant::P434Comp,
        SidhVariant::P503Comp,
        SidhVariant::P610Comp,
        SidhVariant::P751Comp,
    ] {
        assert_eq!(variant.field_lengths(), None);
        assert_eq!(kex.field_lengths(variant), None);
    }
}

#[test]
fn dispatcher_lengths_match_the_registry() {
    let kex = SidhKex::with_engines([]);
    for variant in SidhVariant::ALL {
        assert_eq!(kex.field_lengths(variant), variant.field_lengths());
    }
}

#[test]
fn raw_selectors_match_the_java_constants() {
    assert_eq!(SidhVariant::P434.raw(), 1);
    assert_eq!(SidhVariant::P434Comp.raw(), 2);
    assert_eq!(SidhVariant::P503.raw(), 3);
    assert_eq!(SidhVariant::P503Comp.raw(), 4);
    assert_eq!(SidhVariant::P610.raw(), 5);
    assert_eq!(SidhVariant::P610Comp.raw(), 6);
    assert_eq!(SidhVariant::P751.raw(), 7);
    assert_eq!(SidhVariant::P751Comp.raw(), 8);
    assert_eq!(SidhVariant::from_raw(0), None);
    assert_eq!(SidhVariant::from_raw(9), None);
}
