//! HKDF-SHA256 seed vectors and the challenge digest.

use tessera_crypto_core::{challenge_for_label, derive_seed, normalize_assertion, AssertionPolicy};

use super::{hex, FIXTURE_A};

#[test]
fn challenge_for_example() {
    let c = challenge_for_label("example");
    assert_eq!(
        c.as_ref(),
        hex("50d858e0985ecc7f60418aaf0cc5ab587f42c2570a884095a9e8ccacd0f6545c").as_slice()
    );
}

#[test]
fn seed_example_v1() {
    let seed = derive_seed(&FIXTURE_A, "example", 1).unwrap();
    let expected = hex(
        "02df0217c777783e282df3fb7203bbbfbdf5ac2bbac566a0d73cec589f381d17\
         0c098aca9d627dd3ea4e7156fbae5fe336b9ccf7e9a302929cd9469808e24b8a",
    );
    assert_eq!(seed.expose().as_slice(), expected.as_slice());
}

#[test]
fn seed_example_v2() {
    let seed = derive_seed(&FIXTURE_A, "example", 2).unwrap();
    let expected = hex(
        "06c237f1cb8d7c81189095ddc6909fd942eff6b7cbdcf876a9193578e0c8a5a7\
         713969dab3aec1cbd2ff01dd254c7a9457aeaaebcf296f5714dc8c85ee4718a6",
    );
    assert_eq!(seed.expose().as_slice(), expected.as_slice());
}

#[test]
fn counter_does_not_reach_the_seed() {
    let mut raw = FIXTURE_A;
    raw[33..37].copy_from_slice(&1234_u32.to_be_bytes());
    let normalized = normalize_assertion(&raw, AssertionPolicy::Permissive).unwrap();
    let from_raw = derive_seed(normalized.expose(), "example", 1).unwrap();
    let from_fixture = derive_seed(&FIXTURE_A, "example", 1).unwrap();
    assert_eq!(from_raw.expose(), from_fixture.expose());
}
