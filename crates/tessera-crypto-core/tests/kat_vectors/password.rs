//! Password stretcher vectors.

use tessera_crypto_core::{derive_seed, generate_password, stretch_password};

use super::FIXTURE_A;

#[test]
fn example_v1_password() {
    let seed = derive_seed(&FIXTURE_A, "example", 1).unwrap();
    assert_eq!(generate_password(seed.expose()).unwrap(), "CjCXLZa!ot3@UD?DB5[r");
}

#[test]
fn example_v2_password() {
    let seed = derive_seed(&FIXTURE_A, "example", 2).unwrap();
    assert_eq!(generate_password(seed.expose()).unwrap(), "GG31PvejYy3hKy$d%z6.");
}

#[test]
fn github_v1_password() {
    let seed = derive_seed(&FIXTURE_A, "github", 1).unwrap();
    assert_eq!(generate_password(seed.expose()).unwrap(), "3uwI8NBVBZHU@wl;Bf5T");
}

#[test]
fn refill_path_vector() {
    // 16 seed bytes of 0x01 → 16 × 'B', then 4 chars from SHA-256(seed ‖ 0x00).
    assert_eq!(stretch_password(&[0x01; 16], 20).unwrap(), "BBBBBBBBBBBBBBBB'M%X");
}
