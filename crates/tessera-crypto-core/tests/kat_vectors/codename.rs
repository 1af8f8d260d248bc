//! Codename vectors against the embedded dictionary.

use tessera_crypto_core::codename::codename_indices;
use tessera_crypto_core::{derive_seed, select_codename, Dictionary};

use super::FIXTURE_A;

#[test]
fn example_v1_codename() {
    let dict = Dictionary::embedded().unwrap();
    let seed = derive_seed(&FIXTURE_A, "example", 1).unwrap();
    assert_eq!(codename_indices(seed.expose(), dict.len()).unwrap(), [55, 62, 75]);
    let name = select_codename(seed.expose(), &dict).unwrap();
    assert_eq!(name.value, "黑和舞");
    assert_eq!(name.annotation, "hei1 he2 wu3");
}

#[test]
fn example_v2_codename() {
    let dict = Dictionary::embedded().unwrap();
    let seed = derive_seed(&FIXTURE_A, "example", 2).unwrap();
    let name = select_codename(seed.expose(), &dict).unwrap();
    assert_eq!(name.value, "玉鱼星");
    assert_eq!(name.annotation, "yu4 yu2 xing1");
}
