#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

//! Property-based tests for coordinator output.

use proptest::prelude::*;
use tessera_crypto_core::{Dictionary, ALPHABET};
use tessera_engine::{
    CredentialHandle, FormattingStrategy, GeneratedArtifact, GenerationCoordinator,
    SoftwareAuthenticator,
};

fn run(
    credential: &[u8],
    service: &str,
    version: u32,
    strategy: FormattingStrategy,
) -> GeneratedArtifact {
    let coordinator =
        GenerationCoordinator::new(SoftwareAuthenticator::demo(), Dictionary::embedded().unwrap());
    let credential = CredentialHandle::new(credential.to_vec());
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(coordinator.generate(&credential, service, version, strategy))
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn repeated_calls_agree(
        cred in proptest::collection::vec(any::<u8>(), 1..64),
        label in "[a-z]{1,12}",
        version in 1u32..1000,
    ) {
        let service = format!("{label}.com");
        let a = run(&cred, &service, version, FormattingStrategy::Password);
        let b = run(&cred, &service, version, FormattingStrategy::Password);
        prop_assert_eq!(&a.value, &b.value);
        prop_assert_eq!(a.value.len(), 20);
        prop_assert!(a.value.bytes().all(|c| ALPHABET.contains(&c)));
    }

    #[test]
    fn adjacent_versions_differ(
        cred in proptest::collection::vec(any::<u8>(), 1..64),
        label in "[a-z]{1,12}",
        version in 1u32..1000,
    ) {
        let service = format!("{label}.com");
        let a = run(&cred, &service, version, FormattingStrategy::Password);
        let b = run(&cred, &service, version + 1, FormattingStrategy::Password);
        prop_assert_ne!(&a.value, &b.value);
    }

    #[test]
    fn codename_is_three_dictionary_chars(
        cred in proptest::collection::vec(any::<u8>(), 1..64),
        label in "[a-z]{1,12}",
    ) {
        let dict = Dictionary::embedded().unwrap();
        let artifact = run(&cred, &format!("{label}.net"), 1, FormattingStrategy::Codename);
        prop_assert_eq!(artifact.value.chars().count(), 3);
        for ch in artifact.value.chars() {
            prop_assert!(dict.entries().iter().any(|e| e.character == ch));
        }
    }
}
