#![allow(missing_docs)]
#![cfg(feature = "download")]

use std::sync::Arc;

use bpe_profiles::{
    EncodingName,
    EncodingRegistry,
    VocabSource,
    sources::{EmbeddedVocabSource, FetchVocabSource, VocabTier, write_snapshot_dir},
};

#[test]
#[ignore = "requires network access"]
fn test_canonical_table_sizes() {
    let fetch = FetchVocabSource::try_default().unwrap();
    for tier in VocabTier::ALL {
        let ranks = fetch.load(tier.locator()).unwrap();
        assert_eq!(ranks.len(), tier.expected_len(), "{tier}");
    }
}

#[test]
#[ignore = "requires network access"]
fn test_canonical_profiles() {
    let dir = tempdir::TempDir::new("canonical_test").unwrap();
    let fetch = FetchVocabSource::try_default().unwrap();

    write_snapshot_dir(dir.path(), &fetch).unwrap();
    let embedded = EmbeddedVocabSource::load_dir(dir.path()).unwrap();

    for tier in VocabTier::ALL {
        assert_eq!(
            embedded.load(tier.locator()).unwrap(),
            fetch.load(tier.locator()).unwrap(),
            "{tier}"
        );
    }

    let registry = EncodingRegistry::new(Arc::new(embedded));
    for name in EncodingName::ALL {
        let enc = registry.get_encoding(name).unwrap();
        assert_eq!(enc.merge_ranks().len(), name.spec().tier.expected_len());
    }

    // The declared vocabulary sizes hold for the published tables.
    for name in [EncodingName::P50kBase, EncodingName::R50kBase] {
        registry.get_encoding(name).unwrap().validate().unwrap();
    }
    assert_eq!(registry.get("p50k_base").unwrap().n_vocab(), 50281);
    assert_eq!(registry.get("r50k_base").unwrap().n_vocab(), 50257);
    assert_eq!(registry.get("cl100k_base").unwrap().n_vocab(), 100277);

    // r50k is dense; p50k leaves rank 50256 to <|endoftext|>.
    assert!(registry.get("r50k_base").unwrap().check_dense_ranks().is_ok());
    assert!(registry.get("p50k_base").unwrap().check_dense_ranks().is_err());
}
