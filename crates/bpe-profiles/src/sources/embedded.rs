//! # Embedded Snapshot Source

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    errors::{BPResult, BpeProfilesError},
    io::{decode_rank_snapshot, encode_rank_snapshot, load_rank_snapshot_path},
    sources::{VocabSource, VocabTier},
    types::{MergeRanks, SharedMergeRanks},
};

/// A [`VocabSource`] over the three canonical tables, decoded up front.
///
/// Construct it once, at startup, and share it; lookups never touch
/// the network or the filesystem.
///
/// Only the canonical locators are recognized, see [`VocabTier::locator`];
/// anything else is a [`BpeProfilesError::InvalidVocabulary`] error.
#[derive(Debug, Clone)]
pub struct EmbeddedVocabSource {
    large: SharedMergeRanks,
    medium: SharedMergeRanks,
    small: SharedMergeRanks,
}

impl EmbeddedVocabSource {
    /// Build from already decoded tables.
    pub fn from_tables(
        large: MergeRanks,
        medium: MergeRanks,
        small: MergeRanks,
    ) -> Self {
        Self {
            large: Arc::new(large),
            medium: Arc::new(medium),
            small: Arc::new(small),
        }
    }

    /// Decode binary rank snapshots; typically `include_bytes!()` blobs.
    ///
    /// A snapshot that fails to decode fails the whole source.
    pub fn decode(
        large: &[u8],
        medium: &[u8],
        small: &[u8],
    ) -> BPResult<Self> {
        let decode = |tier: VocabTier, blob: &[u8]| {
            decode_rank_snapshot(blob).map_err(|e| {
                BpeProfilesError::InvalidVocabulary(format!("{tier} snapshot: {e}"))
            })
        };

        let source = Self::from_tables(
            decode(VocabTier::Large, large)?,
            decode(VocabTier::Medium, medium)?,
            decode(VocabTier::Small, small)?,
        );
        log::debug!(
            "decoded embedded vocab snapshots: large={}, medium={}, small={}",
            source.large.len(),
            source.medium.len(),
            source.small.len(),
        );
        Ok(source)
    }

    /// Load the snapshots written by [`write_snapshot_dir`].
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> BPResult<Self> {
        let dir = dir.as_ref();
        let load = |tier: VocabTier| load_rank_snapshot_path(dir.join(tier.snapshot_file_name()));

        Ok(Self::from_tables(
            load(VocabTier::Large)?,
            load(VocabTier::Medium)?,
            load(VocabTier::Small)?,
        ))
    }

    /// Get the table for a tier.
    pub fn table(
        &self,
        tier: VocabTier,
    ) -> &SharedMergeRanks {
        match tier {
            VocabTier::Large => &self.large,
            VocabTier::Medium => &self.medium,
            VocabTier::Small => &self.small,
        }
    }

    /// Check each table against [`VocabTier::expected_len`].
    ///
    /// Not run on construction; call it on snapshots of the published tables
    /// to catch truncated or mismatched blobs.
    ///
    /// ## Returns
    /// * `Ok(())` - every table has its published size.
    /// * `Err(BpeProfilesError::InvalidVocabulary)` - naming the first mismatch.
    pub fn check_expected_sizes(&self) -> BPResult<()> {
        for tier in VocabTier::ALL {
            let found = self.table(tier).len();
            if found != tier.expected_len() {
                return Err(BpeProfilesError::InvalidVocabulary(format!(
                    "{tier} table has {found} entries, expected {}",
                    tier.expected_len()
                )));
            }
        }
        Ok(())
    }
}

impl VocabSource for EmbeddedVocabSource {
    fn id(&self) -> String {
        "embedded".to_string()
    }

    fn load(
        &self,
        locator: &str,
    ) -> BPResult<SharedMergeRanks> {
        VocabTier::from_locator(locator)
            .map(|tier| self.table(tier).clone())
            .ok_or_else(|| BpeProfilesError::InvalidVocabulary(locator.to_string()))
    }
}

/// Materialize a snapshot directory from another [`VocabSource`].
///
/// Loads each canonical locator through `source`, and writes one
/// binary snapshot per [`VocabTier`] under `dir`.
///
/// ## Returns
/// The written paths, in [`VocabTier::ALL`] order.
pub fn write_snapshot_dir<P: AsRef<Path>>(
    dir: P,
    source: &dyn VocabSource,
) -> BPResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let mut paths = Vec::with_capacity(VocabTier::ALL.len());
    for tier in VocabTier::ALL {
        let ranks = source.load(tier.locator())?;
        let path = dir.join(tier.snapshot_file_name());
        fs::write(&path, encode_rank_snapshot(&ranks)?)?;
        log::info!(
            "wrote {tier} snapshot ({} tokens) from {}: {}",
            ranks.len(),
            source.id(),
            path.display()
        );
        paths.push(path);
    }
    Ok(paths)
}

/// The default snapshot directory: `<data_dir>/snapshots`.
///
/// See [`BPE_PROFILES_DATA_DIR`](bpe_profiles_disk_cache::BPE_PROFILES_DATA_DIR)
/// for the environment override.
#[cfg(feature = "download")]
pub fn default_snapshot_dir() -> Option<PathBuf> {
    bpe_profiles_disk_cache::BPE_PROFILES_CACHE_CONFIG
        .resolve_data_dir::<PathBuf>(None)
        .map(|dir| dir.join("snapshots"))
}

#[cfg(test)]
mod tests {
    #[cfg(feature = "download")]
    use serial_test::serial;

    use super::*;

    fn table(tokens: &[&str]) -> MergeRanks {
        tokens
            .iter()
            .enumerate()
            .map(|(i, t)| (t.as_bytes().to_vec(), i as u32))
            .collect()
    }

    fn sample_source() -> EmbeddedVocabSource {
        EmbeddedVocabSource::from_tables(
            table(&["a", "b", "c"]),
            table(&["a", "b"]),
            table(&["a"]),
        )
    }

    #[test]
    fn test_canonical_locators() {
        let source = sample_source();

        assert_eq!(source.load(VocabTier::Large.locator()).unwrap().len(), 3);
        assert_eq!(source.load(VocabTier::Medium.locator()).unwrap().len(), 2);
        assert_eq!(source.load(VocabTier::Small.locator()).unwrap().len(), 1);

        // Same snapshot on every load.
        assert!(Arc::ptr_eq(
            &source.load(VocabTier::Medium.locator()).unwrap(),
            &source.load(VocabTier::Medium.locator()).unwrap(),
        ));
    }

    #[test]
    fn test_unknown_locator() {
        let source = sample_source();
        for locator in [
            "",
            "r50k_base.tiktoken",
            "/tmp/r50k_base.tiktoken",
            "https://openaipublic.blob.core.windows.net/encodings/o200k_base.tiktoken",
        ] {
            assert!(matches!(
                source.load(locator),
                Err(BpeProfilesError::InvalidVocabulary(_))
            ));
        }
    }

    #[test]
    fn test_decode_failure_is_fatal() {
        let good = encode_rank_snapshot(&table(&["a"])).unwrap();
        assert!(EmbeddedVocabSource::decode(&good, &good, &good).is_ok());
        assert!(matches!(
            EmbeddedVocabSource::decode(&good, b"junk", &good),
            Err(BpeProfilesError::InvalidVocabulary(_))
        ));
    }

    #[test]
    fn test_snapshot_dir_roundtrip() {
        let dir = tempdir::TempDir::new("embedded_test").unwrap();
        let source = sample_source();

        let paths = write_snapshot_dir(dir.path(), &source).unwrap();
        assert_eq!(paths.len(), 3);
        assert!(paths.iter().all(|p| p.exists()));

        let loaded = EmbeddedVocabSource::load_dir(dir.path()).unwrap();
        for tier in VocabTier::ALL {
            assert_eq!(loaded.table(tier), source.table(tier));
        }

        // Snapshot bytes are reproducible.
        let blob = fs::read(&paths[0]).unwrap();
        assert_eq!(encode_rank_snapshot(loaded.table(VocabTier::Large)).unwrap(), blob);
    }

    fn sized_table(len: usize) -> MergeRanks {
        (0..len as u32).map(|r| (r.to_le_bytes().to_vec(), r)).collect()
    }

    #[test]
    fn test_check_expected_sizes() {
        let [large, medium, small] = VocabTier::ALL.map(|t| t.expected_len());

        let source = EmbeddedVocabSource::from_tables(
            sized_table(large),
            sized_table(medium),
            sized_table(small),
        );
        assert!(source.check_expected_sizes().is_ok());

        // A truncated snapshot still decodes, but fails the size check.
        let truncated = EmbeddedVocabSource::decode(
            &encode_rank_snapshot(&sized_table(large)).unwrap(),
            &encode_rank_snapshot(&sized_table(medium - 1)).unwrap(),
            &encode_rank_snapshot(&sized_table(small)).unwrap(),
        )
        .unwrap();
        match truncated.check_expected_sizes() {
            Err(BpeProfilesError::InvalidVocabulary(msg)) => assert!(msg.contains("medium"), "{msg}"),
            other => panic!("unexpected: {other:?}"),
        }

        assert!(sample_source().check_expected_sizes().is_err());
    }

    #[cfg(feature = "download")]
    #[test]
    #[serial]
    fn test_default_snapshot_dir() {
        use bpe_profiles_disk_cache::BPE_PROFILES_DATA_DIR;

        let saved = std::env::var_os(BPE_PROFILES_DATA_DIR);

        unsafe { std::env::set_var(BPE_PROFILES_DATA_DIR, "/tmp/bpe-profiles/data") };
        assert_eq!(
            default_snapshot_dir(),
            Some(PathBuf::from("/tmp/bpe-profiles/data/snapshots"))
        );

        // An empty override falls through to the platform default.
        unsafe { std::env::set_var(BPE_PROFILES_DATA_DIR, "") };
        let platform = bpe_profiles_disk_cache::BPE_PROFILES_CACHE_CONFIG
            .default_dir(bpe_profiles_disk_cache::path_resolver::DirKind::Data)
            .map(|dir| dir.join("snapshots"));
        assert_eq!(default_snapshot_dir(), platform);

        match saved {
            Some(v) => unsafe { std::env::set_var(BPE_PROFILES_DATA_DIR, v) },
            None => unsafe { std::env::remove_var(BPE_PROFILES_DATA_DIR) },
        }
    }
}
