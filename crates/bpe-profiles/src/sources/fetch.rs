//! # Generic Fetch Source

use std::{fs, sync::Arc};

use parking_lot::Mutex;

#[cfg(feature = "download")]
use bpe_profiles_disk_cache::{BpeProfilesDiskCache, BpeProfilesDiskCacheOptions};

use crate::{
    errors::{BPResult, BpeProfilesError},
    io::parse_tiktoken_ranks,
    sources::{VocabSource, VocabTier},
    types::{BPHashMap, SharedMergeRanks},
};

/// Options for [`FetchVocabSource`].
#[derive(Clone, Debug)]
pub struct FetchOptions {
    /// Whether URL locators may be downloaded when they are not already cached.
    pub download: bool,

    /// Whether canonical locators are checked against their published hashes.
    pub verify_hashes: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            download: true,
            verify_hashes: true,
        }
    }
}

impl FetchOptions {
    /// Set whether downloads are allowed.
    pub fn with_download(
        mut self,
        download: bool,
    ) -> Self {
        self.download = download;
        self
    }

    /// Set whether canonical hashes are verified.
    pub fn with_verify_hashes(
        mut self,
        verify_hashes: bool,
    ) -> Self {
        self.verify_hashes = verify_hashes;
        self
    }
}

/// Is this locator a network URL?
pub fn is_url(locator: &str) -> bool {
    locator.starts_with("http://") || locator.starts_with("https://")
}

/// A [`VocabSource`] which reads `tiktoken` rank files from arbitrary locators.
///
/// * `http://` and `https://` locators are downloaded through the disk cache.
/// * Anything else is read as a local file path.
///
/// Parsed tables are memoized per locator, for the life of the source, and
/// are never evicted; memory grows with every distinct locator loaded.
/// Prefer one long-lived source over a small, fixed set of locators.
pub struct FetchVocabSource {
    options: FetchOptions,

    #[cfg(feature = "download")]
    disk_cache: Option<Mutex<BpeProfilesDiskCache>>,

    tables: Mutex<BPHashMap<String, SharedMergeRanks>>,
}

impl FetchVocabSource {
    /// A source which only reads local files; URL locators fail.
    pub fn local(options: FetchOptions) -> Self {
        Self {
            options,
            #[cfg(feature = "download")]
            disk_cache: None,
            tables: Default::default(),
        }
    }

    /// A source which downloads URL locators through `disk_cache`.
    #[cfg(feature = "download")]
    pub fn new(
        disk_cache: BpeProfilesDiskCache,
        options: FetchOptions,
    ) -> Self {
        Self {
            options,
            disk_cache: Some(Mutex::new(disk_cache)),
            tables: Default::default(),
        }
    }

    /// A downloading source over the default disk cache.
    #[cfg(feature = "download")]
    pub fn try_default() -> BPResult<Self> {
        let disk_cache = BpeProfilesDiskCache::new(BpeProfilesDiskCacheOptions::default())
            .map_err(|e| BpeProfilesError::Fetch(format!("{e:#}")))?;
        Ok(Self::new(disk_cache, FetchOptions::default()))
    }

    /// The source options.
    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    /// Read the raw bytes behind a locator.
    ///
    /// Canonical locators are hash-checked when
    /// [`FetchOptions::verify_hashes`] is set.
    pub fn read_locator(
        &self,
        locator: &str,
    ) -> BPResult<Vec<u8>> {
        let data = if is_url(locator) {
            self.read_url(locator)?
        } else {
            fs::read(locator)?
        };

        if self.options.verify_hashes
            && let Some(tier) = VocabTier::from_locator(locator)
        {
            tier.resource().verify(&data)?;
        }

        Ok(data)
    }

    #[cfg(feature = "download")]
    fn read_url(
        &self,
        url: &str,
    ) -> BPResult<Vec<u8>> {
        let disk_cache = self.disk_cache.as_ref().ok_or_else(|| {
            BpeProfilesError::Fetch(format!("no disk cache configured for {url}"))
        })?;

        let path = disk_cache
            .lock()
            .load_url(url, self.options.download)
            .map_err(|e| BpeProfilesError::Fetch(format!("{e:#}")))?;

        Ok(fs::read(path)?)
    }

    #[cfg(not(feature = "download"))]
    fn read_url(
        &self,
        url: &str,
    ) -> BPResult<Vec<u8>> {
        Err(BpeProfilesError::Fetch(format!(
            "the \"download\" feature is disabled: {url}"
        )))
    }
}

impl VocabSource for FetchVocabSource {
    fn id(&self) -> String {
        "fetch".to_string()
    }

    fn load(
        &self,
        locator: &str,
    ) -> BPResult<SharedMergeRanks> {
        if let Some(ranks) = self.tables.lock().get(locator) {
            return Ok(ranks.clone());
        }

        // Not holding the table lock across the read; a racing load parses
        // twice, and the first insert wins.
        let ranks = Arc::new(parse_tiktoken_ranks(&self.read_locator(locator)?)?);
        log::info!("loaded {} tokens from {locator}", ranks.len());

        Ok(self
            .tables
            .lock()
            .entry(locator.to_string())
            .or_insert(ranks)
            .clone())
    }
}
