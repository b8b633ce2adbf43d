//! # Encoding Registry
//!
//! An application-owned cache of built [`Encoding`]s.
//!
//! Each canonical name has its own slot; a profile is built at most once per
//! registry, concurrent callers for the same name wait on that slot and share
//! the result, and callers for other names are not blocked.
//! A failed build leaves its slot empty, so the next call retries.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use bpe_profiles::{EncodingRegistry, sources::EmbeddedVocabSource};
//!
//! fn example(source: EmbeddedVocabSource) -> bpe_profiles::BPResult<()> {
//!     let registry = EncodingRegistry::new(Arc::new(source));
//!
//!     let enc = registry.get_for_model("gpt-4-0613")?;
//!     assert_eq!(enc.name().as_str(), "cl100k_base");
//!     assert!(Arc::ptr_eq(&enc, &registry.get("cl100k_base")?));
//!     Ok(())
//! }
//! ```

use std::{fmt, sync::Arc};

use once_cell::sync::OnceCell;
use strum::EnumCount;

use crate::{
    encoding::Encoding,
    errors::BPResult,
    models::encoding_for_name,
    profiles::{EncodingName, build_named_encoding},
    sources::VocabSource,
};

/// A thread-safe cache of [`Encoding`]s over a shared [`VocabSource`].
pub struct EncodingRegistry {
    source: Arc<dyn VocabSource>,
    slots: [OnceCell<Arc<Encoding>>; EncodingName::COUNT],
}

impl fmt::Debug for EncodingRegistry {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("EncodingRegistry")
            .field("source", &self.source.id())
            .field("cached", &self.cached_names())
            .finish()
    }
}

impl EncodingRegistry {
    /// Create an empty registry.
    pub fn new(source: Arc<dyn VocabSource>) -> Self {
        Self {
            source,
            slots: std::array::from_fn(|_| OnceCell::new()),
        }
    }

    /// The vocabulary source.
    pub fn source(&self) -> &Arc<dyn VocabSource> {
        &self.source
    }

    /// Get an encoding by canonical name, building it on first use.
    ///
    /// ## Returns
    /// * `Ok(encoding)` - the cached or newly built profile.
    /// * `Err(BpeProfilesError::UnknownEncoding)` - `name` is not canonical.
    /// * `Err(e)` - the build failed; nothing is cached.
    pub fn get(
        &self,
        name: &str,
    ) -> BPResult<Arc<Encoding>> {
        self.get_encoding(EncodingName::parse(name)?)
    }

    /// Get an encoding by [`EncodingName`], building it on first use.
    pub fn get_encoding(
        &self,
        name: EncodingName,
    ) -> BPResult<Arc<Encoding>> {
        let slot = &self.slots[name.index()];
        if let Some(encoding) = slot.get() {
            log::debug!("registry hit: {name}");
            return Ok(encoding.clone());
        }

        slot.get_or_try_init(|| {
            log::debug!("registry miss: {name}; loading from {}", self.source.id());
            match build_named_encoding(name, self.source.as_ref()) {
                Ok(encoding) => {
                    log::info!(
                        "built {name}: {} ranks, {} special tokens",
                        encoding.merge_ranks().len(),
                        encoding.special_tokens().len()
                    );
                    Ok(Arc::new(encoding))
                }
                Err(e) => {
                    log::warn!("failed to build {name}: {e}");
                    Err(e)
                }
            }
        })
        .cloned()
    }

    /// Get the encoding for a model identifier, or a canonical encoding name.
    ///
    /// See [`encoding_for_name`].
    pub fn get_for_model(
        &self,
        model: &str,
    ) -> BPResult<Arc<Encoding>> {
        self.get_encoding(encoding_for_name(model)?)
    }

    /// Get an already built encoding, without building it.
    pub fn cached(
        &self,
        name: EncodingName,
    ) -> Option<Arc<Encoding>> {
        self.slots[name.index()].get().cloned()
    }

    /// The names built so far, in [`EncodingName::index`] order.
    pub fn cached_names(&self) -> Vec<EncodingName> {
        EncodingName::ALL
            .into_iter()
            .filter(|name| self.slots[name.index()].get().is_some())
            .collect()
    }
}
