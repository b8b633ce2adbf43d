//! # Vocabulary Sources
//!
//! A [`VocabSource`] maps a locator (a local path, or a URL) to a
//! [`MergeRanks`](crate::types::MergeRanks) table.
//!
//! * [`EmbeddedVocabSource`] - tables decoded once from bundled snapshots;
//!   only the three canonical locators are recognized.
//! * [`FetchVocabSource`] - reads local files, or downloads URLs,
//!   and parses the `tiktoken` text format.
//!
//! For the canonical tables both must produce identical rank assignments.

mod embedded;
mod fetch;
pub mod resources;

#[doc(inline)]
pub use embedded::*;
#[doc(inline)]
pub use fetch::*;

use crate::{
    errors::BPResult,
    sources::resources::{
        CL100K_BASE_TIKTOKEN_RESOURCE,
        ConstUrlResource,
        P50K_BASE_TIKTOKEN_RESOURCE,
        R50K_BASE_TIKTOKEN_RESOURCE,
    },
    types::SharedMergeRanks,
};

/// A capability for loading merge-rank tables.
///
/// Shared by every caller of an [`EncodingRegistry`](crate::EncodingRegistry),
/// so implementations must be thread-safe.
pub trait VocabSource: Send + Sync {
    /// A short name for logging.
    fn id(&self) -> String {
        core::any::type_name::<Self>().to_string()
    }

    /// Load the merge-rank table named by `locator`.
    ///
    /// ## Returns
    /// * `Ok(ranks)` - on success.
    /// * `Err(BpeProfilesError::InvalidVocabulary)` - the locator is not recognized.
    /// * `Err(e)` - on any other error.
    fn load(
        &self,
        locator: &str,
    ) -> BPResult<SharedMergeRanks>;
}

/// The canonical vocabulary tables, by size.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum_macros::EnumString,
    strum_macros::EnumIter,
    strum_macros::Display,
)]
pub enum VocabTier {
    /// The "`cl100k_base`" table.
    #[strum(serialize = "large")]
    Large,

    /// The "`p50k_base`" table.
    #[strum(serialize = "medium")]
    Medium,

    /// The "`r50k_base`" table.
    #[strum(serialize = "small")]
    Small,
}

impl VocabTier {
    /// All tiers.
    pub const ALL: [VocabTier; 3] = [VocabTier::Large, VocabTier::Medium, VocabTier::Small];

    /// The published resource for this tier.
    pub fn resource(&self) -> &'static ConstUrlResource {
        use VocabTier::*;
        match self {
            Large => &CL100K_BASE_TIKTOKEN_RESOURCE,
            Medium => &P50K_BASE_TIKTOKEN_RESOURCE,
            Small => &R50K_BASE_TIKTOKEN_RESOURCE,
        }
    }

    /// The canonical locator for this tier.
    pub fn locator(&self) -> &'static str {
        self.resource().locator()
    }

    /// The number of entries in the published table.
    pub fn expected_len(&self) -> usize {
        use VocabTier::*;
        match self {
            Large => 100_256,
            Medium => 50_280,
            Small => 50_256,
        }
    }

    /// The file name used for this tier in a snapshot directory.
    pub fn snapshot_file_name(&self) -> &'static str {
        use VocabTier::*;
        match self {
            Large => "cl100k_base.bprt",
            Medium => "p50k_base.bprt",
            Small => "r50k_base.bprt",
        }
    }

    /// Find the tier whose canonical locator is exactly `locator`.
    pub fn from_locator(locator: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.locator() == locator)
    }
}
