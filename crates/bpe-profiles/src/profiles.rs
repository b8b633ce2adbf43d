//! # Canonical Encoding Profiles
//!
//! The four profiles are declared as one table of [`EncodingSpec`]s;
//! [`build_encoding`] turns a spec and a [`VocabSource`] into an [`Encoding`].

use core::str::FromStr;

use crate::{
    encoding::Encoding,
    errors::{BPResult, BpeProfilesError},
    patterns::{CL100K_BASE_PATTERN, P50K_BASE_PATTERN, R50K_BASE_PATTERN},
    sources::{VocabSource, VocabTier},
    specials::{CL100K_BASE_SPECIALS, P50K_BASE_SPECIALS, P50K_EDIT_SPECIALS, R50K_BASE_SPECIALS},
    types::{Rank, SpecialTokens},
};

/// The "`cl100k_base`" encoding name.
pub const CL100K_BASE: &str = "cl100k_base";

/// The "`p50k_base`" encoding name.
pub const P50K_BASE: &str = "p50k_base";

/// The "`p50k_edit`" encoding name.
pub const P50K_EDIT: &str = "p50k_edit";

/// The "`r50k_base`" encoding name.
pub const R50K_BASE: &str = "r50k_base";

/// The canonical encoding names.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum_macros::EnumString,
    strum_macros::EnumIter,
    strum_macros::EnumCount,
    strum_macros::IntoStaticStr,
    strum_macros::Display,
)]
pub enum EncodingName {
    /// GPT-3.5/GPT-4 "`cl100k_base`" encoding.
    #[strum(serialize = "cl100k_base")]
    Cl100kBase,

    /// Codex edit "`p50k_edit`" encoding.
    #[strum(serialize = "p50k_edit")]
    P50kEdit,

    /// Codex "`p50k_base`" encoding.
    #[strum(serialize = "p50k_base")]
    P50kBase,

    /// GPT-2/GPT-3 "`r50k_base`" encoding.
    #[strum(serialize = "r50k_base")]
    R50kBase,
}

impl EncodingName {
    /// All names, in [`EncodingName::index`] order.
    pub const ALL: [EncodingName; 4] = [
        EncodingName::Cl100kBase,
        EncodingName::P50kEdit,
        EncodingName::P50kBase,
        EncodingName::R50kBase,
    ];

    /// A dense index in `0..EncodingName::COUNT`.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// The canonical name string.
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Parse a canonical name; anything else is an unknown encoding.
    pub fn parse(name: &str) -> BPResult<Self> {
        Self::from_str(name).map_err(|_| BpeProfilesError::UnknownEncoding(name.to_string()))
    }

    /// The profile definition.
    pub fn spec(&self) -> &'static EncodingSpec {
        &ENCODING_SPECS[self.index()]
    }
}

/// A constant encoding profile definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingSpec {
    /// The profile name.
    pub name: EncodingName,

    /// The text-segmentation pattern.
    pub pattern: &'static str,

    /// The special tokens.
    pub specials: &'static [(&'static str, Rank)],

    /// The merge table this profile is built over.
    pub tier: VocabTier,

    /// The declared vocabulary size, if any.
    pub explicit_vocab_size: Option<usize>,
}

impl EncodingSpec {
    /// The locator of the merge table.
    pub fn locator(&self) -> &'static str {
        self.tier.locator()
    }

    /// The special tokens, as a map.
    pub fn special_tokens(&self) -> SpecialTokens {
        self.specials
            .iter()
            .map(|&(literal, id)| (literal.to_string(), id))
            .collect()
    }

    /// Build the profile, loading its merge table from `source`.
    pub fn build(
        &self,
        source: &dyn VocabSource,
    ) -> BPResult<Encoding> {
        let merge_ranks = source.load(self.locator())?;
        Encoding::new(
            self.name,
            self.pattern,
            merge_ranks,
            self.special_tokens(),
            self.explicit_vocab_size,
        )
    }
}

/// The profile table, in [`EncodingName::index`] order.
pub const ENCODING_SPECS: [EncodingSpec; 4] = [
    EncodingSpec {
        name: EncodingName::Cl100kBase,
        pattern: CL100K_BASE_PATTERN,
        specials: CL100K_BASE_SPECIALS,
        tier: VocabTier::Large,
        explicit_vocab_size: None,
    },
    EncodingSpec {
        name: EncodingName::P50kEdit,
        pattern: P50K_BASE_PATTERN,
        specials: P50K_EDIT_SPECIALS,
        tier: VocabTier::Medium,
        explicit_vocab_size: None,
    },
    EncodingSpec {
        name: EncodingName::P50kBase,
        pattern: P50K_BASE_PATTERN,
        specials: P50K_BASE_SPECIALS,
        tier: VocabTier::Medium,
        explicit_vocab_size: Some(50281),
    },
    EncodingSpec {
        name: EncodingName::R50kBase,
        pattern: R50K_BASE_PATTERN,
        specials: R50K_BASE_SPECIALS,
        tier: VocabTier::Small,
        explicit_vocab_size: Some(50257),
    },
];

/// Build the named profile.
///
/// ## Returns
/// * `Ok(encoding)` - on success.
/// * `Err(BpeProfilesError::UnknownEncoding)` - `name` is not canonical.
/// * `Err(BpeProfilesError::InvalidVocabulary)` - the loaded table is empty.
/// * `Err(e)` - any error from `source`.
pub fn build_encoding(
    name: &str,
    source: &dyn VocabSource,
) -> BPResult<Encoding> {
    build_named_encoding(EncodingName::parse(name)?, source)
}

/// Build a profile by [`EncodingName`].
pub fn build_named_encoding(
    name: EncodingName,
    source: &dyn VocabSource,
) -> BPResult<Encoding> {
    name.spec().build(source)
}
