//! # Encoding Profiles

use crate::{
    errors::{BPResult, BpeProfilesError},
    patterns::compile_pattern,
    profiles::EncodingName,
    types::{BPHashSet, MergeRanks, Rank, SharedMergeRanks, SpecialTokens},
};

/// A fully materialized encoding profile.
///
/// Immutable once constructed; registries hand out shared `Arc<Encoding>`s.
///
/// The merge table is never empty; see [`Encoding::new`].
#[derive(Debug, Clone)]
pub struct Encoding {
    name: EncodingName,
    split_pattern: &'static str,
    merge_ranks: SharedMergeRanks,
    special_tokens: SpecialTokens,
    explicit_vocab_size: Option<usize>,
}

impl Encoding {
    /// Assemble an encoding.
    ///
    /// ## Returns
    /// * `Ok(encoding)` - on success.
    /// * `Err(BpeProfilesError::InvalidVocabulary)` - if `merge_ranks` is empty.
    pub fn new(
        name: EncodingName,
        split_pattern: &'static str,
        merge_ranks: SharedMergeRanks,
        special_tokens: SpecialTokens,
        explicit_vocab_size: Option<usize>,
    ) -> BPResult<Self> {
        if merge_ranks.is_empty() {
            return Err(BpeProfilesError::InvalidVocabulary(format!(
                "{name}: empty merge table"
            )));
        }

        Ok(Self {
            name,
            split_pattern,
            merge_ranks,
            special_tokens,
            explicit_vocab_size,
        })
    }

    /// The canonical profile name.
    pub fn name(&self) -> EncodingName {
        self.name
    }

    /// The text-segmentation pattern.
    pub fn split_pattern(&self) -> &'static str {
        self.split_pattern
    }

    /// Compile [`Encoding::split_pattern`].
    pub fn compile_split_pattern(&self) -> BPResult<fancy_regex::Regex> {
        compile_pattern(self.split_pattern)
    }

    /// The merge-rank table.
    pub fn merge_ranks(&self) -> &MergeRanks {
        &self.merge_ranks
    }

    /// The shared merge-rank table; profiles over the same table share it.
    pub fn shared_merge_ranks(&self) -> &SharedMergeRanks {
        &self.merge_ranks
    }

    /// The special tokens.
    pub fn special_tokens(&self) -> &SpecialTokens {
        &self.special_tokens
    }

    /// Look up a special token id.
    pub fn special_token(
        &self,
        literal: &str,
    ) -> Option<Rank> {
        self.special_tokens.get(literal).copied()
    }

    /// The declared vocabulary size, if the profile declares one.
    pub fn explicit_vocab_size(&self) -> Option<usize> {
        self.explicit_vocab_size
    }

    /// The largest rank or special token id.
    pub fn max_token_value(&self) -> Rank {
        self.merge_ranks
            .values()
            .chain(self.special_tokens.values())
            .copied()
            .max()
            .unwrap_or_default()
    }

    /// `max_token_value() + 1`.
    pub fn n_vocab(&self) -> usize {
        self.max_token_value() as usize + 1
    }

    /// Check the tables for consistency.
    ///
    /// Not run at construction. Checks:
    /// * rank values are unique;
    /// * special token ids do not collide with ranks;
    /// * the declared vocabulary size, if any, matches the tables.
    pub fn validate(&self) -> BPResult<()> {
        let invalid = |msg: String| BpeProfilesError::InvalidVocabulary(format!("{}: {msg}", self.name));

        let ranks: BPHashSet<Rank> = self.merge_ranks.values().copied().collect();
        if ranks.len() != self.merge_ranks.len() {
            return Err(invalid(format!(
                "{} duplicated rank values",
                self.merge_ranks.len() - ranks.len()
            )));
        }

        for (literal, id) in self.special_tokens.iter() {
            if ranks.contains(id) {
                return Err(invalid(format!("special token {literal} collides with rank {id}")));
            }
        }

        if let Some(size) = self.explicit_vocab_size {
            let total = self.merge_ranks.len() + self.special_tokens.len();
            if total != size {
                return Err(invalid(format!(
                    "{total} ranks and special tokens, but declared vocab size is {size}"
                )));
            }
            if self.n_vocab() != size {
                return Err(invalid(format!(
                    "max token value is {}, but declared vocab size is {size}",
                    self.max_token_value()
                )));
            }
        }

        Ok(())
    }

    /// Check that ranks are exactly `0..merge_ranks().len()`.
    ///
    /// Separate from [`Encoding::validate`]; some published tables leave
    /// holes for special tokens.
    pub fn check_dense_ranks(&self) -> BPResult<()> {
        let n = self.merge_ranks.len();
        let mut seen = vec![false; n];
        for &rank in self.merge_ranks.values() {
            let idx = rank as usize;
            if idx >= n || seen[idx] {
                return Err(BpeProfilesError::InvalidVocabulary(format!(
                    "{}: ranks are not dense over 0..{n}; found {rank}",
                    self.name
                )));
            }
            seen[idx] = true;
        }
        Ok(())
    }
}
