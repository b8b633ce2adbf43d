//! # Common Types

use std::sync::Arc;

/// A merge rank, or a reserved special token id.
///
/// Lower ranks are merged first by downstream byte-pair encoders.
pub type Rank = u32;

cfg_if::cfg_if! {
    if #[cfg(feature = "ahash")] {
        /// Type Alias for hash maps in this crate.
        pub type BPHashMap<K, V> = ahash::AHashMap<K, V>;

        /// Type Alias for hash sets in this crate.
        pub type BPHashSet<V> = ahash::AHashSet<V>;
    } else {
        /// Type Alias for hash maps in this crate.
        pub type BPHashMap<K, V> = std::collections::HashMap<K, V>;

        /// Type Alias for hash sets in this crate.
        pub type BPHashSet<V> = std::collections::HashSet<V>;
    }
}

/// Create a new hash map with the given capacity.
pub fn hash_map_with_capacity<K, V>(capacity: usize) -> BPHashMap<K, V> {
    BPHashMap::with_capacity(capacity)
}

/// A map from token byte-sequence to merge [`Rank`].
pub type MergeRanks = BPHashMap<Vec<u8>, Rank>;

/// A shared, immutable [`MergeRanks`] table.
pub type SharedMergeRanks = Arc<MergeRanks>;

/// A map from reserved literal to special token id.
pub type SpecialTokens = BPHashMap<String, Rank>;
