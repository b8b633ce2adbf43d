//! # bpe-profiles-disk-cache
//!
//! Download-once storage for remote vocabulary files.
#![warn(missing_docs)]

use crate::path_resolver::PathResolver;

pub mod disk_cache;
pub mod path_resolver;
pub mod path_utils;

pub use disk_cache::{BpeProfilesDiskCache, BpeProfilesDiskCacheOptions};

/// Environment variable key to override the default cache directory.
pub const BPE_PROFILES_CACHE_DIR: &str = "BPE_PROFILES_CACHE_DIR";
/// Environment variable key to override the default data directory.
pub const BPE_PROFILES_DATA_DIR: &str = "BPE_PROFILES_DATA_DIR";

/// Default [`PathResolver`] for bpe-profiles.
pub const BPE_PROFILES_CACHE_CONFIG: PathResolver = PathResolver {
    qualifier: "io",
    organization: "crates",
    application: "bpe-profiles",
    cache_env_vars: &[BPE_PROFILES_CACHE_DIR],
    data_env_vars: &[BPE_PROFILES_DATA_DIR],
};
