//! # `bpe-profiles` Encoding Profile Registry
//!
//! Resolves a model or encoding name into a fully materialized BPE
//! [`Encoding`]: split pattern, merge-rank table, and special tokens.
//!
//! `bpe-profiles` is compatible with the `tiktoken` `cl100k_base`, `p50k_base`,
//! `p50k_edit`, and `r50k_base` encodings.
//!
//! See:
//! * [`registry`] for the application-owned [`EncodingRegistry`].
//! * [`models`] to resolve model identifiers to encoding names.
//! * [`profiles`] for the profile definitions and builder.
//! * [`sources`] for the embedded and fetching [`VocabSource`]s.
//! * [`io`] for the binary snapshot and `tiktoken` text formats.
//!
//! ## Crate Features
//!
//! #### feature: ``default``
//!
//! * ``ahash``
//! * ``download``
//!
//! #### feature: ``download``
//!
//! * ``bpe-profiles-disk-cache``
//!
//! The download feature enables fetching vocabularies from the internet,
//! through [`sources::FetchVocabSource`]. Without it, the fetch source
//! only reads local files.
//!
//! #### feature: ``ahash``
//!
//! This swaps all HashMap/HashSet implementations for ``ahash``.
//!
//! This is done by the ``types::BPHash{*}`` type alias machinery.
//!
//! ## Loading Profiles
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use bpe_profiles::{
//!     EncodingRegistry,
//!     sources::{EmbeddedVocabSource, write_snapshot_dir},
//! };
//!
//! # #[cfg(feature = "download")]
//! # fn example() -> bpe_profiles::BPResult<()> {
//! use bpe_profiles::sources::{FetchVocabSource, default_snapshot_dir};
//!
//! // One-time: materialize the snapshots from the published files.
//! let dir = default_snapshot_dir().expect("no data dir");
//! write_snapshot_dir(&dir, &FetchVocabSource::try_default()?)?;
//!
//! // At startup: decode the snapshots once, and share the registry.
//! let registry = EncodingRegistry::new(Arc::new(EmbeddedVocabSource::load_dir(&dir)?));
//!
//! let enc = registry.get_for_model("gpt-3.5-turbo")?;
//! assert_eq!(enc.name().as_str(), "cl100k_base");
//! # Ok(())
//! # }
//! ```
#![warn(missing_docs, unused)]

#[cfg(feature = "download")]
#[doc(inline)]
pub use bpe_profiles_disk_cache as disk_cache;

pub mod encoding;
pub mod errors;
pub mod io;
pub mod models;
pub mod patterns;
pub mod profiles;
pub mod registry;
pub mod sources;
pub mod specials;
pub mod types;

#[doc(inline)]
pub use encoding::Encoding;
#[doc(inline)]
pub use errors::{BPResult, BpeProfilesError};
#[doc(inline)]
pub use models::{encoding_for_name, resolve_model};
#[doc(inline)]
pub use profiles::{CL100K_BASE, EncodingName, P50K_BASE, P50K_EDIT, R50K_BASE, build_encoding};
#[doc(inline)]
pub use registry::EncodingRegistry;
#[doc(inline)]
pub use sources::VocabSource;
#[doc(inline)]
pub use specials::{ENDOFPROMPT, ENDOFTEXT, FIM_MIDDLE, FIM_PREFIX, FIM_SUFFIX};
