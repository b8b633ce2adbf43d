//! # Rank Table IO
//!
//! Two interchangeable encodings of a [`MergeRanks`](crate::types::MergeRanks) table:
//! * [`rank_snapshot`] - the compact binary form bundled with applications.
//! * [`tiktoken_io`] - the published `*.tiktoken` text form.
//!
//! Both must yield identical tables for the same data.

pub mod rank_snapshot;
pub mod tiktoken_io;

#[doc(inline)]
pub use rank_snapshot::*;
#[doc(inline)]
pub use tiktoken_io::*;
