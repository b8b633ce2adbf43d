//! # Tiktoken Rank File IO
//!
//! Lines are:
//! ```terminaloutput
//! {BASE64 TOKEN} {RANK}
//! ```

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use base64::{Engine, prelude::BASE64_STANDARD};

use crate::{
    errors::{BPResult, BpeProfilesError},
    types::{MergeRanks, Rank},
};

/// Load [`MergeRanks`] from a tiktoken rank file.
pub fn load_tiktoken_ranks_path<P: AsRef<Path>>(path: P) -> BPResult<MergeRanks> {
    let reader = BufReader::new(File::open(path)?);
    read_tiktoken_ranks(reader)
}

/// Parse [`MergeRanks`] from the raw bytes of a tiktoken rank file.
pub fn parse_tiktoken_ranks(data: &[u8]) -> BPResult<MergeRanks> {
    read_tiktoken_ranks(data)
}

/// Read [`MergeRanks`] from a tiktoken rank line reader.
///
/// Blank lines are skipped; a token appearing twice is an
/// [`BpeProfilesError::InvalidVocabulary`].
pub fn read_tiktoken_ranks<R: BufRead>(reader: R) -> BPResult<MergeRanks> {
    let mut ranks = MergeRanks::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }

        let (token, rank) = line.split_once(' ').ok_or_else(|| {
            BpeProfilesError::Parse(format!("line {}: expected `<token> <rank>`", idx + 1))
        })?;

        let token = BASE64_STANDARD
            .decode(token)
            .map_err(|e| BpeProfilesError::Parse(format!("line {}: {e}", idx + 1)))?;

        let rank: Rank = rank
            .trim()
            .parse()
            .map_err(|e| BpeProfilesError::Parse(format!("line {}: {e}", idx + 1)))?;

        if ranks.insert(token, rank).is_some() {
            return Err(BpeProfilesError::InvalidVocabulary(format!(
                "line {}: duplicate token",
                idx + 1
            )));
        }
    }

    Ok(ranks)
}

/// Save [`MergeRanks`] to a tiktoken rank file.
pub fn save_tiktoken_ranks_path<P: AsRef<Path>>(
    ranks: &MergeRanks,
    path: P,
) -> BPResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_tiktoken_ranks(ranks, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write [`MergeRanks`] to a [`Write`] writer, in rank order.
pub fn write_tiktoken_ranks<W: Write>(
    ranks: &MergeRanks,
    writer: &mut W,
) -> BPResult<()> {
    let mut items: Vec<(Rank, &Vec<u8>)> = ranks.iter().map(|(t, &r)| (r, t)).collect();
    items.sort();

    for (rank, token) in items {
        writeln!(writer, "{} {}", BASE64_STANDARD.encode(token), rank)?;
    }

    Ok(())
}
