//! # Binary Rank Snapshots
//!
//! The bundled form of a [`MergeRanks`] table; all integers are little-endian.
//!
//! ```terminaloutput
//! magic   : b"BPRT"
//! count   : u32
//! entries : count x { key_len: u32, key: [u8; key_len], rank: u32 }
//! ```
//!
//! Entries are written in ascending `(rank, key)` order, so a decoded snapshot
//! re-encodes to identical bytes.

use std::{fs, path::Path};

use crate::{
    errors::{BPResult, BpeProfilesError},
    types::{MergeRanks, Rank, hash_map_with_capacity},
};

/// Snapshot file magic.
pub const RANK_SNAPSHOT_MAGIC: &[u8; 4] = b"BPRT";

/// Encode a [`MergeRanks`] table as a binary snapshot.
pub fn encode_rank_snapshot(ranks: &MergeRanks) -> BPResult<Vec<u8>> {
    let mut items: Vec<(Rank, &Vec<u8>)> = ranks.iter().map(|(t, &r)| (r, t)).collect();
    items.sort();

    let body: usize = items.iter().map(|(_, t)| t.len() + 8).sum();
    let mut buf = Vec::with_capacity(8 + body);

    buf.extend_from_slice(RANK_SNAPSHOT_MAGIC);
    buf.extend_from_slice(&len_u32(items.len())?.to_le_bytes());
    for (rank, token) in items {
        buf.extend_from_slice(&len_u32(token.len())?.to_le_bytes());
        buf.extend_from_slice(token);
        buf.extend_from_slice(&rank.to_le_bytes());
    }

    Ok(buf)
}

/// Decode a binary snapshot into a [`MergeRanks`] table.
///
/// Rejects bad magic, truncated input, trailing bytes, and duplicate keys.
pub fn decode_rank_snapshot(data: &[u8]) -> BPResult<MergeRanks> {
    let mut reader = SnapshotReader { data, pos: 0 };

    if reader.take(4)? != RANK_SNAPSHOT_MAGIC {
        return Err(BpeProfilesError::Parse("bad rank snapshot magic".to_string()));
    }

    let count = reader.read_u32()? as usize;
    // Each entry is at least 8 bytes; don't trust `count` for the allocation.
    let mut ranks = hash_map_with_capacity(count.min(reader.remaining() / 8));

    for _ in 0..count {
        let key_len = reader.read_u32()? as usize;
        let key = reader.take(key_len)?.to_vec();
        let rank = reader.read_u32()?;
        if ranks.insert(key, rank).is_some() {
            return Err(BpeProfilesError::InvalidVocabulary(format!(
                "duplicate token at offset {}",
                reader.pos
            )));
        }
    }

    if reader.remaining() != 0 {
        return Err(BpeProfilesError::Parse(format!(
            "{} trailing bytes in rank snapshot",
            reader.remaining()
        )));
    }

    Ok(ranks)
}

/// Load a binary snapshot from disk.
pub fn load_rank_snapshot_path<P: AsRef<Path>>(path: P) -> BPResult<MergeRanks> {
    decode_rank_snapshot(&fs::read(path)?)
}

/// Save a binary snapshot to disk.
pub fn save_rank_snapshot_path<P: AsRef<Path>>(
    ranks: &MergeRanks,
    path: P,
) -> BPResult<()> {
    fs::write(path, encode_rank_snapshot(ranks)?)?;
    Ok(())
}

fn len_u32(len: usize) -> BPResult<u32> {
    u32::try_from(len)
        .map_err(|_| BpeProfilesError::InvalidVocabulary(format!("length {len} exceeds u32")))
}

struct SnapshotReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SnapshotReader<'a> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(
        &mut self,
        n: usize,
    ) -> BPResult<&'a [u8]> {
        if n > self.remaining() {
            return Err(BpeProfilesError::Parse(format!(
                "truncated rank snapshot: wanted {n} bytes at offset {}",
                self.pos
            )));
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_u32(&mut self) -> BPResult<u32> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}
