//! # Canonical Vocabulary Resources

use sha2::{Digest, Sha256};

use crate::errors::{BPResult, BpeProfilesError};

/// A resource with constant mirror URLs and an optional hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstUrlResource {
    urls: &'static [&'static str],
    hash: Option<&'static str>,
}

impl ConstUrlResource {
    /// Create a resource; the first of `urls` is the canonical locator.
    ///
    /// # Panics
    /// If `urls` is empty; in a `const` item, this fails the build.
    pub const fn new(
        urls: &'static [&'static str],
        hash: Option<&'static str>,
    ) -> Self {
        assert!(!urls.is_empty(), "ConstUrlResource requires at least one url");
        Self { urls, hash }
    }

    /// The mirror URLs; never empty.
    pub fn urls(&self) -> &'static [&'static str] {
        self.urls
    }

    /// The hex SHA-256 of the resource, if available.
    pub fn hash(&self) -> Option<&'static str> {
        self.hash
    }

    /// The canonical locator.
    pub fn locator(&self) -> &'static str {
        self.urls[0]
    }

    /// Check `data` against the resource hash, if there is one.
    pub fn verify(
        &self,
        data: &[u8],
    ) -> BPResult<()> {
        match self.hash {
            Some(expected) => verify_sha256(data, expected),
            None => Ok(()),
        }
    }
}

/// The "`cl100k_base.tiktoken`" vocabulary resource.
pub const CL100K_BASE_TIKTOKEN_RESOURCE: ConstUrlResource = ConstUrlResource::new(
    &["https://openaipublic.blob.core.windows.net/encodings/cl100k_base.tiktoken"],
    Some("223921b76ee99bde995b7ff738513eef100fb51d18c93597a113bcffe865b2a7"),
);

/// The "`p50k_base.tiktoken`" vocabulary resource.
pub const P50K_BASE_TIKTOKEN_RESOURCE: ConstUrlResource = ConstUrlResource::new(
    &["https://openaipublic.blob.core.windows.net/encodings/p50k_base.tiktoken"],
    Some("94b5ca7dff4d00767bc256fdd1b27e5b17361d7b8a5f968547f9f23eb70d2069"),
);

/// The "`r50k_base.tiktoken`" vocabulary resource.
pub const R50K_BASE_TIKTOKEN_RESOURCE: ConstUrlResource = ConstUrlResource::new(
    &["https://openaipublic.blob.core.windows.net/encodings/r50k_base.tiktoken"],
    Some("306cd27f03c1a714eca7108e03d66b7dc042abe8c258b44c199a7ed9838dd930"),
);

/// Hex-encoded SHA-256 of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

/// Check `data` against a hex SHA-256.
pub fn verify_sha256(
    data: &[u8],
    expected: &str,
) -> BPResult<()> {
    let actual = sha256_hex(data);
    if actual.eq_ignore_ascii_case(expected) {
        Ok(())
    } else {
        Err(BpeProfilesError::InvalidVocabulary(format!(
            "sha256 mismatch: expected {expected}, found {actual}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_verify() {
        let res = ConstUrlResource::new(
            &["https://example.com/abc", "https://mirror.example.com/abc"],
            Some("BA7816BF8F01CFEA414140DE5DAE2223B00361A396177A9CB410FF61F20015AD"),
        );
        assert_eq!(res.locator(), "https://example.com/abc");
        assert_eq!(res.urls().len(), 2);
        assert!(res.verify(b"abc").is_ok());
        assert!(matches!(
            res.verify(b"abd"),
            Err(BpeProfilesError::InvalidVocabulary(_))
        ));

        let unhashed = ConstUrlResource::new(&["https://example.com/abc"], None);
        assert_eq!(unhashed.hash(), None);
        assert!(unhashed.verify(b"anything").is_ok());
    }

    #[test]
    #[should_panic(expected = "at least one url")]
    fn test_resource_requires_url() {
        let urls: &'static [&'static str] = &[];
        let _ = ConstUrlResource::new(urls, None);
    }
}
