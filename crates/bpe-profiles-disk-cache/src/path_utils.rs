//! # Path Utilities

use std::path::{Path, PathBuf};

/// Extend a path with a context and filename.
///
/// * Does not check that the path exists.
/// * Does not initialize the containing directories.
pub fn extend_path<P, S, F>(
    path: P,
    context: &[S],
    filename: F,
) -> PathBuf
where
    P: AsRef<Path>,
    S: AsRef<Path>,
    F: AsRef<Path>,
{
    let mut path = path.as_ref().to_path_buf();
    path.extend(context.iter().map(|s| s.as_ref()));
    path.push(filename.as_ref());
    path
}

/// Derive a cache context from a URL.
///
/// The scheme is dropped, and the host plus every directory component
/// of the URL path become context directories; the final component is left
/// to the downloader as the file name.
///
/// ```rust
/// use bpe_profiles_disk_cache::path_utils::url_context;
///
/// assert_eq!(
///     url_context("https://example.com/encodings/r50k_base.tiktoken"),
///     vec!["example.com".to_string(), "encodings".to_string()],
/// );
/// ```
pub fn url_context(url: &str) -> Vec<String> {
    let rest = match url.split_once("://") {
        Some((_, rest)) => rest,
        None => url,
    };
    let rest = rest.split(['?', '#']).next().unwrap_or_default();

    let mut parts: Vec<String> = rest
        .split('/')
        .filter(|p| !p.is_empty() && *p != "." && *p != "..")
        .map(|p| p.replace(':', "_"))
        .collect();
    parts.pop();
    parts
}
