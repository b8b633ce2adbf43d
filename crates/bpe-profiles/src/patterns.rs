//! # Split Patterns
//!
//! These patterns use look-ahead, and must be compiled with `fancy-regex`.

/// Join string literals with the "|" alternation separator.
///
/// ```rust
/// use bpe_profiles::join_patterns;
///
/// assert_eq!(join_patterns!("a", "b", "c"), "a|b|c");
/// ```
#[macro_export]
macro_rules! join_patterns {
    ($first:literal $(, $rest:literal)* $(,)?) => {
        concat!($first $(, "|", $rest)*)
    };
}

/// The "`r50k_base`" split pattern; shared by "`p50k_base`" and "`p50k_edit`".
pub const R50K_BASE_PATTERN: &str = join_patterns!(
    r"'s",
    r"'t",
    r"'re",
    r"'ve",
    r"'m",
    r"'ll",
    r"'d",
    r" ?\p{L}+",
    r" ?\p{N}+",
    r" ?[^\s\p{L}\p{N}]+",
    r"\s+(?!\S)",
    r"\s+",
);

/// The "`p50k_base`" split pattern.
pub const P50K_BASE_PATTERN: &str = R50K_BASE_PATTERN;

/// The "`cl100k_base`" split pattern.
///
/// Unlike [`R50K_BASE_PATTERN`], contractions match case-insensitively.
pub const CL100K_BASE_PATTERN: &str = join_patterns!(
    r"(?i:'s|'t|'re|'ve|'m|'ll|'d)",
    r"[^\r\n\p{L}\p{N}]?\p{L}+",
    r"\p{N}{1,3}",
    r" ?[^\s\p{L}\p{N}]+[\r\n]*",
    r"\s*[\r\n]+",
    r"\s+(?!\S)",
    r"\s+",
);

/// Compile a split pattern.
pub fn compile_pattern(pattern: &str) -> crate::BPResult<fancy_regex::Regex> {
    fancy_regex::Regex::new(pattern).map_err(|e| crate::BpeProfilesError::Parse(e.to_string()))
}
