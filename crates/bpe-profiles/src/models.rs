//! # Model Name Resolution
//!
//! Maps model identifiers (`"gpt-4"`, `"text-davinci-003"`, ...) to encoding names.
//!
//! Resolution order:
//! 1. an exact match in [`MODEL_TO_ENCODING`];
//! 2. the longest matching prefix in [`MODEL_PREFIX_TO_ENCODING`];
//! 3. otherwise, [`BpeProfilesError::UnknownModel`].

use crate::{
    errors::{BPResult, BpeProfilesError},
    profiles::EncodingName::{self, *},
};

/// Exact model identifiers.
///
/// Matches the published `tiktoken` table, with one exception: `"gpt2"`
/// maps to [`EncodingName::R50kBase`], the table GPT-2 was trained with,
/// rather than to a `"gpt2"` encoding that has no profile.
pub const MODEL_TO_ENCODING: &[(&str, EncodingName)] = &[
    // chat
    ("gpt-4", Cl100kBase),
    ("gpt-3.5-turbo", Cl100kBase),
    // text
    ("text-davinci-003", P50kBase),
    ("text-davinci-002", P50kBase),
    ("text-davinci-001", R50kBase),
    ("text-curie-001", R50kBase),
    ("text-babbage-001", R50kBase),
    ("text-ada-001", R50kBase),
    ("davinci", R50kBase),
    ("curie", R50kBase),
    ("babbage", R50kBase),
    ("ada", R50kBase),
    // code
    ("code-davinci-002", P50kBase),
    ("code-davinci-001", P50kBase),
    ("code-cushman-002", P50kBase),
    ("code-cushman-001", P50kBase),
    ("davinci-codex", P50kBase),
    ("cushman-codex", P50kBase),
    // edit
    ("text-davinci-edit-001", P50kEdit),
    ("code-davinci-edit-001", P50kEdit),
    // embeddings
    ("text-embedding-ada-002", Cl100kBase),
    // old embeddings
    ("text-similarity-davinci-001", R50kBase),
    ("text-similarity-curie-001", R50kBase),
    ("text-similarity-babbage-001", R50kBase),
    ("text-similarity-ada-001", R50kBase),
    ("text-search-davinci-doc-001", R50kBase),
    ("text-search-curie-doc-001", R50kBase),
    ("text-search-babbage-doc-001", R50kBase),
    ("text-search-ada-doc-001", R50kBase),
    ("code-search-babbage-code-001", R50kBase),
    ("code-search-ada-code-001", R50kBase),
    // open source
    ("gpt2", R50kBase),
];

/// Model identifier prefixes.
pub const MODEL_PREFIX_TO_ENCODING: &[(&str, EncodingName)] = &[
    // e.g. "gpt-4-0314", "gpt-4-32k"
    ("gpt-4-", Cl100kBase),
    // e.g. "gpt-3.5-turbo-0301"
    ("gpt-3.5-turbo-", Cl100kBase),
];

/// The entry with the longest prefix of `model`.
///
/// Ties go to the earlier entry.
pub fn longest_prefix_match<'a, V>(
    model: &str,
    prefixes: &'a [(&'a str, V)],
) -> Option<&'a V> {
    let mut best: Option<&'a (&'a str, V)> = None;
    for entry in prefixes {
        if model.starts_with(entry.0) && best.is_none_or(|b| entry.0.len() > b.0.len()) {
            best = Some(entry);
        }
    }
    best.map(|(_, v)| v)
}

/// Resolve `model` against the given tables.
pub fn resolve_model_with(
    model: &str,
    exact: &[(&str, EncodingName)],
    prefixes: &[(&str, EncodingName)],
) -> BPResult<EncodingName> {
    exact
        .iter()
        .find(|(m, _)| *m == model)
        .map(|(_, name)| name)
        .or_else(|| longest_prefix_match(model, prefixes))
        .copied()
        .ok_or_else(|| BpeProfilesError::UnknownModel(model.to_string()))
}

/// Resolve a model identifier to its encoding name.
///
/// ## Returns
/// * `Ok(name)` - on a match.
/// * `Err(BpeProfilesError::UnknownModel)` - otherwise.
pub fn resolve_model(model: &str) -> BPResult<EncodingName> {
    resolve_model_with(model, MODEL_TO_ENCODING, MODEL_PREFIX_TO_ENCODING)
}

/// Resolve either a canonical encoding name or a model identifier.
///
/// Encoding names win.
pub fn encoding_for_name(name: &str) -> BPResult<EncodingName> {
    EncodingName::parse(name).or_else(|_| resolve_model(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BPHashSet;

    #[test]
    fn test_exact_models() {
        assert_eq!(resolve_model("gpt-4").unwrap(), Cl100kBase);
        assert_eq!(resolve_model("gpt-3.5-turbo").unwrap(), Cl100kBase);
        assert_eq!(resolve_model("text-embedding-ada-002").unwrap(), Cl100kBase);
        assert_eq!(resolve_model("text-davinci-003").unwrap(), P50kBase);
        assert_eq!(resolve_model("cushman-codex").unwrap(), P50kBase);
        assert_eq!(resolve_model("code-davinci-edit-001").unwrap(), P50kEdit);
        assert_eq!(resolve_model("davinci").unwrap(), R50kBase);
        assert_eq!(resolve_model("code-search-ada-code-001").unwrap(), R50kBase);
        assert_eq!(resolve_model("gpt2").unwrap(), R50kBase);
    }

    #[test]
    fn test_tables_are_unambiguous() {
        let models: BPHashSet<&str> = MODEL_TO_ENCODING.iter().map(|(m, _)| *m).collect();
        assert_eq!(models.len(), MODEL_TO_ENCODING.len());

        let prefixes: BPHashSet<&str> = MODEL_PREFIX_TO_ENCODING.iter().map(|(p, _)| *p).collect();
        assert_eq!(prefixes.len(), MODEL_PREFIX_TO_ENCODING.len());
    }

    #[test]
    fn test_prefix_models() {
        assert_eq!(resolve_model("gpt-4-0314").unwrap(), Cl100kBase);
        assert_eq!(resolve_model("gpt-4-32k").unwrap(), Cl100kBase);
        assert_eq!(resolve_model("gpt-3.5-turbo-0301").unwrap(), Cl100kBase);
    }

    #[test]
    fn test_unknown_models() {
        for model in ["", "gpt-5", "gpt-4o", "gpt-3.5", "GPT-4", "davinci-002", "gpt2-xl"] {
            assert!(
                matches!(resolve_model(model), Err(BpeProfilesError::UnknownModel(_))),
                "{model:?}"
            );
        }
    }

    #[test]
    fn test_exact_beats_prefix() {
        let exact = [("gpt-4-special", P50kBase)];
        let prefixes = [("gpt-4-", Cl100kBase)];
        assert_eq!(
            resolve_model_with("gpt-4-special", &exact, &prefixes).unwrap(),
            P50kBase
        );
        assert_eq!(
            resolve_model_with("gpt-4-other", &exact, &prefixes).unwrap(),
            Cl100kBase
        );
    }

    #[test]
    fn test_longest_prefix_wins() {
        let prefixes = [("gpt-", R50kBase), ("gpt-4-32k-", P50kEdit), ("gpt-4-", Cl100kBase)];

        assert_eq!(longest_prefix_match("gpt-4-32k-0613", &prefixes), Some(&P50kEdit));
        assert_eq!(longest_prefix_match("gpt-4-0613", &prefixes), Some(&Cl100kBase));
        assert_eq!(longest_prefix_match("gpt-3", &prefixes), Some(&R50kBase));
        assert_eq!(longest_prefix_match("davinci", &prefixes), None);

        // Independent of table order.
        let mut reversed = prefixes;
        reversed.reverse();
        assert_eq!(longest_prefix_match("gpt-4-32k-0613", &reversed), Some(&P50kEdit));
    }

    #[test]
    fn test_encoding_for_name() {
        assert_eq!(encoding_for_name("p50k_edit").unwrap(), P50kEdit);
        assert_eq!(encoding_for_name("gpt-4-0613").unwrap(), Cl100kBase);
        assert!(matches!(
            encoding_for_name("o200k_base"),
            Err(BpeProfilesError::UnknownModel(_))
        ));
    }
}
