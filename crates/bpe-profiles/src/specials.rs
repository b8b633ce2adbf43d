//! # Special Tokens
//!
//! Reserved literals shared across the encoding profiles.
//! The literals are shared; their ids are assigned per profile.

/// Generate a "<|$name|>" string literal.
#[macro_export]
macro_rules! carrot_str {
    ($value:literal) => {
        concat!("<|", $value, "|>")
    };
}

/// Declare special token constants with [`carrot_str!()`].
///
/// - ``declare_carrot_special!( (N1, V1), (N2, V2), ... );``
#[macro_export]
macro_rules! declare_carrot_special {
    ($(($name:ident, $value:literal)),* $(,)?) => {
        $(
            #[doc = concat!("Special token: ", $crate::carrot_str!($value))]
            pub const $name: &str = $crate::carrot_str!($value);
        )*
    };
}

declare_carrot_special!(
    (ENDOFTEXT, "endoftext"),
    (FIM_PREFIX, "fim_prefix"),
    (FIM_MIDDLE, "fim_middle"),
    (FIM_SUFFIX, "fim_suffix"),
    (ENDOFPROMPT, "endofprompt"),
);

/// The "`cl100k_base`" special tokens.
pub const CL100K_BASE_SPECIALS: &[(&str, u32)] = &[
    (ENDOFTEXT, 100257),
    (FIM_PREFIX, 100258),
    (FIM_MIDDLE, 100259),
    (FIM_SUFFIX, 100260),
    (ENDOFPROMPT, 100276),
];

/// The "`p50k_edit`" special tokens.
pub const P50K_EDIT_SPECIALS: &[(&str, u32)] = &[
    (ENDOFTEXT, 50256),
    (FIM_PREFIX, 50281),
    (FIM_MIDDLE, 50282),
    (FIM_SUFFIX, 50283),
];

/// The "`p50k_base`" special tokens.
pub const P50K_BASE_SPECIALS: &[(&str, u32)] = &[(ENDOFTEXT, 50256)];

/// The "`r50k_base`" special tokens.
pub const R50K_BASE_SPECIALS: &[(&str, u32)] = &[(ENDOFTEXT, 50256)];
