use crate::encoding::WChar;
use crate::util::{units_eq, units_eq_ci, units_len};

/**
Tests whether `text` ends with `suffix`.

`false` if either is absent, or if `suffix` is longer than `text`.
*/
pub fn ends_with(text: Option<&[WChar]>, suffix: Option<&[WChar]>) -> bool {
    ends_with_by(text, suffix, units_eq)
}

/**
Tests whether `text` ends with `suffix`, ignoring case.

`false` if either is absent, or if `suffix` is longer than `text`.
*/
pub fn ends_with_ci(text: Option<&[WChar]>, suffix: Option<&[WChar]>) -> bool {
    ends_with_by(text, suffix, units_eq_ci)
}

fn ends_with_by<F>(text: Option<&[WChar]>, suffix: Option<&[WChar]>, eq: F) -> bool
where
    F: Fn(&[WChar], &[WChar]) -> bool,
{
    let (text, suffix) = match (text, suffix) {
        (Some(text), Some(suffix)) => (text, suffix),
        _ => return false,
    };
    let text_len = units_len(text);
    let suffix_len = units_len(suffix);
    if suffix_len > text_len {
        return false;
    }
    eq(&text[text_len - suffix_len..text_len], &suffix[..suffix_len])
}

/**
`true` for an absent string, or one with no content.
*/
pub fn is_empty(s: Option<&[WChar]>) -> bool {
    match s {
        None => true,
        Some(s) => units_len(s) == 0,
    }
}
