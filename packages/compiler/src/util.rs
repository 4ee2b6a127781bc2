//! Utility Functions
//!
//! Common string helpers used by the pipeline and the code writer.

use once_cell::sync::Lazy;
use regex::Regex;

/// Identifiers the generated C# may use verbatim for field names.
static LEGAL_IDENTIFIER_REGEXP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z_][0-9a-zA-Z_]*$").unwrap());

/// Prefix of every per-type helper field.
pub const HELPER_FIELD_PREFIX: &str = "__";

/// Fold a name for case-insensitive comparison, one character at a time.
/// Characters whose lowercase form is longer than one character are kept.
pub fn fold_case(name: &str) -> String {
    name.chars()
        .map(|c| {
            let mut lower = c.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(l), None) => l,
                _ => c,
            }
        })
        .collect()
}

/// Case-insensitive name equality
pub fn names_match(a: &str, b: &str) -> bool {
    a == b || fold_case(a) == fold_case(b)
}

/// Case-insensitive `starts_with`
pub fn starts_with_ignore_case(name: &str, prefix: &str) -> bool {
    fold_case(name).starts_with(&fold_case(prefix))
}

pub fn is_legal_identifier(name: &str) -> bool {
    LEGAL_IDENTIFIER_REGEXP.is_match(name)
}

/// Field name used for instances of a helper type, e.g. `My.Helpers.Link` -> `__My_Helpers_Link`.
pub fn helper_field_name(type_name: &str) -> String {
    format!("{}{}", HELPER_FIELD_PREFIX, type_name.replace('.', "_"))
}
