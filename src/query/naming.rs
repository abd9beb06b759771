//! Column name to JSON field name conversion
//!
//! Legacy columns are PascalCase with embedded acronyms and numeric suffixes
//! (`BalanceThis01`, `ICCode`, `IsTMBLine`). Three passes turn them into
//! snake_case: split before a capitalised word, split between a lowercase
//! letter or digit and a capital, split between a letter and a digit. The
//! result is lowercased.

use once_cell::sync::Lazy;
use regex::Regex;

static CAPITALISED_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(.)([A-Z][a-z]+)").expect("valid capitalised word pattern"));

static LOWER_THEN_UPPER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid case boundary pattern"));

static LETTER_THEN_DIGIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-zA-Z])(\d)").expect("valid digit boundary pattern"));

pub fn to_snake_case(column: &str) -> String {
    let name = CAPITALISED_WORD.replace_all(column, "${1}_${2}");
    let name = LOWER_THEN_UPPER.replace_all(&name, "${1}_${2}");
    let name = LETTER_THEN_DIGIT.replace_all(&name, "${1}_${2}");

    name.to_lowercase()
}
