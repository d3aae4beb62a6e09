//! Reversible period protection around sentence splitting
//!
//! Periods inside version numbers, decimals, initials and ellipses would
//! otherwise read as sentence boundaries. [`protect`] rewrites them to
//! placeholder tokens before tokenization and [`restore`] puts them back on
//! the selected sentences. The two functions are exact inverses for any
//! input that does not already contain the placeholder strings; inputs that
//! do are out of contract and come back altered.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Placeholder for a protected period.
const PERIOD_TOKEN: &str = "<prd>";
/// Placeholder for a protected ellipsis.
const ELLIPSIS_TOKEN: &str = "<elps>";

/// Three-part version numbers, optionally `v`-prefixed (`v1.2.3`, `10.0.1`).
static VERSION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"v?\d+\.\d+\.\d+").unwrap());

/// Two-part decimals (`3.14`, `0.5`).
static DECIMAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+\.\d+").unwrap());

/// Single-letter initials (`U.S.`, `J.R.`).
static INITIALS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Za-z]\.[A-Za-z]\.").unwrap());

static ELLIPSIS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.\.\.").unwrap());

fn shield_periods(captures: &Captures) -> String {
    captures[0].replace('.', PERIOD_TOKEN)
}

/// Rewrite protected periods to placeholder tokens
///
/// Passes run in a fixed order (versions, then decimals, then initials,
/// then ellipses) so the most specific pattern wins at each position.
pub fn protect(text: &str) -> String {
    let text = VERSION.replace_all(text, shield_periods);
    let text = DECIMAL.replace_all(&text, shield_periods);
    let text = INITIALS.replace_all(&text, shield_periods);
    ELLIPSIS.replace_all(&text, ELLIPSIS_TOKEN).into_owned()
}

/// Put protected periods back
pub fn restore(text: &str) -> String {
    text.replace(ELLIPSIS_TOKEN, "...").replace(PERIOD_TOKEN, ".")
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: protect/restore round-trips any input without
        /// placeholder strings
        #[test]
        fn test_protect_restore_roundtrip(text in ".*") {
            prop_assume!(!text.contains(PERIOD_TOKEN) && !text.contains(ELLIPSIS_TOKEN));
            prop_assert_eq!(restore(&protect(&text)), text);
        }

        /// Property: protected text never contains a digit-period-digit run
        #[test]
        fn test_no_decimal_periods_survive(a in 0u32..10_000, b in 0u32..10_000) {
            let text = format!("value {a}.{b} recorded");
            let protected = protect(&text);
            prop_assert!(!protected.contains('.'));
        }
    }
}
