//! Identifier casing.
//!
//! Turns free text (usually a model's English translation such as
//! `"total count"`) into a PascalCase or camelCase identifier. Only ASCII
//! letters and digits survive; everything else separates words.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum FormatMode {
    #[default]
    #[serde(rename = "PascalCase")]
    #[value(name = "PascalCase", alias = "pascal")]
    PascalCase,
    #[serde(rename = "camelCase")]
    #[value(name = "camelCase", alias = "camel")]
    CamelCase,
}

impl FormatMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PascalCase => "PascalCase",
            Self::CamelCase => "camelCase",
        }
    }
}

impl fmt::Display for FormatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format `text` as an identifier in the given casing.
///
/// Never fails: input without any ASCII letter or digit yields an empty string.
#[must_use]
pub fn format(text: &str, mode: FormatMode) -> String {
    let words = split_words(text);

    let mut out = String::with_capacity(text.len());
    for (i, word) in words.iter().enumerate() {
        if i == 0 && mode == FormatMode::CamelCase {
            out.push_str(&word.to_ascii_lowercase());
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

/// Split into ASCII alphanumeric words. A lowercase letter followed by an
/// uppercase one is a boundary, so `userID` gives `["user", "ID"]`.
fn split_words(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start: Option<usize> = None;
    let mut prev_lower = false;

    for (idx, ch) in text.char_indices() {
        if !ch.is_ascii_alphanumeric() {
            if let Some(s) = start.take() {
                words.push(&text[s..idx]);
            }
            prev_lower = false;
            continue;
        }

        if prev_lower && ch.is_ascii_uppercase() {
            if let Some(s) = start {
                words.push(&text[s..idx]);
            }
            start = Some(idx);
        } else if start.is_none() {
            start = Some(idx);
        }

        prev_lower = ch.is_ascii_lowercase();
    }

    if let Some(s) = start {
        words.push(&text[s..]);
    }

    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut s = String::with_capacity(word.len());
            s.push(first.to_ascii_uppercase());
            s.push_str(&chars.as_str().to_ascii_lowercase());
            s
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_space_separated_words() {
        assert_eq!(format("user id", FormatMode::PascalCase), "UserId");
        assert_eq!(format("user id", FormatMode::CamelCase), "userId");
    }

    #[test]
    fn test_camel_boundary_and_acronym_collapse() {
        assert_eq!(format("userID", FormatMode::PascalCase), "UserId");
        assert_eq!(format("parseURL", FormatMode::CamelCase), "parseUrl");
    }

    #[test]
    fn test_digits_stay_in_words() {
        assert_eq!(format("total_count_2", FormatMode::CamelCase), "totalCount2");
        assert_eq!(format("utf8 string", FormatMode::PascalCase), "Utf8String");
        assert_eq!(format("2 factor", FormatMode::CamelCase), "2Factor");
    }

    #[test]
    fn test_non_ascii_only_is_empty() {
        assert_eq!(format("总记录数", FormatMode::PascalCase), "");
        assert_eq!(format("总记录数", FormatMode::CamelCase), "");
        assert_eq!(format("", FormatMode::PascalCase), "");
        assert_eq!(format("  -- __ ", FormatMode::CamelCase), "");
    }

    #[test]
    fn test_mixed_script_keeps_ascii_words() {
        assert_eq!(format("总数 total", FormatMode::PascalCase), "Total");
        assert_eq!(format("récord count", FormatMode::PascalCase), "RCordCount");
    }

    #[test]
    fn test_all_caps_word_normalized() {
        assert_eq!(format("HTTP STATUS", FormatMode::PascalCase), "HttpStatus");
        assert_eq!(format("HTTP STATUS", FormatMode::CamelCase), "httpStatus");
    }

    #[test]
    fn test_reformatting_is_stable() {
        for (input, mode) in [
            ("UserId", FormatMode::PascalCase),
            ("userId", FormatMode::CamelCase),
            ("TotalCount", FormatMode::PascalCase),
            ("returnCount", FormatMode::CamelCase),
        ] {
            let once = format(input, mode);
            assert_eq!(once, input);
            assert_eq!(format(&once, mode), once);
        }
    }

    #[test]
    fn test_mode_serde_names() {
        assert_eq!(
            serde_json::to_string(&FormatMode::CamelCase).unwrap(),
            "\"camelCase\""
        );
        let mode: FormatMode = serde_json::from_str("\"PascalCase\"").unwrap();
        assert_eq!(mode, FormatMode::PascalCase);
        assert_eq!(FormatMode::default(), FormatMode::PascalCase);
    }

    #[test]
    fn test_mode_cli_names() {
        assert_eq!(
            FormatMode::from_str("camel", true).unwrap(),
            FormatMode::CamelCase
        );
        assert_eq!(
            FormatMode::from_str("PascalCase", false).unwrap(),
            FormatMode::PascalCase
        );
    }

    proptest! {
        #[test]
        fn prop_output_is_ascii_alphanumeric(s in ".*", camel in any::<bool>()) {
            let mode = if camel { FormatMode::CamelCase } else { FormatMode::PascalCase };
            let out = format(&s, mode);
            prop_assert!(out.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }
}
