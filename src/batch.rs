//! Batch pipeline: raw input → terms → translations → identifiers.

use crate::error::TranslationError;
use crate::formatter::FormatMode;
use crate::translate::schema::{FormattedResult, TranslationPair};
use crate::translator::Translator;
use chrono::Utc;

/// Split pasted input into terms. Newlines and commas both separate terms;
/// surrounding whitespace is trimmed and empty entries dropped.
#[must_use]
pub fn split_terms(input: &str) -> Vec<String> {
    input
        .split(['\n', ',', '\r'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Format every pair. All results of one batch share a timestamp.
#[must_use]
pub fn format_pairs(pairs: Vec<TranslationPair>, mode: FormatMode) -> Vec<FormattedResult> {
    let timestamp = Utc::now().timestamp_millis();
    pairs
        .into_iter()
        .map(|pair| FormattedResult::from_pair(pair, mode, timestamp))
        .collect()
}

/// Split, translate in a single request, and format.
///
/// # Errors
/// Propagates the [`TranslationError`] of the batch request unchanged.
pub async fn translate_and_format(
    translator: &Translator,
    input: &str,
    mode: FormatMode,
) -> Result<Vec<FormattedResult>, TranslationError> {
    let terms = split_terms(input);
    translate_terms(translator, &terms, mode).await
}

/// Translate already-split terms and format the results.
///
/// # Errors
/// Propagates the [`TranslationError`] of the batch request unchanged.
pub async fn translate_terms(
    translator: &Translator,
    terms: &[String],
    mode: FormatMode,
) -> Result<Vec<FormattedResult>, TranslationError> {
    let pairs = translator.translate_batch(terms).await?;
    Ok(format_pairs(pairs, mode))
}

/// Tab-separated `formatted<TAB>original` lines, ready to paste into a spreadsheet.
#[must_use]
pub fn to_tsv(results: &[FormattedResult]) -> String {
    results
        .iter()
        .map(|r| format!("{}\t{}", r.formatted, r.original))
        .collect::<Vec<_>>()
        .join("\n")
}
