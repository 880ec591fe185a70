//! Translation records and the JSON schema the model must answer with.

use crate::formatter::{self, FormatMode};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// One term as translated by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationPair {
    pub original: String,
    pub translated: String,
}

/// Top-level object the model returns: `{"translations": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationBatch {
    pub translations: Vec<TranslationPair>,
}

/// A translated term together with its identifier form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedResult {
    pub original: String,
    pub translated: String,
    pub formatted: String,
    /// Unix epoch milliseconds.
    pub timestamp: i64,
}

impl FormattedResult {
    #[must_use]
    pub fn from_pair(pair: TranslationPair, mode: FormatMode, timestamp: i64) -> Self {
        let formatted = formatter::format(&pair.translated, mode);
        Self {
            original: pair.original,
            translated: pair.translated,
            formatted,
            timestamp,
        }
    }
}

/// Name under which the schema is registered in `response_format`.
pub const SCHEMA_NAME: &str = "translations";

/// JSON schema for [`TranslationBatch`]. Every field is required.
#[must_use]
pub fn response_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "translations": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "original": { "type": "string" },
                        "translated": { "type": "string" }
                    },
                    "required": ["original", "translated"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["translations"],
        "additionalProperties": false
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_requires_all_fields() {
        let schema = response_schema();
        assert_eq!(schema["required"], json!(["translations"]));
        assert_eq!(
            schema["properties"]["translations"]["items"]["required"],
            json!(["original", "translated"])
        );
    }

    #[test]
    fn test_formatted_result_from_pair() {
        let pair = TranslationPair {
            original: "返回数".to_string(),
            translated: "return count".to_string(),
        };
        let result = FormattedResult::from_pair(pair, FormatMode::CamelCase, 1_700_000_000_000);

        assert_eq!(result.original, "返回数");
        assert_eq!(result.translated, "return count");
        assert_eq!(result.formatted, "returnCount");
        assert_eq!(result.timestamp, 1_700_000_000_000);
    }

    #[test]
    fn test_pair_missing_field_rejected() {
        let parsed = serde_json::from_str::<TranslationPair>(r#"{"original":"总数"}"#);
        assert!(parsed.is_err());
    }
}
