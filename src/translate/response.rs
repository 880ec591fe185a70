use super::openai_types::{ChatCompletionResponse, ChatErrorResponse};
use super::schema::{TranslationBatch, TranslationPair};
use crate::error::TranslationError;

/// Extract and validate the translations from a chat-completions response.
/// Pure function: order is kept exactly as the model returned it.
pub fn parse_translations(
    resp: &ChatCompletionResponse,
) -> Result<Vec<TranslationPair>, TranslationError> {
    let choice = resp
        .choices
        .first()
        .ok_or_else(|| TranslationError::malformed("response has no choices"))?;

    if let Some(ref refusal) = choice.message.refusal {
        return Err(TranslationError::malformed(format!(
            "model refused the request: {refusal}"
        )));
    }

    let content = choice
        .message
        .content
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| TranslationError::malformed("response has no content"))?;

    parse_batch_content(content)
}

/// Validate the model's JSON text against `{"translations":[{"original","translated"}]}`.
pub fn parse_batch_content(content: &str) -> Result<Vec<TranslationPair>, TranslationError> {
    let json = strip_code_fence(content);

    let value: serde_json::Value = serde_json::from_str(json).map_err(|e| {
        TranslationError::malformed(format!(
            "content is not valid JSON: {}. Content: {}",
            e,
            truncate(json, 300)
        ))
    })?;

    if value.get("translations").is_none() {
        return Err(TranslationError::schema("missing field `translations`"));
    }

    let batch: TranslationBatch =
        serde_json::from_value(value).map_err(|e| TranslationError::schema(e.to_string()))?;

    Ok(batch.translations)
}

/// Pull a readable message out of an error response body.
#[must_use]
pub fn provider_error_message(body: &str) -> String {
    match serde_json::from_str::<ChatErrorResponse>(body) {
        Ok(err) => err.error.message,
        Err(_) => truncate(body, 500).to_string(),
    }
}

/// Some providers wrap JSON-mode output in a Markdown fence anyway.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string ("json"), whether or not a newline follows it.
    inner
        .trim_start_matches(|c: char| c.is_ascii_alphabetic())
        .trim()
}

pub(crate) fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::openai_types::*;

    fn make_response(content: Option<&str>) -> ChatCompletionResponse {
        ChatCompletionResponse {
            id: "chatcmpl-abc123".to_string(),
            object: "chat.completion".to_string(),
            created: 0,
            model: "gemini-3-flash-preview".to_string(),
            choices: vec![Choice {
                index: 0,
                message: ChoiceMessage {
                    role: "assistant".to_string(),
                    content: content.map(str::to_string),
                    refusal: None,
                },
                finish_reason: Some("stop".to_string()),
            }],
            usage: None,
        }
    }

    #[test]
    fn test_valid_batch_keeps_service_order() {
        let resp = make_response(Some(
            r#"{"translations":[{"original":"返回数","translated":"return count"},{"original":"总数","translated":"total count"}]}"#,
        ));
        let pairs = parse_translations(&resp).unwrap();

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].original, "返回数");
        assert_eq!(pairs[0].translated, "return count");
        assert_eq!(pairs[1].original, "总数");
    }

    #[test]
    fn test_missing_translations_is_schema_error() {
        let resp = make_response(Some(r#"{"results":[]}"#));
        let err = parse_translations(&resp).unwrap_err();
        assert!(matches!(err, TranslationError::Schema { .. }));
    }

    #[test]
    fn test_item_missing_field_is_schema_error() {
        let err = parse_batch_content(r#"{"translations":[{"original":"总数"}]}"#).unwrap_err();
        assert!(matches!(err, TranslationError::Schema { .. }));
    }

    #[test]
    fn test_non_json_is_malformed() {
        let err = parse_batch_content("total count").unwrap_err();
        assert!(matches!(err, TranslationError::Malformed { .. }));
    }

    #[test]
    fn test_empty_content_is_malformed() {
        for content in [None, Some(""), Some("   ")] {
            let err = parse_translations(&make_response(content)).unwrap_err();
            assert!(matches!(err, TranslationError::Malformed { .. }));
        }
    }

    #[test]
    fn test_no_choices_is_malformed() {
        let mut resp = make_response(None);
        resp.choices.clear();
        let err = parse_translations(&resp).unwrap_err();
        assert!(matches!(err, TranslationError::Malformed { .. }));
    }

    #[test]
    fn test_refusal_is_malformed() {
        let mut resp = make_response(None);
        resp.choices[0].message.refusal = Some("I can't help with that".to_string());
        let err = parse_translations(&resp).unwrap_err();
        assert!(err.to_string().contains("refused"));
    }

    #[test]
    fn test_code_fenced_json_accepted() {
        let content = "```json\n{\"translations\":[{\"original\":\"总数\",\"translated\":\"total\"}]}\n```";
        let pairs = parse_batch_content(content).unwrap();
        assert_eq!(pairs[0].translated, "total");
    }

    #[test]
    fn test_single_line_code_fence_accepted() {
        for content in [
            "```json{\"translations\":[{\"original\":\"总数\",\"translated\":\"total\"}]}```",
            "```JSON {\"translations\":[{\"original\":\"总数\",\"translated\":\"total\"}]}```",
            "```{\"translations\":[{\"original\":\"总数\",\"translated\":\"total\"}]}```",
            "```\n{\"translations\":[{\"original\":\"总数\",\"translated\":\"total\"}]}\n```",
        ] {
            let pairs = parse_batch_content(content).unwrap();
            assert_eq!(pairs[0].translated, "total", "{content}");
        }
    }

    #[test]
    fn test_empty_translations_array_is_ok() {
        let pairs = parse_batch_content(r#"{"translations":[]}"#).unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_provider_error_message() {
        let body = r#"{"error":{"message":"API key not valid","type":"invalid_request_error","code":400}}"#;
        assert_eq!(provider_error_message(body), "API key not valid");
        assert_eq!(provider_error_message("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("总记录数", 4), "总");
        assert_eq!(truncate("abc", 10), "abc");
    }
}
