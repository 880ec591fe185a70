use crate::config::AppConfig;
use crate::error::{Result, TranslationError};
use crate::translate::openai_types::ChatCompletionResponse;
use crate::translate::request::build_request;
use crate::translate::response::{parse_translations, provider_error_message, truncate};
use crate::translate::schema::TranslationPair;

/// Sends batches of terms to an OpenAI-compatible chat-completions endpoint.
///
/// Holds no per-request state: every [`translate_batch`](Self::translate_batch)
/// call is one independent HTTP request. Cloning is cheap.
#[derive(Clone)]
pub struct Translator {
    client: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
    structured_output: bool,
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("url", &self.url)
            .field("model", &self.model)
            .field("structured_output", &self.structured_output)
            .finish_non_exhaustive()
    }
}

impl Translator {
    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            url: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
            model: model.into(),
            structured_output: true,
        }
    }

    /// Send `json_object` instead of a `json_schema` response format when
    /// `structured_output` is false. The reply is validated locally either way.
    #[must_use]
    pub fn with_structured_output(mut self, structured_output: bool) -> Self {
        self.structured_output = structured_output;
        self
    }

    /// Resolve endpoint, model and API key from config. Fails early on a
    /// missing key or an unknown provider.
    pub fn from_config(config: &AppConfig, client: reqwest::Client) -> Result<Self> {
        let base_url = config.effective_base_url()?;
        let model = config.effective_model()?;
        let api_key = config.resolve_api_key()?;
        Ok(Self::new(client, &base_url, api_key, model)
            .with_structured_output(config.structured_output()))
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Translate every term in one request.
    ///
    /// The returned pairs are in the order the model produced them, which is
    /// not guaranteed to match `terms`. An empty batch returns immediately
    /// without contacting the provider.
    ///
    /// # Errors
    /// Returns a [`TranslationError`] if the provider is unreachable, answers
    /// with an error status, or returns content that does not match the schema.
    pub async fn translate_batch<S: AsRef<str>>(
        &self,
        terms: &[S],
    ) -> std::result::Result<Vec<TranslationPair>, TranslationError> {
        if terms.is_empty() {
            tracing::debug!("Empty batch, skipping request");
            return Ok(Vec::new());
        }

        let req = build_request(terms, &self.model, self.structured_output);

        tracing::debug!(url = %self.url, model = %self.model, terms = terms.len(), "POST translation batch");

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .await
            .map_err(|e| TranslationError::request(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TranslationError::request(format!("Failed to read response body: {e}")))?;

        tracing::debug!(status, body_len = body.len(), "Provider response");

        if status >= 400 {
            let message = provider_error_message(&body);
            tracing::warn!(status, %message, "Provider error");
            return Err(TranslationError::provider(status, message));
        }

        let completion: ChatCompletionResponse = serde_json::from_str(&body).map_err(|e| {
            TranslationError::malformed(format!(
                "Failed to parse provider response: {}. Body: {}",
                e,
                truncate(&body, 300)
            ))
        })?;

        let pairs = parse_translations(&completion)?;

        if let Some(ref usage) = completion.usage {
            tracing::info!(
                terms = terms.len(),
                translations = pairs.len(),
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Batch translated"
            );
        } else {
            tracing::info!(terms = terms.len(), translations = pairs.len(), "Batch translated");
        }

        Ok(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let t = Translator::new(reqwest::Client::new(), "https://api.example.com/v1/", "k", "m");
        assert_eq!(t.url(), "https://api.example.com/v1/chat/completions");
        assert_eq!(t.model(), "m");
    }

    #[test]
    fn test_debug_hides_api_key() {
        let t = Translator::new(reqwest::Client::new(), "https://x", "secret-key", "m");
        assert!(!format!("{t:?}").contains("secret-key"));
    }

    #[tokio::test]
    async fn test_empty_batch_makes_no_request() {
        // Unroutable URL: any request would fail.
        let t = Translator::new(reqwest::Client::new(), "http://127.0.0.1:1", "k", "m");
        let empty: [&str; 0] = [];
        let pairs = t.translate_batch(&empty).await.unwrap();
        assert!(pairs.is_empty());
    }
}
