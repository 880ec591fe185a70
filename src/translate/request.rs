//! Build the chat-completions request for a batch of terms.

use super::openai_types::{ChatCompletionRequest, ChatMessage, JsonSchemaFormat, ResponseFormat};
use super::schema::{response_schema, SCHEMA_NAME};

/// Instruction text sent to the model. Terms go one per line.
///
/// The wording names the JSON shape explicitly, which providers limited to
/// plain JSON mode rely on.
#[must_use]
pub fn build_prompt<S: AsRef<str>>(terms: &[S]) -> String {
    let joined = terms
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Translate the following list of terms into English keywords suitable for variable naming. \
         Return the result as a JSON object with a \"translations\" array of objects, \
         where each object has \"original\" and \"translated\" properties.\n\n\
         Terms:\n{joined}"
    )
}

/// `response_format` for a provider. With `structured_output` the schema is
/// enforced server-side; otherwise only JSON mode is requested.
#[must_use]
pub fn response_format(structured_output: bool) -> ResponseFormat {
    if structured_output {
        ResponseFormat::JsonSchema {
            json_schema: JsonSchemaFormat {
                name: SCHEMA_NAME.to_string(),
                strict: true,
                schema: response_schema(),
            },
        }
    } else {
        ResponseFormat::JsonObject
    }
}

/// Build the request for `model`.
/// Pure function: the whole batch becomes a single user message.
#[must_use]
pub fn build_request<S: AsRef<str>>(
    terms: &[S],
    model: &str,
    structured_output: bool,
) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: model.to_string(),
        messages: vec![ChatMessage::user(build_prompt(terms))],
        response_format: Some(response_format(structured_output)),
    }
}
