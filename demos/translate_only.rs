//! Demonstrate the request/response layer and formatter without a provider.
//!
//! Usage:
//!   `cargo run --example translate_only`

use devtranslate::batch::{format_pairs, split_terms, to_tsv};
use devtranslate::providers::ProviderPreset;
use devtranslate::translate::openai_types::{
    ChatCompletionResponse, ChatUsage, Choice, ChoiceMessage,
};
use devtranslate::translate::request::build_request;
use devtranslate::translate::response::parse_translations;
use devtranslate::FormatMode;

fn main() {
    // Terms as a user would paste them
    let terms = split_terms("总数\n返回数, 用户编号");

    // Strict json_schema request (gemini) and json_object fallback (deepseek)
    for name in ["gemini", "deepseek"] {
        let preset = ProviderPreset::from_name(name).unwrap();
        let req = build_request(&terms, preset.default_model, preset.structured_output);
        println!("=== Request for {name} ===");
        println!("{}", serde_json::to_string_pretty(&req).unwrap());
    }

    // Simulate the provider's reply. Order differs from the input on purpose.
    let resp = ChatCompletionResponse {
        id: "chatcmpl-demo".to_string(),
        object: "chat.completion".to_string(),
        created: 0,
        model: "gemini-3-flash-preview".to_string(),
        choices: vec![Choice {
            index: 0,
            message: ChoiceMessage {
                role: "assistant".to_string(),
                content: Some(
                    r#"{"translations":[
                        {"original":"返回数","translated":"return count"},
                        {"original":"总数","translated":"total count"},
                        {"original":"用户编号","translated":"user ID"}
                    ]}"#
                    .to_string(),
                ),
                refusal: None,
            },
            finish_reason: Some("stop".to_string()),
        }],
        usage: Some(ChatUsage {
            prompt_tokens: 58,
            completion_tokens: 41,
            total_tokens: 99,
        }),
    };

    let pairs = parse_translations(&resp).unwrap();

    for mode in [FormatMode::PascalCase, FormatMode::CamelCase] {
        println!("\n=== {mode} ===");
        println!("{}", to_tsv(&format_pairs(pairs.clone(), mode)));
    }
}
