use crate::batch::{self, split_terms};
use crate::config::AppConfig;
use crate::error::TranslationError;
use crate::formatter::{self, FormatMode};
use crate::providers::ProviderPreset;
use crate::translate::schema::FormattedResult;
use crate::translator::Translator;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub translator: Translator,
}

/// Body of `POST /v1/translate`. `terms` wins over `input` when both are set.
#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub terms: Option<Vec<String>>,
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub format: Option<FormatMode>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub results: Vec<FormattedResult>,
}

#[derive(Debug, Deserialize)]
pub struct FormatRequest {
    pub text: String,
    #[serde(default)]
    pub format: Option<FormatMode>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FormatResponse {
    pub formatted: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                error_type: error_type.into(),
                message: message.into(),
            },
        }
    }
}

impl From<&TranslationError> for ErrorResponse {
    fn from(err: &TranslationError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/v1/translate", post(handle_translate))
        .route("/v1/format", post(handle_format))
        .route("/v1/providers", get(handle_providers))
        .route("/health", get(handle_health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn bad_request(rejection: &JsonRejection) -> Response {
    tracing::warn!(error = %rejection.body_text(), "Rejected request body");
    let err = ErrorResponse::new("invalid_request_error", rejection.body_text());
    (StatusCode::BAD_REQUEST, Json(err)).into_response()
}

async fn handle_translate(
    State(state): State<Arc<AppState>>,
    body: Result<Json<TranslateRequest>, JsonRejection>,
) -> Response {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_request(&rejection),
    };

    let mode = req.format.unwrap_or(state.config.format);
    let terms: Vec<String> = match (req.terms, req.input) {
        (Some(terms), _) => terms
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
        (None, Some(input)) => split_terms(&input),
        (None, None) => {
            let err = ErrorResponse::new(
                "invalid_request_error",
                "request must contain `terms` or `input`",
            );
            return (StatusCode::BAD_REQUEST, Json(err)).into_response();
        }
    };

    tracing::info!(terms = terms.len(), format = %mode, "Translate request");

    match batch::translate_terms(&state.translator, &terms, mode).await {
        Ok(results) => Json(TranslateResponse { results }).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Translation failed");
            (StatusCode::BAD_GATEWAY, Json(ErrorResponse::from(&e))).into_response()
        }
    }
}

async fn handle_format(
    State(state): State<Arc<AppState>>,
    body: Result<Json<FormatRequest>, JsonRejection>,
) -> Response {
    match body {
        Ok(Json(req)) => {
            let mode = req.format.unwrap_or(state.config.format);
            Json(FormatResponse {
                formatted: formatter::format(&req.text, mode),
            })
            .into_response()
        }
        Err(rejection) => bad_request(&rejection),
    }
}

async fn handle_health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "provider": state.config.provider.name,
        "model": state.translator.model(),
    }))
}

async fn handle_providers() -> Json<serde_json::Value> {
    let providers: Vec<serde_json::Value> = ProviderPreset::all()
        .iter()
        .map(|p| {
            serde_json::json!({
                "name": p.name,
                "base_url": p.base_url,
                "default_model": p.default_model,
                "api_key_env": p.default_api_key_env,
            })
        })
        .collect();

    Json(serde_json::json!({ "data": providers }))
}
