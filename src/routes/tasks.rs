use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::{Value, json};

use super::provider_client;
use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::llm::CallResult;

#[derive(Debug, Deserialize)]
pub struct EmailBody {
    pub email: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MessageBody {
    pub message: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TextBody {
    pub text: Option<String>,
    pub model: Option<String>,
}

fn require<'a>(value: &'a Option<String>, name: &str) -> ApiResult<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| ApiError::Validation(format!("Missing required field(s): {name}")))
}

fn data(result: CallResult) -> ApiResult<Json<Value>> {
    let value = serde_json::to_value(result).map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(Json(json!({ "data": value })))
}

pub async fn email(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Json(body): Json<EmailBody>,
) -> ApiResult<Json<Value>> {
    let client = provider_client(&state, &provider)?;
    let email = require(&body.email, "email")?;
    let result = client
        .generate_email_response(email, body.model.as_deref())
        .await?;
    data(result)
}

pub async fn rewrite(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Json(body): Json<MessageBody>,
) -> ApiResult<Json<Value>> {
    let client = provider_client(&state, &provider)?;
    let message = require(&body.message, "message")?;
    let result = client
        .rewrite_message(message, body.model.as_deref())
        .await?;
    data(result)
}

pub async fn prompt_response(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Json(body): Json<MessageBody>,
) -> ApiResult<Json<Value>> {
    let client = provider_client(&state, &provider)?;
    let prompt = require(&body.message, "message")?;
    let result = client
        .basic_prompt_response(prompt, body.model.as_deref())
        .await?;
    data(result)
}

pub async fn summarize(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Json(body): Json<TextBody>,
) -> ApiResult<Json<Value>> {
    let client = provider_client(&state, &provider)?;
    let text = require(&body.text, "text")?;
    let result = client.summarize_text(text, body.model.as_deref()).await?;
    data(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_body_deserialize() {
        let body: EmailBody =
            serde_json::from_str(r#"{"email": "Hi there", "model": "gpt-4o"}"#).unwrap();
        assert_eq!(body.email.as_deref(), Some("Hi there"));
        assert_eq!(body.model.as_deref(), Some("gpt-4o"));
    }

    #[test]
    fn test_model_is_optional() {
        let body: MessageBody = serde_json::from_str(r#"{"message": "hello"}"#).unwrap();
        assert_eq!(body.message.as_deref(), Some("hello"));
        assert!(body.model.is_none());
    }

    #[test]
    fn test_require_present() {
        let value = Some("text".to_string());
        assert_eq!(require(&value, "text").unwrap(), "text");
    }

    #[test]
    fn test_require_missing_field_message() {
        let err = require(&None, "email").unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Validation error: Missing required field(s): email"
        );
    }

    #[test]
    fn test_require_allows_empty_string() {
        // presence is what matters; an empty body is the caller's choice
        let value = Some(String::new());
        assert_eq!(require(&value, "message").unwrap(), "");
    }

    #[test]
    fn test_data_wraps_result_without_double_encoding() {
        let usage = crate::llm::Usage {
            input_tokens: 1,
            output_tokens: 1,
        };
        let catalog = crate::catalog::xai::catalog().unwrap();
        let entry = catalog.entry("grok-2-1212").unwrap();
        let result = CallResult {
            model: "grok-2-1212".to_string(),
            usage,
            costs: crate::llm::cost::compute(&usage, entry),
            result: serde_json::json!({"summary": "ok"}),
            timestamp: chrono::Utc::now(),
        };
        let Json(body) = data(result).unwrap();
        assert_eq!(body["data"]["result"]["summary"], "ok");
        assert_eq!(body["data"]["costs"]["input_token_cost"], "0.000002");
    }
}
