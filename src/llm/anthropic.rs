use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

use super::{CallRequest, CallResult, ProviderAdapter, Usage, cost};
use crate::catalog::ProviderCatalog;
use crate::error::{ApiError, ApiResult};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";

/// Anthropic Messages API. Structured output is obtained by declaring the
/// tool and forcing it via `tool_choice`; the payload is the `input` of the
/// returned `tool_use` block.
pub struct AnthropicAdapter {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    catalog: ProviderCatalog,
}

impl AnthropicAdapter {
    pub fn new(api_key: &str, catalog: ProviderCatalog) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            catalog,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    tools: Vec<WireTool<'a>>,
    tool_choice: WireToolChoice<'a>,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Serialize)]
struct WireTool<'a> {
    name: &'a str,
    description: &'a str,
    input_schema: &'a serde_json::Value,
}

#[derive(Serialize)]
struct WireToolChoice<'a> {
    #[serde(rename = "type")]
    choice_type: &'static str,
    name: &'a str,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: Vec<WireContentBlock<'a>>,
}

#[derive(Serialize)]
struct WireContentBlock<'a> {
    #[serde(rename = "type")]
    block_type: &'static str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    model: String,
    usage: WireUsage,
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
    input: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[derive(Deserialize)]
struct WireError {
    error: WireErrorDetail,
}

#[derive(Deserialize)]
struct WireErrorDetail {
    message: String,
}

/// Refusal check plus payload extraction, kept free of I/O so it is
/// testable against constructed responses.
fn extract_result(resp: &MessagesResponse) -> ApiResult<serde_json::Value> {
    if resp.stop_reason.as_deref() == Some("refusal") {
        let text = resp
            .content
            .iter()
            .filter_map(|b| b.text.as_deref())
            .collect::<Vec<_>>()
            .join("");
        let text = if text.is_empty() {
            "request declined".to_string()
        } else {
            text
        };
        return Err(ApiError::Refusal(text));
    }

    resp.content
        .iter()
        .find(|b| b.block_type == "tool_use")
        .and_then(|b| b.input.clone())
        .ok_or_else(|| {
            ApiError::Upstream("unexpected response from Anthropic API: no tool_use block".into())
        })
}

#[async_trait::async_trait]
impl ProviderAdapter for AnthropicAdapter {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn catalog(&self) -> &ProviderCatalog {
        &self.catalog
    }

    async fn call_model(&self, req: &CallRequest) -> ApiResult<CallResult> {
        // Hard validation: the task layer already resolved the model, so an
        // unknown id reaching this point is a caller mistake.
        let entry = self.catalog.entry(&req.model)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(&self.api_key)
                .map_err(|e| ApiError::Configuration(format!("invalid API key header: {e}")))?,
        );
        headers.insert("anthropic-version", HeaderValue::from_static(API_VERSION));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let body = MessagesRequest {
            model: &req.model,
            max_tokens: req.max_output_tokens,
            system: &req.system,
            tools: vec![WireTool {
                name: &req.tool.name,
                description: &req.tool.description,
                input_schema: &req.tool.schema,
            }],
            tool_choice: WireToolChoice {
                choice_type: "tool",
                name: &req.tool.name,
            },
            messages: req
                .messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: vec![WireContentBlock {
                        block_type: "text",
                        text: &m.content,
                    }],
                })
                .collect(),
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Upstream(format!("Anthropic API error: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<WireError>(&error_body) {
                Ok(err) => err.error.message,
                Err(_) => error_body,
            };
            return Err(ApiError::Upstream(format!(
                "Anthropic API error ({status}): {message}"
            )));
        }

        let resp: MessagesResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Upstream(format!("unexpected response from Anthropic API: {e}")))?;

        let usage = Usage {
            input_tokens: resp.usage.input_tokens,
            output_tokens: resp.usage.output_tokens,
        };
        let result = extract_result(&resp)?;

        Ok(CallResult {
            model: resp.model,
            usage,
            costs: cost::compute(&usage, entry),
            result,
            timestamp: chrono::Utc::now(),
        })
    }
}
