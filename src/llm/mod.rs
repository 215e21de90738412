pub mod anthropic;
pub mod client;
pub mod cost;
pub mod openai;

pub use client::LlmClient;
pub use cost::Costs;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::ProviderCatalog;
use crate::error::ApiResult;
use crate::tools::ToolDefinition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Everything an adapter needs for one upstream call. Built per request,
/// discarded after.
#[derive(Debug, Clone)]
pub struct CallRequest {
    pub max_output_tokens: u32,
    pub model: String,
    pub tool: Arc<ToolDefinition>,
    pub system: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// The uniform result of one adapter call. `model` is the provider-reported
/// canonical id, which may differ from the requested alias.
#[derive(Debug, Clone, Serialize)]
pub struct CallResult {
    pub model: String,
    pub usage: Usage,
    pub costs: Costs,
    pub result: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

/// One upstream provider. Implementations differ only in wire details; the
/// call pipeline (validate model, single upstream call, extract usage and
/// payload, compute exact costs) is identical.
#[async_trait::async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn name(&self) -> &str;

    fn catalog(&self) -> &ProviderCatalog;

    async fn call_model(&self, req: &CallRequest) -> ApiResult<CallResult>;
}
