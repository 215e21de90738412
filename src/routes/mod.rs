pub mod health;
pub mod models;
pub mod tasks;

use std::sync::Arc;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::llm::LlmClient;

/// Resolves the `{provider}` path segment to its client. Unknown providers
/// are a routing miss, not a validation failure.
pub fn provider_client(state: &AppState, provider: &str) -> ApiResult<Arc<LlmClient>> {
    state
        .providers
        .get(provider)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("Unknown provider '{provider}'")))
}
