use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use super::provider_client;
use crate::AppState;
use crate::error::ApiResult;

/// Lists the valid model ids for a provider. This is a catalog query, not a
/// model call, so the body is a bare list rather than a `CallResult`.
pub async fn list_models(
    State(state): State<AppState>,
    Path(provider): Path<String>,
) -> ApiResult<Json<Value>> {
    let client = provider_client(&state, &provider)?;
    Ok(Json(json!({ "data": client.model_ids() })))
}
