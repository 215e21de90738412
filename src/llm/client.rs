use std::sync::Arc;

use tracing::Instrument;

use super::{CallRequest, CallResult, ChatMessage, ProviderAdapter};
use crate::error::ApiResult;
use crate::tools::{ToolRegistry, build_user_prompt};

const TASK_MAX_OUTPUT_TOKENS: u32 = 4096;

/// Task-level entry point for one provider: resolves the model softly,
/// renders the tool's prompt, and runs the adapter call inside a `gen_ai`
/// span. Stateless across calls; safe to share behind an `Arc`.
pub struct LlmClient {
    adapter: Arc<dyn ProviderAdapter>,
    registry: Arc<ToolRegistry>,
}

impl LlmClient {
    pub fn new(adapter: Arc<dyn ProviderAdapter>, registry: Arc<ToolRegistry>) -> Self {
        Self { adapter, registry }
    }

    pub fn provider(&self) -> &str {
        self.adapter.name()
    }

    pub fn model_ids(&self) -> Vec<String> {
        self.adapter.catalog().model_ids()
    }

    /// Unlike the adapter's own validation, an unknown model id here falls
    /// back to the provider default instead of failing. Both layers validate
    /// on purpose.
    fn prepare(
        &self,
        tool_name: &str,
        fields: &[(&str, &str)],
        model: Option<&str>,
    ) -> ApiResult<CallRequest> {
        let model = self.adapter.catalog().resolve(model).to_string();
        let tool = self.registry.get(tool_name)?;
        let user_prompt = build_user_prompt(&tool.user_prompt_template, fields)?;
        let system = tool.system_prompt.clone();

        Ok(CallRequest {
            max_output_tokens: TASK_MAX_OUTPUT_TOKENS,
            model,
            tool,
            system,
            messages: vec![ChatMessage::user(user_prompt)],
        })
    }

    async fn call(&self, req: &CallRequest) -> ApiResult<CallResult> {
        let span = tracing::info_span!(
            "gen_ai.chat",
            otel.name = %format!("gen_ai.chat {}", req.model),
            gen_ai.operation.name = "chat",
            gen_ai.provider.name = %self.adapter.name(),
            gen_ai.request.model = %req.model,
            gen_ai.request.max_tokens = req.max_output_tokens as i64,
            gen_ai.tool.name = %req.tool.name,
            gen_ai.response.model = tracing::field::Empty,
            gen_ai.usage.input_tokens = tracing::field::Empty,
            gen_ai.usage.output_tokens = tracing::field::Empty,
            gen_ai.usage.cost_usd = tracing::field::Empty,
        );

        let result = self.adapter.call_model(req).instrument(span.clone()).await;

        match &result {
            Ok(resp) => {
                span.record("gen_ai.response.model", resp.model.as_str());
                span.record("gen_ai.usage.input_tokens", resp.usage.input_tokens as i64);
                span.record("gen_ai.usage.output_tokens", resp.usage.output_tokens as i64);
                span.record(
                    "gen_ai.usage.cost_usd",
                    tracing::field::display(resp.costs.total_cost.normalize()),
                );
            }
            Err(err) => {
                tracing::warn!(
                    provider = %self.adapter.name(),
                    model = %req.model,
                    client_error = err.is_client_error(),
                    error = %err,
                    "LLM call failed"
                );
            }
        }

        result
    }

    pub async fn generate_email_response(
        &self,
        email_body: &str,
        model: Option<&str>,
    ) -> ApiResult<CallResult> {
        let req = self.prepare("email", &[("email_body", email_body)], model)?;
        self.call(&req).await
    }

    pub async fn rewrite_message(
        &self,
        message_content: &str,
        model: Option<&str>,
    ) -> ApiResult<CallResult> {
        let req = self.prepare(
            "message_rewrite",
            &[("message_content", message_content)],
            model,
        )?;
        self.call(&req).await
    }

    pub async fn basic_prompt_response(
        &self,
        prompt: &str,
        model: Option<&str>,
    ) -> ApiResult<CallResult> {
        let req = self.prepare("prompt_response", &[("prompt", prompt)], model)?;
        self.call(&req).await
    }

    pub async fn summarize_text(
        &self,
        text_body: &str,
        model: Option<&str>,
    ) -> ApiResult<CallResult> {
        let req = self.prepare("text_summary", &[("text_body", text_body)], model)?;
        self.call(&req).await
    }
}
