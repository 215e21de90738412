use async_openai::{
    Client,
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionMessageToolCalls, ChatCompletionNamedToolChoice,
        ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
        ChatCompletionRequestUserMessageContent, ChatCompletionTool,
        ChatCompletionToolChoiceOption, ChatCompletionTools, CreateChatCompletionRequest,
        FunctionName, FunctionObject, ResponseFormat, ResponseFormatJsonSchema,
    },
};

use super::{CallRequest, CallResult, ProviderAdapter, Role, Usage, cost};
use crate::catalog::ProviderCatalog;
use crate::error::{ApiError, ApiResult};

pub const XAI_BASE_URL: &str = "https://api.x.ai/v1";

/// Chat-completions adapter for OpenAI and for xAI, which speaks the same
/// wire protocol on a different base URL. Models with structured-output
/// support get `response_format` bound to the tool's schema; the rest get
/// the tool declared as a function and forced by name.
pub struct OpenAiCompatAdapter {
    client: Client<OpenAIConfig>,
    provider_name: String,
    catalog: ProviderCatalog,
}

impl OpenAiCompatAdapter {
    pub fn openai(api_key: &str, catalog: ProviderCatalog) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Client::with_config(config),
            provider_name: "openai".to_string(),
            catalog,
        }
    }

    pub fn xai(api_key: &str, base_url: &str, catalog: ProviderCatalog) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);
        Self {
            client: Client::with_config(config),
            provider_name: "xai".to_string(),
            catalog,
        }
    }
}

fn wire_messages(req: &CallRequest) -> Vec<ChatCompletionRequestMessage> {
    let mut messages = Vec::with_capacity(req.messages.len() + 1);

    // the system prompt always leads the conversation
    messages.push(ChatCompletionRequestMessage::System(
        ChatCompletionRequestSystemMessage {
            content: ChatCompletionRequestSystemMessageContent::Text(req.system.clone()),
            name: None,
        },
    ));

    for message in &req.messages {
        messages.push(match message.role {
            Role::System => ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessage {
                    content: ChatCompletionRequestSystemMessageContent::Text(
                        message.content.clone(),
                    ),
                    name: None,
                },
            ),
            Role::User => {
                ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                    content: ChatCompletionRequestUserMessageContent::Text(
                        message.content.clone(),
                    ),
                    name: None,
                })
            }
            Role::Assistant => ChatCompletionRequestMessage::Assistant(
                ChatCompletionRequestAssistantMessage {
                    content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                        message.content.clone(),
                    )),
                    ..Default::default()
                },
            ),
        });
    }

    messages
}

/// Token counts are billing inputs; a completion without them cannot produce
/// a cost that reconciles with the provider's invoice, so it is treated as a
/// malformed response rather than billed as zero.
fn require_usage(usage: Option<(u32, u32)>, provider: &str) -> ApiResult<Usage> {
    match usage {
        Some((input_tokens, output_tokens)) => Ok(Usage {
            input_tokens,
            output_tokens,
        }),
        None => Err(ApiError::Upstream(format!(
            "unexpected response from {provider} API: no usage"
        ))),
    }
}

/// Refusal check plus payload extraction from the completion message parts,
/// kept free of SDK types so it is testable without a live call. The payload
/// arrives as a JSON-encoded string (message content, or the forced tool
/// call's arguments) and is parsed exactly once so the final result embeds
/// an object, not a doubly-encoded string.
fn extract_payload(
    refusal: Option<&str>,
    content: Option<&str>,
    tool_arguments: Option<&str>,
    provider: &str,
) -> ApiResult<serde_json::Value> {
    if let Some(refusal) = refusal.filter(|r| !r.is_empty()) {
        return Err(ApiError::Refusal(refusal.to_string()));
    }

    let raw = content
        .filter(|c| !c.is_empty())
        .or(tool_arguments)
        .ok_or_else(|| {
            ApiError::Upstream(format!("unexpected response from {provider} API: no content"))
        })?;

    serde_json::from_str(raw).map_err(|e| {
        ApiError::Upstream(format!("unexpected response from {provider} API: {e}"))
    })
}

#[async_trait::async_trait]
impl ProviderAdapter for OpenAiCompatAdapter {
    fn name(&self) -> &str {
        &self.provider_name
    }

    fn catalog(&self) -> &ProviderCatalog {
        &self.catalog
    }

    async fn call_model(&self, req: &CallRequest) -> ApiResult<CallResult> {
        // Hard validation: the task layer already resolved the model, so an
        // unknown id reaching this point is a caller mistake.
        let entry = self.catalog.entry(&req.model)?;

        let messages = wire_messages(req);

        let mut request = CreateChatCompletionRequest {
            model: req.model.clone(),
            messages,
            max_completion_tokens: Some(req.max_output_tokens),
            ..Default::default()
        };

        if entry.structured_outputs {
            request.response_format = Some(ResponseFormat::JsonSchema {
                json_schema: ResponseFormatJsonSchema {
                    name: req.tool.name.clone(),
                    description: Some(req.tool.description.clone()),
                    schema: Some(req.tool.schema.clone()),
                    strict: Some(true),
                },
            });
        } else {
            request.tools = Some(vec![ChatCompletionTools::Function(ChatCompletionTool {
                function: FunctionObject {
                    name: req.tool.name.clone(),
                    description: Some(req.tool.description.clone()),
                    parameters: Some(req.tool.schema.clone()),
                    strict: None,
                },
            })]);
            request.tool_choice = Some(ChatCompletionToolChoiceOption::Function(
                ChatCompletionNamedToolChoice {
                    function: FunctionName {
                        name: req.tool.name.clone(),
                    },
                },
            ));
        }

        let completion = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| ApiError::Upstream(format!("{} API error: {e}", self.provider_name)))?;

        let usage = require_usage(
            completion
                .usage
                .as_ref()
                .map(|u| (u.prompt_tokens, u.completion_tokens)),
            &self.provider_name,
        )?;

        let choice = completion.choices.first().ok_or_else(|| {
            ApiError::Upstream(format!(
                "unexpected response from {} API: no choices",
                self.provider_name
            ))
        })?;

        let tool_arguments = choice.message.tool_calls.as_ref().and_then(|calls| {
            calls.iter().find_map(|call| match call {
                ChatCompletionMessageToolCalls::Function(call) => {
                    Some(call.function.arguments.as_str())
                }
                _ => None,
            })
        });

        let result = extract_payload(
            choice.message.refusal.as_deref(),
            choice.message.content.as_deref(),
            tool_arguments,
            &self.provider_name,
        )?;

        Ok(CallResult {
            model: completion.model.clone(),
            usage,
            costs: cost::compute(&usage, entry),
            result,
            timestamp: chrono::Utc::now(),
        })
    }
}
