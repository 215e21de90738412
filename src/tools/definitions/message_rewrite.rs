use serde_json::json;

use crate::tools::ToolDefinition;

const SYSTEM: &str = "\
You are an expert at improving written communication. When rewriting messages, follow these guidelines:

- Maintain a professional and polite tone while preserving the original message's intent
- Focus on matching the tone and style of the original message
- Improve clarity and structure while keeping the authentic voice
- Ensure proper grammar and punctuation
- Keep the message concise and well-organized
- Preserve all key points and important details from the original message
- Do not add new information or change the meaning of the original message
- Try and avoid using filler words like \"very\", \"really\", etc. that don't add value to the message";

const USER_TEMPLATE: &str = "Please rewrite the following message in a more professional tone \
while maintaining all the key points: <message>{message_content}</message>";

pub fn message_rewrite() -> ToolDefinition {
    ToolDefinition::new(
        "message_rewrite",
        "Rewrite a message in a professional tone while preserving the main points.",
        json!({
            "type": "object",
            "properties": {
                "rewritten_message": {
                    "type": "string",
                    "description": "The professionally rewritten message"
                }
            },
            "required": ["rewritten_message"],
            "additionalProperties": false
        }),
        SYSTEM,
        USER_TEMPLATE,
    )
}
