use serde_json::json;

use crate::tools::ToolDefinition;

pub fn prompt_response() -> ToolDefinition {
    ToolDefinition::new(
        "prompt_response",
        "Respond to the prompt",
        json!({
            "type": "object",
            "properties": {
                "summary": {
                    "type": "string",
                    "description": "Response to the user's prompt"
                }
            },
            "required": ["summary"],
            "additionalProperties": false
        }),
        "You are an LLM responding to a user's prompt",
        "{prompt}",
    )
}
