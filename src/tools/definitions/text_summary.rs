use serde_json::json;

use crate::tools::ToolDefinition;

const SYSTEM: &str = "You are an expert at summarizing long bodies of text into concise and \
informative summaries, using bullet points if necessary.";

const USER_TEMPLATE: &str = "Please read and summarize the following text, maintaining all the \
key points and general gist of the text: <text_body>{text_body}</text_body>";

pub fn text_summary() -> ToolDefinition {
    ToolDefinition::new(
        "text_summary",
        "Summarize a given text into a concise and informative summary.",
        json!({
            "type": "object",
            "properties": {
                "text_summary": {
                    "type": "string",
                    "description": "The summary of the given text"
                }
            },
            "required": ["text_summary"],
            "additionalProperties": false
        }),
        SYSTEM,
        USER_TEMPLATE,
    )
}
