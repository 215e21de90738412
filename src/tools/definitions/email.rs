use serde_json::json;

use crate::tools::ToolDefinition;

const SYSTEM: &str = "\
You are an expert at parsing emails and crafting professional responses. When processing this task, ensure all fields are properly formatted as JSON. For arrays always use proper JSON array notation, even if there's only one item. If a piece of information is unknown, use null for optional fields or an empty string for required string fields.

Follow these guidelines:

- Accurately extract key information from the email.
- Generate a response that matches the tone, length, and depth of the original email.
- Maintain a positive and professional tone in the response.
- Keep the response concise and conversational, avoiding formal language or buzzwords.
- Address key points and questions raised in the original email without being exhaustive.
- Express interest and enthusiasm without over-committing or appearing desperate.
- If multiple items are mentioned, acknowledge them briefly.
- Do not invent or assume any information not provided in the original email.

Pay special attention to all names, dates and contact information, and remember not to make anything up.";

const USER_TEMPLATE: &str = "\
Please parse the following body of an email and generate a suitable professional response, paying special attention to the tone and content of the original email. You MAY NOT make up information that is not found in the input.

<email_body>
{email_body}
</email_body>";

pub fn email() -> ToolDefinition {
    ToolDefinition::new(
        "email",
        "Parse an email and generate an appropriate response.",
        json!({
            "type": "object",
            "properties": {
                "subject": { "type": "string" },
                "body": { "type": "string" },
                "tone": {
                    "type": "string",
                    "enum": ["formal", "semi-formal", "casual", "friendly"]
                },
                "enthusiasm_level": {
                    "type": "string",
                    "enum": ["low", "medium", "high"]
                }
            },
            "required": ["subject", "body", "tone", "enthusiasm_level"],
            "additionalProperties": false
        }),
        SYSTEM,
        USER_TEMPLATE,
    )
}
