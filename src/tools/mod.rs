pub mod definitions;

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};

/// One supported task: a machine-checkable output schema plus the prompts
/// that drive it. Definitions are fixed at startup and never mutated.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema for the structured output.
    pub schema: serde_json::Value,
    pub system_prompt: String,
    pub user_prompt_template: String,
}

impl ToolDefinition {
    pub fn new(
        name: &str,
        description: &str,
        schema: serde_json::Value,
        system_prompt: &str,
        user_prompt_template: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            schema,
            system_prompt: system_prompt.to_string(),
            user_prompt_template: user_prompt_template.to_string(),
        }
    }
}

/// Maps tool name to definition. Populated once at startup; a lookup miss is
/// a server-side misconfiguration, never a client error — tool names are
/// hardcoded endpoints, not client-supplied strings.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<ToolDefinition>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites by name (last write wins).
    pub fn register(&mut self, tool: ToolDefinition) {
        self.tools.insert(tool.name.clone(), Arc::new(tool));
    }

    pub fn get(&self, name: &str) -> ApiResult<Arc<ToolDefinition>> {
        self.tools
            .get(name)
            .cloned()
            .ok_or_else(|| ApiError::Configuration(format!("Tool '{name}' not found")))
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// The registry with all built-in tools registered.
pub fn builtin_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(definitions::email());
    registry.register(definitions::message_rewrite());
    registry.register(definitions::prompt_response());
    registry.register(definitions::text_summary());
    registry
}

/// Named `{placeholder}` substitution. `{{` and `}}` escape literal braces.
/// A placeholder with no matching field is a configuration error: templates
/// are fixed per tool, so a mismatch is a programming bug, not user input.
pub fn build_user_prompt(template: &str, fields: &[(&str, &str)]) -> ApiResult<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(c) => name.push(c),
                        None => {
                            return Err(ApiError::Configuration(format!(
                                "unterminated placeholder '{{{name}' in prompt template"
                            )));
                        }
                    }
                }
                let value = fields
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| *value)
                    .ok_or_else(|| {
                        ApiError::Configuration(format!(
                            "prompt template references unknown field '{name}'"
                        ))
                    })?;
                out.push_str(value);
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                    out.push('}');
                } else {
                    return Err(ApiError::Configuration(
                        "unmatched '}' in prompt template".to_string(),
                    ));
                }
            }
            c => out.push(c),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitution() {
        let out = build_user_prompt(
            "Summarize: <text_body>{text_body}</text_body>",
            &[("text_body", "hello world")],
        )
        .unwrap();
        assert_eq!(out, "Summarize: <text_body>hello world</text_body>");
    }

    #[test]
    fn test_brace_escapes() {
        let out = build_user_prompt("literal {{json}} and {field}", &[("field", "v")]).unwrap();
        assert_eq!(out, "literal {json} and v");
    }

    #[test]
    fn test_missing_field_is_configuration_error() {
        let err = build_user_prompt("{email_body}", &[("text_body", "x")]).unwrap_err();
        assert!(matches!(err, ApiError::Configuration(_)));
        assert!(err.to_string().contains("email_body"));
    }

    #[test]
    fn test_unterminated_placeholder() {
        let err = build_user_prompt("broken {field", &[("field", "x")]).unwrap_err();
        assert!(matches!(err, ApiError::Configuration(_)));
    }

    #[test]
    fn test_unmatched_closing_brace() {
        let err = build_user_prompt("broken } here", &[]).unwrap_err();
        assert!(matches!(err, ApiError::Configuration(_)));
    }

    #[test]
    fn test_registry_lookup() {
        let registry = builtin_registry();
        assert_eq!(registry.len(), 4);
        for name in ["email", "message_rewrite", "prompt_response", "text_summary"] {
            let tool = registry.get(name).unwrap();
            assert_eq!(tool.name, name);
            assert!(tool.schema.is_object());
        }
    }

    #[test]
    fn test_registry_miss_is_configuration_error() {
        let registry = builtin_registry();
        let err = registry.get("nope").unwrap_err();
        assert!(matches!(err, ApiError::Configuration(_)));
    }

    #[test]
    fn test_register_is_idempotent_by_name() {
        let mut registry = ToolRegistry::new();
        registry.register(ToolDefinition::new(
            "email",
            "first",
            serde_json::json!({"type": "object"}),
            "s",
            "{email_body}",
        ));
        registry.register(ToolDefinition::new(
            "email",
            "second",
            serde_json::json!({"type": "object"}),
            "s",
            "{email_body}",
        ));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("email").unwrap().description, "second");
    }
}
