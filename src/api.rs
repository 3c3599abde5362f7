use serde::Serialize;
use serde_json::Value;

/// Body of the selector call: the raw input text, forwarded as-is.
#[derive(Serialize, Clone, Debug)]
pub struct SelectorRequest {
    pub user_input: String,
}

/// Body of the target call.
///
/// Both fields come verbatim from the selector reply; a key the reply does
/// not carry is omitted from the serialized body, while an explicit `null`
/// is forwarded as `null`.
#[derive(Serialize, Clone, Debug)]
pub struct TargetRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<Value>,
}

impl TargetRequest {
    /// Builds the stage-two request from a parsed selector reply.
    ///
    /// The selector capitalizes its keys; the outgoing body does not.
    pub fn from_selection(selection: &Value) -> Self {
        TargetRequest {
            target: selection.get("Target").cloned(),
            prompt: selection.get("Prompt").cloned(),
        }
    }

    /// The stop-flow body: `{"prompt": "quit"}`, nothing else.
    pub fn quit() -> Self {
        TargetRequest {
            target: None,
            prompt: Some(Value::String(crate::core::constants::QUIT_PROMPT.to_string())),
        }
    }
}
