use serde::{Deserialize, Serialize};

/// One role/text claim from the model output.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct LabeledFragment {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
    /// Free-text description of the role, shown only in the grouped listing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl LabeledFragment {
    pub fn new(kind: impl Into<String>, text: impl Into<String>) -> Self {
        LabeledFragment {
            kind: kind.into(),
            text: text.into(),
            role: None,
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// What the completion boundary hands back for one submitted sentence.
///
/// `components` is `None` when the model output held no usable component
/// array; `raw_response` then carries the model text for an unannotated
/// fallback display.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisResponse {
    pub sentence: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<LabeledFragment>>,
    #[serde(
        rename = "rawResponse",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub raw_response: Option<String>,
}

impl AnalysisResponse {
    pub fn fragments(&self) -> &[LabeledFragment] {
        self.components.as_deref().unwrap_or(&[])
    }

    /// True when only the raw model text can be shown.
    pub fn is_raw_only(&self) -> bool {
        self.components.is_none() && self.raw_response.is_some()
    }
}

/// The prompt pair sent to the completion model.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PromptConfig {
    #[serde(rename = "systemPrompt")]
    pub system_prompt: String,
    #[serde(rename = "userPrompt")]
    pub user_prompt: String,
}
