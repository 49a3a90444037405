#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeIngredientsInput {
    pub text: Option<String>,
}

impl AnalyzeIngredientsInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

/// One chat turn sent to the completion API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPrompt {
    pub system: String,
    pub user: String,
}
