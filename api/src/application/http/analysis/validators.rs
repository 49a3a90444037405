use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

#[derive(Debug, Default, Serialize, Deserialize, ToSchema, Validate)]
pub struct AnalyzeIngredientsRequest {
    /// Ingredient list, free-form
    #[serde(default, deserialize_with = "string_or_none")]
    #[validate(custom(function = "not_blank"))]
    pub text: Option<String>,
}

/// Anything other than a JSON string counts as missing text.
fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => Ok(Some(text)),
        _ => Ok(None),
    }
}

fn not_blank(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("No ingredient text provided".into()));
    }
    Ok(())
}
