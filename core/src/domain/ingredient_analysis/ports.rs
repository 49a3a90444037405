use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    ingredient_analysis::{
        entities::AnalysisResult,
        value_objects::{AnalyzeIngredientsInput, ChatPrompt},
    },
};

/// LLM Client trait for calling chat-completion models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    /// Returns the message content of the first choice.
    ///
    /// A reply without content must surface as [`CoreError::EmptyResponse`].
    fn complete(
        &self,
        prompt: ChatPrompt,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Service trait for ingredient analysis business logic
#[cfg_attr(test, mockall::automock)]
pub trait IngredientAnalysisService: Send + Sync {
    fn analyze_ingredients(
        &self,
        input: AnalyzeIngredientsInput,
    ) -> impl Future<Output = Result<AnalysisResult, CoreError>> + Send;
}
