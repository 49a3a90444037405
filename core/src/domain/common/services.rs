use std::sync::Arc;

use crate::domain::ingredient_analysis::ports::LLMClient;

/// Shared service wiring the domain logic to its adapters.
///
/// Cloning is cheap: adapters live behind `Arc`.
#[derive(Debug)]
pub struct Service<LLM>
where
    LLM: LLMClient,
{
    pub(crate) llm_client: Arc<LLM>,
}

impl<LLM> Service<LLM>
where
    LLM: LLMClient,
{
    pub fn new(llm_client: LLM) -> Self {
        Self {
            llm_client: Arc::new(llm_client),
        }
    }
}

impl<LLM> Clone for Service<LLM>
where
    LLM: LLMClient,
{
    fn clone(&self) -> Self {
        Self {
            llm_client: Arc::clone(&self.llm_client),
        }
    }
}
