use tracing::{Instrument, info_span};

use crate::domain::{
    common::{entities::app_errors::CoreError, generate_uuid_v7, services::Service},
    ingredient_analysis::{
        entities::AnalysisResult,
        extraction::parse_analysis_reply,
        ports::{IngredientAnalysisService, LLMClient},
        prompt::render_prompt,
        value_objects::AnalyzeIngredientsInput,
    },
};

impl<LLM> IngredientAnalysisService for Service<LLM>
where
    LLM: LLMClient,
{
    async fn analyze_ingredients(
        &self,
        input: AnalyzeIngredientsInput,
    ) -> Result<AnalysisResult, CoreError> {
        // 1. Reject blank input before anything leaves the process
        let text = match input.text {
            Some(text) if !text.trim().is_empty() => text,
            _ => return Err(CoreError::InvalidInput),
        };

        let analysis_id = generate_uuid_v7();
        let span = info_span!("analyze_ingredients", %analysis_id, chars = text.len());

        async move {
            // 2. Render the fixed prompt
            let prompt = render_prompt(&text);

            // 3. Single upstream call, no retry
            let raw_response = self.llm_client.complete(prompt).await?;
            tracing::debug!(raw = %raw_response, "raw AI response");

            // 4. Extract the JSON span and validate its shape
            let result = parse_analysis_reply(&raw_response)?;
            tracing::info!(insights = result.key_insights.len(), "analysis completed");

            Ok(result)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ingredient_analysis::{entities::RiskLevel, ports::MockLLMClient};

    const REPLY: &str = r#"Sure! {"inferredIntent":"x","keyInsights":[],"overallReasoning":"y","uncertainty":"z","practicalGuidance":"w"} Thanks."#;

    fn service(llm: MockLLMClient) -> Service<MockLLMClient> {
        Service::new(llm)
    }

    #[tokio::test]
    async fn blank_text_never_reaches_upstream() {
        let mut llm = MockLLMClient::new();
        llm.expect_complete().never();
        let service = service(llm);

        for text in [None, Some(String::new()), Some("   \n\t".to_string())] {
            let err = service
                .analyze_ingredients(AnalyzeIngredientsInput { text })
                .await
                .unwrap_err();
            assert_eq!(err, CoreError::InvalidInput);
        }
    }

    #[tokio::test]
    async fn extracts_embedded_object() {
        let mut llm = MockLLMClient::new();
        llm.expect_complete()
            .withf(|prompt| prompt.user.contains("Ingredients: sugar, salt"))
            .times(1)
            .returning(|_| Box::pin(async { Ok(REPLY.to_string()) }));

        let result = service(llm)
            .analyze_ingredients(AnalyzeIngredientsInput::new("sugar, salt"))
            .await
            .unwrap();

        assert_eq!(result.inferred_intent, "x");
        assert!(result.key_insights.is_empty());
        assert_eq!(result.overall_reasoning, "y");
        assert_eq!(result.uncertainty, "z");
        assert_eq!(result.practical_guidance, "w");
    }

    #[tokio::test]
    async fn normalizes_risk_levels() {
        let reply = r#"{"inferredIntent":"i","keyInsights":[{"ingredient":"palm oil","whyItMatters":"saturated fat","riskLevel":"HARMFUL","howMuchIsOkay":"rarely","tradeoff":"texture"}],"overallReasoning":"r","uncertainty":"u","practicalGuidance":"p"}"#;
        let mut llm = MockLLMClient::new();
        llm.expect_complete()
            .returning(move |_| Box::pin(async move { Ok(reply.to_string()) }));

        let result = service(llm)
            .analyze_ingredients(AnalyzeIngredientsInput::new("palm oil"))
            .await
            .unwrap();

        assert_eq!(result.key_insights[0].risk_level, RiskLevel::Harmful);
    }

    #[tokio::test]
    async fn reply_without_braces_is_malformed() {
        let mut llm = MockLLMClient::new();
        llm.expect_complete()
            .returning(|_| Box::pin(async { Ok("No idea, sorry.".to_string()) }));

        let err = service(llm)
            .analyze_ingredients(AnalyzeIngredientsInput::new("water"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            CoreError::MalformedResponse {
                raw: "No idea, sorry.".to_string(),
                reason: "no JSON object found in reply".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn upstream_errors_propagate_unchanged() {
        let mut llm = MockLLMClient::new();
        llm.expect_complete()
            .times(1)
            .returning(|_| Box::pin(async { Err(CoreError::EmptyResponse) }));

        let err = service(llm)
            .analyze_ingredients(AnalyzeIngredientsInput::new("water"))
            .await
            .unwrap_err();

        assert_eq!(err, CoreError::EmptyResponse);
    }
}
