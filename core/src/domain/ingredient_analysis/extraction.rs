use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{
    common::entities::app_errors::CoreError, ingredient_analysis::entities::AnalysisResult,
};

// Greedy: first `{` through last `}`, across newlines.
static JSON_SPAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\{.*\}").unwrap());

/// Finds the outermost brace span of a model reply and parses it.
///
/// No span is a [`CoreError::MalformedResponse`] carrying the raw reply.
/// A span that is not valid JSON is a [`CoreError::AIAnalysisFailed`].
pub fn extract_json_object(raw: &str) -> Result<serde_json::Value, CoreError> {
    let span = JSON_SPAN
        .find(raw)
        .ok_or_else(|| CoreError::MalformedResponse {
            raw: raw.to_string(),
            reason: "no JSON object found in reply".to_string(),
        })?;

    serde_json::from_str(span.as_str()).map_err(|e| {
        tracing::error!("Failed to parse extracted JSON span: {}", e);
        CoreError::AIAnalysisFailed(format!("extracted span is not valid JSON: {}", e))
    })
}

/// Checks a parsed reply against the [`AnalysisResult`] shape.
pub fn validate_analysis_result(
    value: serde_json::Value,
    raw: &str,
) -> Result<AnalysisResult, CoreError> {
    serde_json::from_value(value).map_err(|e| {
        tracing::error!("AI response does not match the analysis schema: {}", e);
        CoreError::MalformedResponse {
            raw: raw.to_string(),
            reason: format!("schema violation: {}", e),
        }
    })
}

pub fn parse_analysis_reply(raw: &str) -> Result<AnalysisResult, CoreError> {
    let value = extract_json_object(raw)?;
    validate_analysis_result(value, raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ingredient_analysis::entities::RiskLevel;

    const EMBEDDED: &str = r#"Sure! {"inferredIntent":"x","keyInsights":[],"overallReasoning":"y","uncertainty":"z","practicalGuidance":"w"} Thanks."#;

    #[test]
    fn discards_surrounding_prose() {
        let value = extract_json_object(EMBEDDED).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "inferredIntent": "x",
                "keyInsights": [],
                "overallReasoning": "y",
                "uncertainty": "z",
                "practicalGuidance": "w"
            })
        );
    }

    #[test]
    fn spans_from_first_open_to_last_close_brace() {
        let raw = "```json\n{\n  \"a\": {\"b\": 1}\n}\n```";
        let value = extract_json_object(raw).unwrap();
        assert_eq!(value["a"]["b"], 1);
    }

    #[test]
    fn no_braces_is_malformed_with_raw_text() {
        let err = extract_json_object("I cannot help with that.").unwrap_err();
        assert_eq!(
            err,
            CoreError::MalformedResponse {
                raw: "I cannot help with that.".to_string(),
                reason: "no JSON object found in reply".to_string(),
            }
        );
    }

    #[test]
    fn closing_brace_before_opening_is_malformed() {
        let err = extract_json_object("} nothing here {").unwrap_err();
        assert!(matches!(err, CoreError::MalformedResponse { .. }));
    }

    #[test]
    fn unparsable_span_is_analysis_failure() {
        let err = extract_json_object("{not json at all}").unwrap_err();
        assert!(matches!(err, CoreError::AIAnalysisFailed(_)));
    }

    #[test]
    fn parses_full_reply_into_result() {
        let raw = r#"Here you go:
{
  "inferredIntent": "Checking a breakfast cereal",
  "keyInsights": [
    {
      "ingredient": "Sugar",
      "whyItMatters": "Adds quick energy",
      "riskLevel": "moderate",
      "howMuchIsOkay": "Now and then",
      "tradeoff": "Taste versus blood sugar"
    }
  ],
  "overallReasoning": "Mostly grains",
  "uncertainty": "Amounts not listed",
  "practicalGuidance": "Pair with protein"
}"#;
        let result = parse_analysis_reply(raw).unwrap();
        assert_eq!(result.key_insights.len(), 1);
        assert_eq!(result.key_insights[0].risk_level, RiskLevel::Moderate);
        assert_eq!(result.practical_guidance, "Pair with protein");
    }

    #[test]
    fn schema_violation_is_malformed() {
        let raw = r#"{"inferredIntent":"x","keyInsights":[]}"#;
        let err = parse_analysis_reply(raw).unwrap_err();
        match err {
            CoreError::MalformedResponse { raw: attached, .. } => assert_eq!(attached, raw),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unknown_risk_level_is_malformed() {
        let raw = r#"{"inferredIntent":"x","keyInsights":[{"ingredient":"a","whyItMatters":"b","riskLevel":"Caution","howMuchIsOkay":"c","tradeoff":"d"}],"overallReasoning":"y","uncertainty":"z","practicalGuidance":"w"}"#;
        assert!(matches!(
            parse_analysis_reply(raw),
            Err(CoreError::MalformedResponse { .. })
        ));
    }
}
