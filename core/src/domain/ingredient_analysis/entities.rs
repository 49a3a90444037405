use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Structured answer returned to the client for one ingredient list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub inferred_intent: String,
    pub key_insights: Vec<KeyInsight>,
    pub overall_reasoning: String,
    pub uncertainty: String,
    pub practical_guidance: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeyInsight {
    pub ingredient: String,
    pub why_it_matters: String,
    pub risk_level: RiskLevel,
    pub how_much_is_okay: String,
    pub tradeoff: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub enum RiskLevel {
    Safe,
    Moderate,
    Harmful,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "Safe",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::Harmful => "Harmful",
        }
    }

    /// Lowercase tag used by the front end for badge styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "safe",
            RiskLevel::Moderate => "moderate",
            RiskLevel::Harmful => "harmful",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRiskLevel(pub String);

impl fmt::Display for UnknownRiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown riskLevel `{}`, expected one of Safe, Moderate, Harmful",
            self.0
        )
    }
}

impl std::error::Error for UnknownRiskLevel {}

impl FromStr for RiskLevel {
    type Err = UnknownRiskLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        [RiskLevel::Safe, RiskLevel::Moderate, RiskLevel::Harmful]
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownRiskLevel(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for RiskLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_is_case_insensitive() {
        assert_eq!("safe".parse::<RiskLevel>(), Ok(RiskLevel::Safe));
        assert_eq!(" HARMFUL ".parse::<RiskLevel>(), Ok(RiskLevel::Harmful));
        assert_eq!("Moderate".parse::<RiskLevel>(), Ok(RiskLevel::Moderate));
    }

    #[test]
    fn risk_level_rejects_unknown_values() {
        assert!("Safe | Moderate | Harmful".parse::<RiskLevel>().is_err());
        assert!("Caution".parse::<RiskLevel>().is_err());
    }

    #[test]
    fn result_uses_camel_case_fields() {
        let result = AnalysisResult {
            inferred_intent: "snack".to_string(),
            key_insights: vec![KeyInsight {
                ingredient: "sugar".to_string(),
                why_it_matters: "energy spike".to_string(),
                risk_level: RiskLevel::Moderate,
                how_much_is_okay: "occasionally".to_string(),
                tradeoff: "taste".to_string(),
            }],
            overall_reasoning: "fine in moderation".to_string(),
            uncertainty: "quantities unknown".to_string(),
            practical_guidance: "enjoy sometimes".to_string(),
        };

        let value = serde_json::to_value(&result).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 5);
        assert_eq!(value["keyInsights"][0]["riskLevel"], "Moderate");
        assert_eq!(value["keyInsights"][0]["whyItMatters"], "energy spike");
        assert_eq!(value["practicalGuidance"], "enjoy sometimes");
    }
}
