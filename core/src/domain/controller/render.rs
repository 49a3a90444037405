use std::fmt;

use crate::domain::{
    controller::entities::{InputMode, ViewModel, ViewPhase},
    ingredient_analysis::entities::{AnalysisResult, KeyInsight},
};

/// Everything a front end needs to draw the page for one view-model state.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedView {
    pub image_panel_visible: bool,
    pub text_panel_visible: bool,
    pub loading_visible: bool,
    pub results_visible: bool,
    pub results: Option<RenderedResults>,
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedResults {
    pub intent: String,
    pub findings: Vec<FindingCard>,
    pub analysis: String,
    pub uncertainty: String,
    pub recommendations: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FindingCard {
    pub ingredient: String,
    pub why_it_matters: String,
    pub risk_label: String,
    pub risk_class: String,
    pub how_much_is_okay: String,
    pub tradeoff: String,
}

impl From<&KeyInsight> for FindingCard {
    fn from(insight: &KeyInsight) -> Self {
        Self {
            ingredient: insight.ingredient.clone(),
            why_it_matters: insight.why_it_matters.clone(),
            risk_label: insight.risk_level.to_string(),
            risk_class: insight.risk_level.css_class().to_string(),
            how_much_is_okay: insight.how_much_is_okay.clone(),
            tradeoff: insight.tradeoff.clone(),
        }
    }
}

impl From<&AnalysisResult> for RenderedResults {
    fn from(result: &AnalysisResult) -> Self {
        Self {
            intent: result.inferred_intent.clone(),
            findings: result.key_insights.iter().map(FindingCard::from).collect(),
            analysis: result.overall_reasoning.clone(),
            uncertainty: result.uncertainty.clone(),
            recommendations: result.practical_guidance.clone(),
        }
    }
}

pub fn render(view: &ViewModel) -> RenderedView {
    let results_visible = view.phase == ViewPhase::ResultsShown;
    let results = if results_visible {
        view.last_result.as_ref().map(RenderedResults::from)
    } else {
        None
    };

    RenderedView {
        image_panel_visible: view.mode == InputMode::Image,
        text_panel_visible: view.mode == InputMode::Text,
        loading_visible: view.phase == ViewPhase::Loading,
        results_visible,
        results,
        notice: view.notice.map(|notice| notice.message().to_string()),
    }
}

impl fmt::Display for RenderedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(notice) = &self.notice {
            writeln!(f, "! {notice}")?;
        }
        if self.loading_visible {
            writeln!(f, "Analyzing ingredients...")?;
        }
        if let Some(results) = &self.results {
            write!(f, "{results}")?;
        }
        Ok(())
    }
}

impl fmt::Display for RenderedResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Intent")?;
        writeln!(f, "  {}", self.intent)?;
        writeln!(f, "Key insights")?;
        for card in &self.findings {
            writeln!(f, "  {} [{}]", card.ingredient, card.risk_label)?;
            writeln!(f, "    Why it matters: {}", card.why_it_matters)?;
            writeln!(f, "    How much is okay: {}", card.how_much_is_okay)?;
            writeln!(f, "    Tradeoff: {}", card.tradeoff)?;
        }
        writeln!(f, "Overall reasoning")?;
        writeln!(f, "  {}", self.analysis)?;
        writeln!(f, "Uncertainty")?;
        writeln!(f, "  {}", self.uncertainty)?;
        writeln!(f, "Practical guidance")?;
        writeln!(f, "  {}", self.recommendations)
    }
}
