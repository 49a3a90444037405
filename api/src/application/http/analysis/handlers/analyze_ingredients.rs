use axum::extract::State;
use intellifood_core::domain::ingredient_analysis::{
    entities::AnalysisResult, ports::IngredientAnalysisService,
    value_objects::AnalyzeIngredientsInput,
};

use crate::application::http::{
    analysis::validators::AnalyzeIngredientsRequest,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "",
    tag = "analysis",
    summary = "Analyze an ingredient list",
    description = "Relays the ingredient text to the language model and returns its structured assessment.",
    responses(
        (status = 200, body = AnalysisResult),
        (status = 400, body = ApiErrorResponse, description = "No ingredient text provided"),
        (status = 500, body = ApiErrorResponse, description = "Upstream or extraction failure")
    ),
    request_body = AnalyzeIngredientsRequest
)]
pub async fn analyze_ingredients(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<AnalyzeIngredientsRequest>,
) -> Result<Response<AnalysisResult>, ApiError> {
    let result = state
        .service
        .analyze_ingredients(AnalyzeIngredientsInput { text: payload.text })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(result))
}
