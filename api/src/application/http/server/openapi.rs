use crate::application::http::{analysis::router::AnalysisApiDoc, health::HealthApiDoc};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "IntelliFood API"
    ),
    nest(
        (path = "/analyze", api = AnalysisApiDoc),
        (path = "/health", api = HealthApiDoc),
    )
)]
pub struct ApiDoc;
