use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use intellifood_core::domain::common::entities::app_errors::CoreError;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

/// Body of every failed request: a fixed message, plus the raw model reply
/// when it could not be read as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No ingredient text provided")]
    InvalidInput,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("Groq API request failed")]
    UpstreamFailed,

    #[error("Empty AI response")]
    EmptyResponse,

    #[error("AI response not valid JSON")]
    MalformedResponse { raw: String },

    #[error("AI analysis failed")]
    AnalysisFailed,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput | ApiError::BadRequest(_) | ApiError::ValidationError(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::UpstreamFailed
            | ApiError::EmptyResponse
            | ApiError::MalformedResponse { .. }
            | ApiError::AnalysisFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ApiErrorResponse {
        let raw = match self {
            ApiError::MalformedResponse { raw } => Some(raw.clone()),
            _ => None,
        };

        ApiErrorResponse {
            error: self.to_string(),
            raw,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::InvalidInput => ApiError::InvalidInput,
            CoreError::UpstreamError(detail) => {
                tracing::error!("Groq API error: {}", detail);
                ApiError::UpstreamFailed
            }
            CoreError::EmptyResponse => {
                tracing::error!("AI response had no content");
                ApiError::EmptyResponse
            }
            CoreError::MalformedResponse { raw, reason } => {
                tracing::error!(%reason, "AI response not valid JSON");
                ApiError::MalformedResponse { raw }
            }
            other => {
                tracing::error!("Backend crash: {}", other);
                ApiError::AnalysisFailed
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

/// JSON extractor that also runs `validator` rules on the payload.
///
/// A body without a JSON content type, or with nothing in it, reads as an
/// empty object and so fails validation as missing input.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json_body = has_json_content_type(req.headers());

        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            tracing::warn!("Unreadable request body: {}", rejection.body_text());
            ApiError::BadRequest(rejection.body_text())
        })?;

        if !json_body || bytes.iter().all(u8::is_ascii_whitespace) {
            tracing::debug!("Request carried no JSON body");
            return Err(ApiError::InvalidInput);
        }

        let Json(value) = Json::<T>::from_bytes(&bytes).map_err(|rejection| {
            tracing::warn!("Rejected request body: {}", rejection.body_text());
            ApiError::BadRequest(rejection.body_text())
        })?;

        value
            .validate()
            .map_err(|errors| ApiError::ValidationError(first_message(&errors)))?;

        Ok(ValidateJson(value))
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errors| errors.iter())
        .find_map(|error| error.message.as_ref().map(|message| message.to_string()))
        .unwrap_or_else(|| "Invalid request body".to_string())
}
