use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("No ingredient text provided")]
    InvalidInput,

    #[error("Upstream request failed: {0}")]
    UpstreamError(String),

    #[error("Empty AI response")]
    EmptyResponse,

    #[error("AI response not valid JSON: {reason}")]
    MalformedResponse { raw: String, reason: String },

    #[error("AI analysis failed: {0}")]
    AIAnalysisFailed(String),

    #[error("OCR failed: {0}")]
    OcrFailed(String),

    #[error("Relay rejected the request with status {status}")]
    RelayRejected { status: u16, body: String },

    #[error("Relay unreachable: {0}")]
    RelayUnavailable(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}
