use reqwest::Client;
use serde::Serialize;

use crate::domain::{
    common::entities::app_errors::CoreError, controller::ports::AnalysisGateway,
    ingredient_analysis::entities::AnalysisResult,
};

pub const DEFAULT_BACKEND_URL: &str = "https://intellifood.onrender.com";

/// Calls `POST {backend}/analyze` on a running relay.
#[derive(Debug, Clone)]
pub struct HttpAnalysisGateway {
    backend_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct AnalyzeRequest {
    text: String,
}

impl HttpAnalysisGateway {
    pub fn new(backend_url: impl Into<String>) -> Self {
        let backend_url: String = backend_url.into();
        Self {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/analyze", self.backend_url)
    }
}

impl AnalysisGateway for HttpAnalysisGateway {
    async fn analyze(&self, text: String) -> Result<AnalysisResult, CoreError> {
        let response = self
            .client
            .post(self.endpoint())
            .json(&AnalyzeRequest { text })
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Relay request failed: {}", e);
                CoreError::RelayUnavailable(e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::error!("Failed to read relay response: {}", e);
            CoreError::RelayUnavailable(e.to_string())
        })?;

        if !status.is_success() {
            tracing::error!("Backend error: {} - {}", status, body);
            return Err(CoreError::RelayRejected {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str::<AnalysisResult>(&body).map_err(|e| {
            tracing::error!("Relay answered with an unexpected body: {}", e);
            CoreError::RelayRejected {
                status: status.as_u16(),
                body,
            }
        })
    }
}
