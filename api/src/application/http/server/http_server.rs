use std::sync::Arc;

use crate::application::http::analysis::router::analysis_routes;
use crate::application::http::health::health_routes;
use crate::application::http::server::app_state::AppState;
use crate::application::http::server::openapi::ApiDoc;
use crate::args::Args;

use anyhow::Context;
use axum::Router;
use axum::http::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum_prometheus::PrometheusMetricLayer;
use intellifood_core::application::create_service;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tracing::{debug, info_span};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

pub async fn state(args: Arc<Args>) -> Result<AppState, anyhow::Error> {
    let config = args
        .intellifood_config()
        .context("invalid relay configuration")?;
    let service = create_service(config);

    Ok(AppState::new(args, service))
}

fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer, anyhow::Error> {
    let origins = allowed_origins
        .iter()
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty())
        .collect::<Vec<&str>>();

    let allow_origin = if origins.is_empty() || origins.contains(&"*") {
        AllowOrigin::any()
    } else {
        let values = origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .with_context(|| format!("invalid allowed origin `{origin}`"))
            })
            .collect::<Result<Vec<HeaderValue>, _>>()?;
        AllowOrigin::list(values)
    };

    debug!("Allowed origins: {:?}", origins);

    Ok(CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_origin(allow_origin)
        .allow_headers([CONTENT_TYPE, CONTENT_LENGTH, ACCEPT]))
}

/// Front-end bundle: files from the static directory, `index.html` for anything else.
fn frontend_service(state: &AppState) -> ServeDir<ServeFile> {
    let static_dir = &state.args.server.static_dir;
    debug!("Serving frontend from: {}", static_dir.display());

    ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")))
}

///  Returns the [`Router`] of this application.
pub fn router(state: AppState) -> Result<Router, anyhow::Error> {
    let trace_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
        |request: &axum::extract::Request| {
            let uri: String = request.uri().to_string();
            let request_id = Uuid::new_v4();
            info_span!("http_request", method = ?request.method(), uri, %request_id)
        },
    );

    let cors = cors_layer(&state.args.server.allowed_origins)?;

    let mut openapi = ApiDoc::openapi();
    let mut paths = openapi.paths.clone();
    paths.paths = openapi
        .paths
        .paths
        .into_iter()
        .map(|(path, item)| (format!("{}{path}", state.args.server.root_path), item))
        .collect();
    openapi.paths = paths;

    let root_path = state.args.server.root_path.clone();
    let api_docs_url = format!("{}/api-docs/openapi.json", root_path);

    let mut router = axum::Router::new()
        .merge(Scalar::with_url(
            format!("{}/scalar", root_path),
            openapi.clone(),
        ))
        .merge(
            SwaggerUi::new(format!("{}/swagger-ui", root_path))
                .url(api_docs_url.clone(), openapi.clone()),
        )
        .merge(Redoc::with_url(format!("{}/redoc", root_path), openapi))
        .merge(RapiDoc::new(api_docs_url).path(format!("{}/rapidoc", root_path)))
        .merge(analysis_routes(state.clone()))
        .merge(health_routes(&root_path));

    if state.args.server.metrics_enabled {
        let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
        router = router
            .route(
                &format!("{}/metrics", root_path),
                get(|| async move { metric_handle.render() }),
            )
            .layer(prometheus_layer);
    }

    let router = router
        .fallback_service(frontend_service(&state))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state);
    Ok(router)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_origin_allows_any() {
        assert!(cors_layer(&["*".to_string()]).is_ok());
        assert!(cors_layer(&[]).is_ok());
    }

    #[test]
    fn rejects_unencodable_origin() {
        assert!(cors_layer(&["https://bad\norigin".to_string()]).is_err());
    }
}
