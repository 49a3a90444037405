use std::path::Path;

use axum_test::TestServer;
use serde_json::Value;
use test_context::test_context;

use super::support::{INDEX_HTML, RelayContext, relay_router};

#[test_context(RelayContext)]
#[tokio::test]
async fn serves_index_at_root(ctx: &mut RelayContext) {
    let response = ctx.server.get("/").await;

    response.assert_status_ok();
    response.assert_text(INDEX_HTML);
}

#[test_context(RelayContext)]
#[tokio::test]
async fn serves_static_assets(ctx: &mut RelayContext) {
    let response = ctx.server.get("/script.js").await;

    response.assert_status_ok();
    response.assert_text("console.log('ok');");
}

#[test_context(RelayContext)]
#[tokio::test]
async fn unknown_paths_fall_back_to_index(ctx: &mut RelayContext) {
    let response = ctx.server.get("/results/latest").await;

    response.assert_text(INDEX_HTML);
}

#[test_context(RelayContext)]
#[tokio::test]
async fn health_reports_ok(ctx: &mut RelayContext) {
    let response = ctx.server.get("/health").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
}

#[test_context(RelayContext)]
#[tokio::test]
async fn publishes_openapi_document(ctx: &mut RelayContext) {
    let response = ctx.server.get("/api-docs/openapi.json").await;

    response.assert_status_ok();
    let document = response.json::<Value>();
    assert!(document["paths"]["/analyze"]["post"].is_object());
    assert!(document["paths"]["/health"]["get"].is_object());
}

#[tokio::test]
async fn shipped_client_resets_to_image_mode_and_drops_late_replies() {
    let docs = Path::new(env!("CARGO_MANIFEST_DIR")).join("../docs");
    // Upstream is never called here.
    let upstream = "127.0.0.1:9".parse().unwrap();
    let server = TestServer::new(relay_router(upstream, &docs).await).unwrap();

    let index = server.get("/").await;
    index.assert_status_ok();
    assert!(index.text().contains(r#"<script src="script.js"></script>"#));

    let script = server.get("/script.js").await.text();
    let reset = script
        .split(r#"getElementById("new-analysis-btn")"#)
        .nth(1)
        .and_then(|rest| rest.split("});").next())
        .unwrap();
    assert!(reset.contains("generation += 1;"));
    assert!(reset.contains("pending = null;"));
    assert!(reset.contains(r#"selectMode("image");"#));

    assert!(script.contains(r#"alert("An analysis is already in progress.");"#));
    assert!(script.contains("if (!isCurrent(token)) return;"));
    assert!(script.contains(r#"const RESULT_STORAGE_KEY = "intellifood_result";"#));
}
