use std::{process, sync::Arc};

use anyhow::Context;
use clap::Parser;
use intellifood_core::{
    application::{TerminalController, create_client_controller},
    domain::{controller::entities::InputMode, ocr::value_objects::ImageInput},
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    application::http::server::http_server::{router, state},
    args::{AnalyzeArgs, Args, Command, LogArgs},
};

mod application;
mod args;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log);

    if let Err(error) = run(args).await {
        tracing::error!(error = %error, "application terminated with error");
        eprintln!("Error: {error:#}");
        process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    match args.command.clone() {
        None | Some(Command::Serve) => serve(Arc::new(args)).await,
        Some(Command::Analyze(analyze)) => run_analyze(&args, analyze).await,
    }
}

fn init_tracing(log: &LogArgs) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));

    let registry = tracing_subscriber::registry().with(filter);
    if log.json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn serve(args: Arc<Args>) -> anyhow::Result<()> {
    let addr = format!("{}:{}", args.server.host, args.server.port);

    let app_state = state(args.clone()).await?;
    let router = router(app_state)?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Server running at http://{}",
        listener.local_addr()?
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
}

async fn run_analyze(args: &Args, analyze: AnalyzeArgs) -> anyhow::Result<()> {
    let mut controller = create_client_controller(
        analyze.backend_url.as_str(),
        args.ocr.clone().into(),
        &analyze.storage_dir,
    );

    if analyze.show_saved {
        return show_saved(&controller).await;
    }

    if let Some(text) = analyze.text {
        controller.select_mode(InputMode::Text);
        controller.set_text(text);
    }
    if let Some(path) = &analyze.image {
        controller.attach_upload(read_image(path).await?);
    }
    if let Some(path) = &analyze.camera {
        controller.attach_capture(read_image(path).await?);
    }

    let outcome = controller.submit().await.map(|_| ());
    print!("{}", controller.render());
    if let Err(notice) = outcome {
        anyhow::bail!("analysis not completed: {notice}");
    }

    if analyze.save {
        let saved = controller.save().await;
        print!("{}", controller.render().notice.unwrap_or_default());
        println!();
        saved.map_err(|notice| anyhow::anyhow!("{notice}"))?;
    }

    Ok(())
}

async fn show_saved(controller: &TerminalController) -> anyhow::Result<()> {
    match controller
        .load_saved()
        .await
        .context("failed to read saved result")?
    {
        Some(result) => println!("{}", serde_json::to_string_pretty(&result)?),
        None => println!("No saved result."),
    }
    Ok(())
}

async fn read_image(path: &std::path::Path) -> anyhow::Result<ImageInput> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;

    let image = ImageInput::new(data);
    Ok(match path.file_name() {
        Some(name) => image.with_file_name(name.to_string_lossy()),
        None => image,
    })
}
