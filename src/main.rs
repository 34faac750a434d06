use anyhow::Context;
use github_repos::application::use_cases::fetch_user_repositories::FetchUserRepositoriesInteractor;
use github_repos::infrastructures::adapters::primary::web::{AppState, create_router};
use github_repos::infrastructures::adapters::secondary::external_apis::github::GitHubApiAdapter;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, info_span};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let otlp_exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()
        .context("Failed to create OTLP exporter")?;
    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(otlp_exporter)
        .build();
    let tracer = provider.tracer("github-repos");

    let telemetry = tracing_opentelemetry::layer().with_tracer(tracer);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(telemetry)
        .with(fmt_layer)
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let initialize_span = info_span!("initialize");
    let _enter = initialize_span.enter();
    info!("Application starting");

    let github_token = env::var("GITHUB_TOKEN")
        .map_err(|e| anyhow::anyhow!("Failed to read GITHUB_TOKEN: {}", e))?;
    let github_api_url =
        env::var("GITHUB_API_URL").unwrap_or_else(|_| DEFAULT_GITHUB_API_URL.to_string());

    // Build dependencies
    let github_api_adapter = Arc::new(GitHubApiAdapter::new(github_api_url, &github_token)?);
    let fetch_use_case = Arc::new(FetchUserRepositoriesInteractor::new(github_api_adapter));
    let app_state = Arc::new(AppState {
        use_case: fetch_use_case,
    });

    // Create router
    let app = create_router(app_state);

    // Start server
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
