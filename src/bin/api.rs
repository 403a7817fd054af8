use axum::{Router, routing::get};
use showcase::{app_state::AppState, config, health, projects, readme};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::Config::from_env().expect("Failed to load configuration");
    let bind_addr = config.bind_addr().to_string();
    let state = AppState::new(config);

    let app = Router::new()
        .route("/healthz", get(health::health_check))
        .route("/api/readme", get(readme::handlers::get_readme))
        .route("/api/projects", get(projects::handlers::list_projects))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind to address");
    info!(%bind_addr, "listening");
    axum::serve(listener, app).await.unwrap();
}
