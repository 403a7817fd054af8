use axum::{Router, routing::get};
use url::Url;

use showcase::{app_state::AppState, config::Config, projects, readme};

/// Router wired against a mock GitHub API base URL.
pub fn test_app(api_base: &str) -> Router {
    let config = Config::new(
        "127.0.0.1:0",
        Url::parse(api_base).expect("invalid test api base"),
        None,
        "octocat",
        "http://localhost:8080",
        Vec::new(),
    );
    let state = AppState::new(config);

    Router::new()
        .route("/api/readme", get(readme::handlers::get_readme))
        .route("/api/projects", get(projects::handlers::list_projects))
        .with_state(state)
}
