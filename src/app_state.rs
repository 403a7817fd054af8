use crate::{config::Config, github::GithubClient};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub github: Arc<GithubClient>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let github = GithubClient::new(
            config.github_api_base().clone(),
            config.github_token().map(str::to_string),
        );
        Self {
            github: Arc::new(github),
            config: Arc::new(config),
        }
    }
}
