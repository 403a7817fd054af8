use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::gallery::ImageCandidate;
use crate::github::types::RepoDetails;

/// Query parameters of `GET /api/readme`. Both default to empty so a missing
/// parameter reaches the handler's own validation instead of a framework
/// rejection.
#[derive(Debug, Deserialize)]
pub struct ReadmeParams {
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub repo: String,
}

/// The metadata subset the modal renders. Every field degrades to a
/// placeholder when the upstream call failed.
#[derive(Debug, Serialize, ToSchema)]
pub struct RepoSummary {
    pub name: String,
    pub full_name: String,
    pub description: String,
    pub html_url: String,
    pub homepage: Option<String>,
    pub language: String,
    pub languages: Vec<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub topics: Vec<String>,
}

impl RepoSummary {
    pub fn from_details(
        owner: &str,
        repo: &str,
        details: Option<&RepoDetails>,
        languages: Vec<String>,
    ) -> Self {
        match details {
            Some(details) => Self {
                name: details.name.clone(),
                full_name: details
                    .full_name
                    .clone()
                    .unwrap_or_else(|| format!("{owner}/{repo}")),
                description: details.description.clone().unwrap_or_default(),
                html_url: details
                    .html_url
                    .clone()
                    .unwrap_or_else(|| format!("https://github.com/{owner}/{repo}")),
                homepage: details.homepage.clone(),
                language: details
                    .language
                    .clone()
                    .unwrap_or_else(|| "Unknown".to_string()),
                languages,
                stargazers_count: details.stargazers_count,
                forks_count: details.forks_count,
                created_at: details.created_at,
                updated_at: details.updated_at,
                topics: details.topics.clone(),
            },
            None => Self {
                name: repo.to_string(),
                full_name: format!("{owner}/{repo}"),
                description: String::new(),
                html_url: format!("https://github.com/{owner}/{repo}"),
                homepage: None,
                language: "Unknown".to_string(),
                languages,
                stargazers_count: 0,
                forks_count: 0,
                created_at: None,
                updated_at: None,
                topics: Vec::new(),
            },
        }
    }
}

/// The aggregate the client-side modal consumes.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectResponse {
    pub repo: RepoSummary,
    pub content: String,
    pub images: Vec<ImageCandidate>,
    pub owner: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
