use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// One repository card on the projects page.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProjectCard {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: String,
    pub language: String,
    pub stargazers_count: u64,
    pub html_url: String,
    pub homepage: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub is_owned: bool,
    pub is_private: bool,
    pub is_fork_contribution: bool,
    pub user_fork_url: Option<String>,
}

/// Owned and contributed repositories, each sorted by stars descending.
#[derive(Debug, Serialize, ToSchema)]
pub struct RepositoryBuckets {
    pub owned: Vec<ProjectCard>,
    pub contributed: Vec<ProjectCard>,
}
