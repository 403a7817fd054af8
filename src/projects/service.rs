//! Builds the project listing: repositories the user owns plus repositories
//! they contributed to, derived from the public event feed. Contributions
//! made through a fork are attributed to the parent repository; when the
//! user keeps a public fork of a repository they contributed to directly,
//! its URL is attached via a request-scoped fork lookup cache.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use tracing::{debug, warn};

use crate::config::Config;
use crate::github::{GithubClient, RepoDetails};
use crate::projects::dtos::{ProjectCard, RepositoryBuckets};

const OWNED_REPOS_QUERY: &str = "sort=stars&per_page=100&type=owner";
const FORK_REPOS_QUERY: &str = "type=forks&per_page=30";

const CONTRIBUTION_EVENT_KINDS: &[&str] = &["PushEvent", "PullRequestEvent"];

pub async fn fetch_repositories(client: &GithubClient, config: &Config) -> RepositoryBuckets {
    let hidden = HiddenProjects::new(config.hidden_projects());

    let mut owned = fetch_owned(client, config, &hidden).await;
    let mut contributed = fetch_contributed(client, config, &hidden).await;

    owned.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
    contributed.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));

    RepositoryBuckets { owned, contributed }
}

async fn fetch_owned(
    client: &GithubClient,
    config: &Config,
    hidden: &HiddenProjects,
) -> Vec<ProjectCard> {
    let username = config.github_username();
    let repos = match client.user_repos(username, OWNED_REPOS_QUERY).await {
        Ok(repos) => repos,
        Err(err) => {
            warn!(%err, "owned repository listing unavailable, using fallback");
            return fallback_projects(username);
        }
    };

    repos
        .iter()
        // Forks are attributed through the contributed bucket instead.
        .filter(|repo| !repo.fork)
        .filter_map(|repo| card_from_repo(repo, true, false, None, hidden))
        .collect()
}

async fn fetch_contributed(
    client: &GithubClient,
    config: &Config,
    hidden: &HiddenProjects,
) -> Vec<ProjectCard> {
    let username = config.github_username();
    let events = match client.public_events(username).await {
        Ok(events) => events,
        Err(err) => {
            debug!(%err, "public event feed unavailable");
            return Vec::new();
        }
    };

    let own_prefix = format!("{username}/");
    let mut cards = Vec::new();
    let mut seen_ids: HashSet<u64> = HashSet::new();
    let mut fork_cache = UserForkCache::new();

    for event in events {
        if !CONTRIBUTION_EVENT_KINDS.contains(&event.kind.as_str()) {
            continue;
        }
        let Some(event_repo) = event.repo else {
            continue;
        };
        if event_repo.name.starts_with(&own_prefix) {
            continue;
        }

        let details = match client.repo_by_full_name(&event_repo.name).await {
            Ok(details) => details,
            Err(err) => {
                debug!(%err, repo = %event_repo.name, "contributed repository lookup failed");
                continue;
            }
        };

        // Resolve a fork to its parent; otherwise look up whether the user
        // keeps a public fork of the repository they pushed to directly.
        let (target, user_fork_url, is_fork_contribution) = if details.fork {
            let Some(parent) = details.parent.clone() else {
                continue;
            };
            let fork_url = (!details.private).then(|| details.html_url.clone()).flatten();
            (*parent, fork_url, true)
        } else {
            let fork_url = fork_cache
                .lookup(client, username, details.full_name_or_name())
                .await;
            (details, fork_url, false)
        };

        if seen_ids.contains(&target.id) {
            continue;
        }
        if target.full_name_or_name().starts_with(&own_prefix) {
            continue;
        }
        seen_ids.insert(target.id);

        if let Some(card) = card_from_repo(&target, false, is_fork_contribution, user_fork_url, hidden)
        {
            cards.push(card);
        }
    }

    cards
}

fn card_from_repo(
    repo: &RepoDetails,
    is_owned: bool,
    is_fork_contribution: bool,
    user_fork_url: Option<String>,
    hidden: &HiddenProjects,
) -> Option<ProjectCard> {
    if hidden.is_hidden(&repo.name) {
        return None;
    }
    // Repos named like "1" are noise in the listing.
    if !repo.name.is_empty() && repo.name.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    Some(ProjectCard {
        id: repo.id,
        name: repo.name.clone(),
        full_name: repo.full_name_or_name().to_string(),
        description: repo
            .description
            .clone()
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| "No description available".to_string()),
        language: repo
            .language
            .clone()
            .unwrap_or_else(|| "Unknown".to_string()),
        stargazers_count: repo.stargazers_count,
        html_url: repo.html_url.clone().unwrap_or_default(),
        homepage: repo.homepage.clone(),
        created_at: repo.created_at,
        updated_at: repo.updated_at,
        is_owned,
        is_private: repo.private,
        is_fork_contribution,
        user_fork_url,
    })
}

/// Shown when the owned-repository listing cannot be fetched at all.
fn fallback_projects(username: &str) -> Vec<ProjectCard> {
    vec![ProjectCard {
        id: 1,
        name: "portfolio".to_string(),
        full_name: format!("{username}/portfolio"),
        description: "Personal portfolio website".to_string(),
        language: "Rust".to_string(),
        stargazers_count: 0,
        html_url: format!("https://github.com/{username}/portfolio"),
        homepage: None,
        created_at: Some(Utc::now()),
        updated_at: Some(Utc::now()),
        is_owned: true,
        is_private: false,
        is_fork_contribution: false,
        user_fork_url: None,
    }]
}

/// Repository names excluded from the listing: exact matches and
/// case-insensitive substring matches.
pub struct HiddenProjects {
    entries: Vec<String>,
}

impl HiddenProjects {
    pub fn new(entries: &[String]) -> Self {
        Self {
            entries: entries.to_vec(),
        }
    }

    pub fn is_hidden(&self, repo_name: &str) -> bool {
        if self.entries.iter().any(|entry| entry == repo_name) {
            return true;
        }
        let lowered = repo_name.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| !entry.is_empty())
            .any(|entry| lowered.contains(&entry.to_lowercase()))
    }
}

/// Loads the user's public forks at most once per request and answers
/// "does the user have a public fork of X" by parent full name. Explicitly
/// passed through the contributed-repository scan; dropped with the request.
pub struct UserForkCache {
    forks: Option<HashMap<String, String>>,
}

impl UserForkCache {
    pub fn new() -> Self {
        Self { forks: None }
    }

    pub async fn lookup(
        &mut self,
        client: &GithubClient,
        username: &str,
        original_full_name: &str,
    ) -> Option<String> {
        if self.forks.is_none() {
            let mut forks = HashMap::new();
            match client.user_repos(username, FORK_REPOS_QUERY).await {
                Ok(repos) => {
                    for repo in repos {
                        if !repo.fork || repo.private {
                            continue;
                        }
                        if let (Some(parent), Some(url)) = (repo.parent.as_ref(), repo.html_url)
                            && let Some(parent_name) = parent.full_name.clone()
                        {
                            forks.insert(parent_name, url);
                        }
                    }
                }
                Err(err) => {
                    debug!(%err, "fork listing unavailable");
                }
            }
            self.forks = Some(forks);
        }

        self.forks
            .as_ref()
            .and_then(|forks| forks.get(original_full_name).cloned())
    }
}

impl Default for UserForkCache {
    fn default() -> Self {
        Self::new()
    }
}
