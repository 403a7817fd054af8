use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::instrument;
use url::Url;

use crate::github::{
    errors::ApiError,
    types::{ContentsEntry, PublicEvent, ReadmeResource, RepoDetails},
};

const USER_AGENT: &str = "showcase-portfolio/0.1";
const ACCEPT_GITHUB_JSON: &str = "application/vnd.github.v3+json";

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(15))
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .default_headers({
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert(
                reqwest::header::ACCEPT,
                ACCEPT_GITHUB_JSON.parse().unwrap(),
            );
            headers
        })
        .build()
        .expect("Failed to build HTTP client")
});

/// Thin client over the GitHub REST API. One instance per process; the base
/// URL is injectable so tests can stand in a local mock server. No retries,
/// no backoff: a failed call degrades the feature it supports.
#[derive(Debug, Clone)]
pub struct GithubClient {
    base: Url,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(base: Url, token: Option<String>) -> Self {
        Self { base, token }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base.join(path)?)
    }

    /// Single GET against the API, parsed as JSON.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn get(&self, url: Url) -> Result<serde_json::Value, ApiError> {
        let mut request = HTTP_CLIENT.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await.map_err(ApiError::from_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http { status });
        }

        response
            .json()
            .await
            .map_err(|err| ApiError::MalformedBody(err.to_string()))
    }

    async fn get_typed<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let value = self.get(url).await?;
        serde_json::from_value(value).map_err(|err| ApiError::MalformedBody(err.to_string()))
    }

    /// `GET /repos/{owner}/{repo}`.
    pub async fn repo_details(&self, owner: &str, repo: &str) -> Result<RepoDetails, ApiError> {
        self.repo_by_full_name(&format!("{owner}/{repo}")).await
    }

    /// `GET /repos/{full_name}` for an `owner/repo` pair in one string.
    pub async fn repo_by_full_name(&self, full_name: &str) -> Result<RepoDetails, ApiError> {
        let url = self.endpoint(&format!("repos/{full_name}"))?;
        self.get_typed(url).await
    }

    /// Fetch a language-bytes breakdown by its endpoint reference and return
    /// the language names ordered most-bytes-first.
    pub async fn languages(&self, languages_url: &str) -> Result<Vec<String>, ApiError> {
        let url = Url::parse(languages_url)?;
        let breakdown: serde_json::Map<String, serde_json::Value> = self.get_typed(url).await?;

        let mut by_bytes: Vec<(String, u64)> = breakdown
            .into_iter()
            .map(|(language, bytes)| (language, bytes.as_u64().unwrap_or(0)))
            .collect();
        by_bytes.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(by_bytes.into_iter().map(|(language, _)| language).collect())
    }

    /// `GET /repos/{owner}/{repo}/readme`; the body arrives base64-encoded.
    pub async fn readme(&self, owner: &str, repo: &str) -> Result<ReadmeResource, ApiError> {
        let url = self.endpoint(&format!("repos/{owner}/{repo}/readme"))?;
        self.get_typed(url).await
    }

    /// `GET /repos/{owner}/{repo}/contents`, the top-level file listing.
    pub async fn root_contents(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<ContentsEntry>, ApiError> {
        let url = self.endpoint(&format!("repos/{owner}/{repo}/contents"))?;
        self.get_typed(url).await
    }

    /// Directory listing by the absolute `url` field of a parent entry.
    pub async fn contents_at(&self, listing_url: &str) -> Result<Vec<ContentsEntry>, ApiError> {
        let url = Url::parse(listing_url)?;
        self.get_typed(url).await
    }

    /// `GET /users/{user}/repos?{query}`.
    pub async fn user_repos(&self, user: &str, query: &str) -> Result<Vec<RepoDetails>, ApiError> {
        let url = self.endpoint(&format!("users/{user}/repos?{query}"))?;
        self.get_typed(url).await
    }

    /// `GET /users/{user}/events/public`.
    pub async fn public_events(&self, user: &str) -> Result<Vec<PublicEvent>, ApiError> {
        let url = self.endpoint(&format!("users/{user}/events/public?per_page=100"))?;
        self.get_typed(url).await
    }
}
