use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Repository metadata as returned by `GET /repos/{owner}/{repo}`.
///
/// Every field beyond the id and name is defaulted: a partial payload
/// degrades to empty/None rather than failing deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoDetails {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub languages_url: Option<String>,
    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub parent: Option<Box<RepoDetails>>,
}

impl RepoDetails {
    /// `full_name` with the bare name as fallback for partial payloads.
    pub fn full_name_or_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.name)
    }
}

/// The README resource; GitHub delivers the body base64-encoded.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadmeResource {
    pub content: String,
    #[serde(default)]
    pub encoding: String,
}

impl ReadmeResource {
    /// Decode the body to text. GitHub wraps the base64 payload at 60
    /// columns, so embedded whitespace is stripped before decoding.
    /// Returns `None` when the payload is not valid base64.
    pub fn decode(&self) -> Option<String> {
        if !self.encoding.is_empty() && self.encoding != "base64" {
            return Some(self.content.clone());
        }
        let packed: String = self.content.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = STANDARD.decode(packed).ok()?;
        Some(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// One entry of a directory listing (`GET /repos/{owner}/{repo}/contents`).
#[derive(Debug, Clone, Deserialize)]
pub struct ContentsEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl ContentsEntry {
    pub fn is_file(&self) -> bool {
        self.kind == "file"
    }

    pub fn is_dir(&self) -> bool {
        self.kind == "dir"
    }

    /// Lowercased filename extension, if any.
    pub fn extension(&self) -> Option<String> {
        let (_, ext) = self.name.rsplit_once('.')?;
        if ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

/// One entry of a user's public event feed.
#[derive(Debug, Clone, Deserialize)]
pub struct PublicEvent {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub repo: Option<EventRepo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventRepo {
    pub name: String,
}
