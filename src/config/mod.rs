//! Configuration handling for the application.
//!
//! Everything is read from environment variables with sensible development
//! defaults, so the binary runs without any setup. A GitHub token is optional;
//! unauthenticated API calls simply run under GitHub's stricter rate limits.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};

use url::Url;

/// Environment variable names. Keeping them public lets other crates (tests,
/// build scripts) refer to them if needed later.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_GITHUB_API_BASE: &str = "GITHUB_API_BASE";
pub const ENV_GITHUB_TOKEN: &str = "GITHUB_TOKEN";
pub const ENV_GITHUB_USERNAME: &str = "GITHUB_USERNAME";
pub const ENV_PUBLIC_BASE_URL: &str = "PUBLIC_BASE_URL";
pub const ENV_HIDDEN_PROJECTS: &str = "HIDDEN_PROJECTS";

/// Default development values used when environment variables are absent.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";
const DEFAULT_GITHUB_USERNAME: &str = "octocat";
const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:8080";

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    github_api_base: Url,
    github_token: Option<String>,
    github_username: String,
    public_base_url: String,
    hidden_projects: Vec<String>,
}

impl Config {
    /// Create a new config explicitly.
    pub fn new(
        bind_addr: impl Into<String>,
        github_api_base: Url,
        github_token: Option<String>,
        github_username: impl Into<String>,
        public_base_url: impl Into<String>,
        hidden_projects: Vec<String>,
    ) -> Self {
        Self {
            bind_addr: bind_addr.into(),
            github_api_base,
            github_token,
            github_username: github_username.into(),
            public_base_url: public_base_url.into(),
            hidden_projects,
        }
    }

    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let api_base_raw =
            env::var(ENV_GITHUB_API_BASE).unwrap_or_else(|_| DEFAULT_GITHUB_API_BASE.to_string());
        let github_api_base =
            Url::parse(&api_base_raw).map_err(|err| ConfigError::InvalidValue {
                field: ENV_GITHUB_API_BASE,
                reason: err.to_string(),
            })?;
        let github_token = env::var(ENV_GITHUB_TOKEN).ok().filter(|t| !t.is_empty());
        let github_username =
            env::var(ENV_GITHUB_USERNAME).unwrap_or_else(|_| DEFAULT_GITHUB_USERNAME.to_string());
        let public_base_url =
            env::var(ENV_PUBLIC_BASE_URL).unwrap_or_else(|_| DEFAULT_PUBLIC_BASE_URL.to_string());
        let hidden_projects = parse_hidden_projects(
            &env::var(ENV_HIDDEN_PROJECTS).unwrap_or_default(),
            &github_username,
        );
        Ok(Self {
            bind_addr,
            github_api_base,
            github_token,
            github_username,
            public_base_url,
            hidden_projects,
        })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    /// Base URL of the GitHub REST API. Overridable so tests can point the
    /// client at a local mock server.
    pub fn github_api_base(&self) -> &Url {
        &self.github_api_base
    }
    /// Optional bearer token for authenticated API calls.
    pub fn github_token(&self) -> Option<&str> {
        self.github_token.as_deref()
    }
    /// Account whose repositories the portfolio lists.
    pub fn github_username(&self) -> &str {
        &self.github_username
    }
    /// Absolute base URL used to address the curated local screenshots.
    pub fn public_base_url(&self) -> &str {
        &self.public_base_url
    }
    /// Repository names excluded from the project listing.
    pub fn hidden_projects(&self) -> &[String] {
        &self.hidden_projects
    }
}

/// Parse the comma-separated hidden-project list. The profile-README
/// repository (named after the account itself) is always hidden.
fn parse_hidden_projects(raw: &str, username: &str) -> Vec<String> {
    let mut hidden: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect();
    hidden.push(username.to_string());
    hidden
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Ensure environment-variable manipulating tests run serially.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for key in [
            ENV_BIND_ADDR,
            ENV_GITHUB_API_BASE,
            ENV_GITHUB_TOKEN,
            ENV_GITHUB_USERNAME,
            ENV_PUBLIC_BASE_URL,
            ENV_HIDDEN_PROJECTS,
        ] {
            unsafe {
                env::remove_var(key);
            }
        }
    }

    #[test]
    fn defaults_when_env_missing() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.bind_addr(), DEFAULT_BIND_ADDR);
        assert_eq!(cfg.github_api_base().as_str(), "https://api.github.com/");
        assert_eq!(cfg.github_token(), None);
        assert_eq!(cfg.github_username(), DEFAULT_GITHUB_USERNAME);
        // Profile-README repo is always hidden.
        assert_eq!(cfg.hidden_projects(), [DEFAULT_GITHUB_USERNAME.to_string()]);
    }

    #[test]
    fn overrides_when_env_present() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_BIND_ADDR, "0.0.0.0:9000");
            env::set_var(ENV_GITHUB_API_BASE, "http://127.0.0.1:4444");
            env::set_var(ENV_GITHUB_TOKEN, "ghp_testtoken");
            env::set_var(ENV_GITHUB_USERNAME, "someone");
            env::set_var(ENV_HIDDEN_PROJECTS, "secret-repo, wip");
        }
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.bind_addr(), "0.0.0.0:9000");
        assert_eq!(cfg.github_api_base().as_str(), "http://127.0.0.1:4444/");
        assert_eq!(cfg.github_token(), Some("ghp_testtoken"));
        assert_eq!(cfg.github_username(), "someone");
        assert_eq!(
            cfg.hidden_projects(),
            [
                "secret-repo".to_string(),
                "wip".to_string(),
                "someone".to_string()
            ]
        );
        clear_env();
    }

    #[test]
    fn invalid_api_base_is_rejected() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_GITHUB_API_BASE, "not a url");
        }
        let result = Config::from_env();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { field, .. }) if field == ENV_GITHUB_API_BASE
        ));
        clear_env();
    }
}
