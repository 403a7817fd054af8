//! Assembles the project-detail payload: repository metadata, language
//! breakdown, README rendered to HTML, and the filtered screenshot gallery.
//! Every upstream failure degrades the field it feeds; nothing here aborts
//! the response.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::config::Config;
use crate::gallery::{ExclusionRules, ImageCollector, looks_like_screenshot};
use crate::github::GithubClient;
use crate::markdown;
use crate::readme::dtos::{ProjectResponse, RepoSummary};

/// The portfolio's own repository always shows the curated local screenshots
/// instead of whatever its README happens to embed.
const PORTFOLIO_REPO: &str = "portfolio";

const CURATED_PORTFOLIO_IMAGES: &[(&str, &str)] = &[
    ("startpage.png", "Start Page"),
    ("aboutme.png", "About Me"),
    ("projektpage.png", "Projects Page"),
    ("skillspage.png", "Skills Page"),
    ("contact-mepage.png", "Contact Page"),
];

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Conventionally named directories inspected when the README yields no
/// usable screenshots.
const PREFERRED_IMAGE_DIRS: &[&str] = &["screenshots", "images", "assets", "img"];

static MD_IMAGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap());
static HTML_IMAGE_SRC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<img[^>]+src=["']([^"']+)["'][^>]*>"#).unwrap());

/// Run the full extraction pipeline for one repository.
pub async fn fetch_project(
    client: &GithubClient,
    config: &Config,
    owner: &str,
    repo: &str,
) -> ProjectResponse {
    let details = match client.repo_details(owner, repo).await {
        Ok(details) => Some(details),
        Err(err) => {
            debug!(%err, owner, repo, "repository details unavailable");
            None
        }
    };

    let languages = match details.as_ref().and_then(|d| d.languages_url.as_deref()) {
        Some(languages_url) => match client.languages(languages_url).await {
            Ok(languages) => languages,
            Err(err) => {
                debug!(%err, "language breakdown unavailable");
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    let readme_body = match client.readme(owner, repo).await {
        Ok(resource) => resource.decode(),
        Err(err) => {
            debug!(%err, owner, repo, "readme unavailable");
            None
        }
    };

    let default_branch = details
        .as_ref()
        .and_then(|d| d.default_branch.clone())
        .unwrap_or_else(|| "main".to_string());

    let mut collector = ImageCollector::new(ExclusionRules::shared());

    if repo == PORTFOLIO_REPO {
        collect_curated_images(&mut collector, config);
    } else {
        if let Some(body) = &readme_body {
            collect_readme_images(&mut collector, body, owner, repo, &default_branch);
        }
        if collector.is_empty() {
            collect_repository_images(client, &mut collector, owner, repo, &default_branch).await;
        }
    }

    let content = readme_body.as_deref().map(markdown::render).unwrap_or_default();

    ProjectResponse {
        repo: RepoSummary::from_details(owner, repo, details.as_ref(), languages),
        content,
        images: collector.into_images(),
        owner: owner.to_string(),
    }
}

/// The fixed gallery for the portfolio's self-referential listing.
fn collect_curated_images(collector: &mut ImageCollector<'_>, config: &Config) {
    let base = config.public_base_url().trim_end_matches('/');
    for (name, alt) in CURATED_PORTFOLIO_IMAGES {
        collector.push(&format!("{base}/images/{name}"), alt);
    }
}

/// Scan the README body for markdown image references and embedded `<img>`
/// tags; relative paths are resolved against the raw-content base first.
fn collect_readme_images(
    collector: &mut ImageCollector<'_>,
    body: &str,
    owner: &str,
    repo: &str,
    branch: &str,
) {
    let raw_base = raw_content_base(owner, repo, branch);
    for caps in MD_IMAGE_RE.captures_iter(body) {
        let url = resolve_image_url(&caps[2], &raw_base);
        collector.push(&url, &caps[1]);
    }
    for caps in HTML_IMAGE_SRC_RE.captures_iter(body) {
        let url = resolve_image_url(&caps[1], &raw_base);
        collector.push(&url, "");
    }
}

/// Fallback source: the repository root listing, then the conventional image
/// directories. The screenshot heuristic orders the candidates (likely
/// screenshots first) without excluding anything that passed the rules.
async fn collect_repository_images(
    client: &GithubClient,
    collector: &mut ImageCollector<'_>,
    owner: &str,
    repo: &str,
    branch: &str,
) {
    let entries = match client.root_contents(owner, repo).await {
        Ok(entries) => entries,
        Err(err) => {
            debug!(%err, owner, repo, "root listing unavailable");
            return;
        }
    };

    let mut candidates: Vec<(String, String)> = Vec::new();

    for entry in &entries {
        if !entry.is_file() || !has_image_extension(entry) {
            continue;
        }
        let url = entry.download_url.clone().unwrap_or_else(|| {
            format!("{}{}", raw_content_base(owner, repo, branch), entry.name)
        });
        candidates.push((url, entry.name.clone()));
    }

    for entry in &entries {
        if !entry.is_dir() {
            continue;
        }
        let dir_name = entry.name.to_lowercase();
        if !PREFERRED_IMAGE_DIRS.contains(&dir_name.as_str()) {
            continue;
        }
        let Some(listing_url) = entry.url.as_deref() else {
            continue;
        };
        let files = match client.contents_at(listing_url).await {
            Ok(files) => files,
            Err(err) => {
                debug!(%err, dir = %entry.name, "directory listing unavailable");
                continue;
            }
        };
        for file in files {
            if !file.is_file() || !has_image_extension(&file) {
                continue;
            }
            let Some(url) = file.download_url.clone().or_else(|| file.html_url.clone()) else {
                continue;
            };
            candidates.push((url, file.name));
        }
    }

    let (likely, rest): (Vec<_>, Vec<_>) = candidates
        .into_iter()
        .partition(|(_, name)| looks_like_screenshot(name));
    for (url, name) in likely.into_iter().chain(rest) {
        collector.push(&url, &name);
    }
}

fn has_image_extension(entry: &crate::github::ContentsEntry) -> bool {
    entry
        .extension()
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

fn raw_content_base(owner: &str, repo: &str, branch: &str) -> String {
    format!("https://raw.githubusercontent.com/{owner}/{repo}/{branch}/")
}

/// Absolute URLs pass through unchanged; anything else is treated as a path
/// inside the repository and rooted at the raw-content base.
fn resolve_image_url(url: &str, raw_base: &str) -> String {
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("{raw_base}{}", url.trim_start_matches(['.', '/']))
    }
}
