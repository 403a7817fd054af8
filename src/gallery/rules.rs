use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use url::Url;

/// URL patterns marking badge/logo/icon imagery: badge rendering services,
/// CI and coverage hosts, dependency-bot services, and generic decorative
/// substrings. Matched against the full absolute URL.
const URL_PATTERNS: &[&str] = &[
    r"shields\.io",
    r"badge",
    r"npmjs\.com/.*/v/",
    r"img\.shields\.io",
    r"travis-ci\.org",
    r"travis-ci\.com",
    r"codecov\.io",
    r"coveralls\.io",
    r"github\.com/.*/workflows/",
    r"github\.com/.*/actions/",
    r"badgen\.net",
    r"forthebadge\.com",
    r"david-dm\.org",
    r"snyk\.io",
    r"dependabot\.com",
    r"renovatebot\.com",
    r"greenkeeper\.io",
    r"nodei\.co",
    r"opencollective\.com",
    r"version-badge",
    r"logo",
    r"icon",
    r"favicon",
    r"github.*logo",
    r"npm.*logo",
    r"npm.*icon",
    r"made-with",
    r"built-with",
    r"powered-by",
    r"license.*badge",
    r"license-button",
];

/// Filename patterns, matched against the terminal path segment only.
const FILENAME_PATTERNS: &[&str] = &[
    r"^logo", r"^icon", r"^favicon", r"^badge", r"button", r"^npm", r"^github", r"banner",
];

/// Positive indicators that a filename is a screenshot or demo capture.
/// Advisory only: used to prefer fallback image sources, never to exclude
/// an image that already passed the exclusion rules.
const SCREENSHOT_PATTERNS: &[&str] = &[
    r"screenshot",
    r"demo",
    r"preview",
    r"showcase",
    r"example",
    r"mockup",
    r"ui",
    r"interface",
    r"app",
    r"capture",
    r"img_?\d+",
    r"image_?\d+",
    r"pic_?\d+",
    r"photo_?\d+",
];

static RULES: Lazy<ExclusionRules> = Lazy::new(ExclusionRules::from_builtin);

static SCREENSHOT_REGEXES: Lazy<Vec<Regex>> =
    Lazy::new(|| compile_all(SCREENSHOT_PATTERNS));

/// The two ordered, case-insensitive pattern lists deciding whether an image
/// is decorative. Compiled once at process start; classifier callers hold a
/// shared reference.
pub struct ExclusionRules {
    url_patterns: Vec<Regex>,
    filename_patterns: Vec<Regex>,
}

impl ExclusionRules {
    fn from_builtin() -> Self {
        Self {
            url_patterns: compile_all(URL_PATTERNS),
            filename_patterns: compile_all(FILENAME_PATTERNS),
        }
    }

    pub fn shared() -> &'static ExclusionRules {
        &RULES
    }

    /// True when any URL rule matches the full URL, or any filename rule
    /// matches its terminal path segment. First match wins.
    pub fn should_exclude(&self, url: &str) -> bool {
        if self.url_patterns.iter().any(|p| p.is_match(url)) {
            return true;
        }
        let filename = terminal_segment(url);
        self.filename_patterns.iter().any(|p| p.is_match(&filename))
    }
}

/// Whether a filename carries a positive screenshot indicator.
pub fn looks_like_screenshot(filename: &str) -> bool {
    SCREENSHOT_REGEXES.iter().any(|p| p.is_match(filename))
}

fn compile_all(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|pattern| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .expect("Failed to compile image pattern")
        })
        .collect()
}

/// The final path segment of a URL, query/fragment stripped.
fn terminal_segment(url: &str) -> String {
    if let Ok(parsed) = Url::parse(url) {
        return parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back().map(str::to_string))
            .unwrap_or_default();
    }
    // Relative path: everything after the last slash, before any query.
    url.rsplit('/')
        .next()
        .unwrap_or("")
        .split(['?', '#'])
        .next()
        .unwrap_or("")
        .to_string()
}
