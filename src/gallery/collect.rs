use serde::Serialize;
use std::collections::HashSet;
use utoipa::ToSchema;

use crate::gallery::rules::ExclusionRules;

/// One surviving gallery image: absolute URL plus alt text.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ImageCandidate {
    pub url: String,
    pub alt: String,
}

/// Accumulates gallery images for one request: excluded URLs never enter,
/// duplicates are dropped by exact URL match, and the first occurrence wins
/// (including its alt text). Discovery order is preserved.
pub struct ImageCollector<'a> {
    rules: &'a ExclusionRules,
    seen: HashSet<String>,
    images: Vec<ImageCandidate>,
}

impl<'a> ImageCollector<'a> {
    pub fn new(rules: &'a ExclusionRules) -> Self {
        Self {
            rules,
            seen: HashSet::new(),
            images: Vec::new(),
        }
    }

    pub fn push(&mut self, url: &str, alt: &str) {
        if url.is_empty() || self.seen.contains(url) {
            return;
        }
        if self.rules.should_exclude(url) {
            return;
        }
        self.seen.insert(url.to_string());
        self.images.push(ImageCandidate {
            url: url.to_string(),
            alt: alt.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn into_images(self) -> Vec<ImageCandidate> {
        self.images
    }
}
