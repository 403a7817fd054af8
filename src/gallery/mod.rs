pub mod collect;
pub mod rules;

pub use collect::{ImageCandidate, ImageCollector};
pub use rules::{ExclusionRules, looks_like_screenshot};
