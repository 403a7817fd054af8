pub mod client;
pub mod errors;
pub mod types;

pub use client::GithubClient;
pub use errors::ApiError;
pub use types::{ContentsEntry, PublicEvent, ReadmeResource, RepoDetails};
