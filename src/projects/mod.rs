pub mod dtos;
pub mod handlers;
pub mod service;

pub use dtos::{ProjectCard, RepositoryBuckets};
