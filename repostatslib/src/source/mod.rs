//! Source discovery: where repository data comes from.
//!
//! This module handles the first stage of the pipeline - getting a
//! repository's tree or language map, and deciding which paths count.
//! It provides:
//!
//! - **Path filtering**: Ignore rules and include globs
//! - **GitHub fetcher**: Recursive tree and languages endpoints
//! - **Local fetcher**: Committed tree of a git repository on disk
//!
//! ## Example
//!
//! ```rust,ignore
//! use repostatslib::source::{FilterConfig, GitHubClient, RepoRef, RepoSource};
//!
//! let client = GitHubClient::from_env()?;
//! let listing = client.fetch_tree(&RepoRef::parse("octocat/hello-world")?, None)?;
//! let filter = FilterConfig::new().include("src/**")?;
//! ```

pub mod filter;
pub mod github;
pub mod local;
pub mod repo;

pub use filter::{
    rule_matches, should_include, FilterConfig, IgnoreList, COMMON_IGNORE_ITEMS, DEFAULT_IGNORES,
};
pub use github::GitHubClient;
pub use local::LocalRepository;
pub use repo::{RepoRef, RepoSource};
