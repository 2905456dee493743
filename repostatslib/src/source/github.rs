//! GitHub REST API fetcher.
//!
//! Two endpoints are used:
//!
//! - `GET /repos/{owner}/{repo}/git/trees/{ref}?recursive=1` for the tree
//! - `GET /repos/{owner}/{repo}/languages` for the language map
//!
//! Without an explicit reference the tree is read from `main`, falling back
//! once to `master`. Requests are unauthenticated.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::data::aggregate::LanguageBytes;
use crate::data::entry::{FileEntry, TreeListing};
use crate::error::RepoStatsError;
use crate::source::repo::{RepoRef, RepoSource};
use crate::Result;

/// Public GitHub API.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "REPOSTATS_API_URL";

/// Branches tried in order when no reference is given.
pub const DEFAULT_BRANCHES: [&str; 2] = ["main", "master"];

const USER_AGENT: &str = concat!("repostats/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct TreeResponse {
    tree: Vec<FileEntry>,
    #[serde(default)]
    truncated: bool,
}

/// Blocking GitHub API client.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    base_url: String,
}

impl GitHubClient {
    /// Client against an explicit API base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Client against `$REPOSTATS_API_URL`, or the public API.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(API_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tree_url(&self, repo: &RepoRef, reference: &str) -> String {
        format!(
            "{}/repos/{}/{}/git/trees/{}?recursive=1",
            self.base_url, repo.owner, repo.name, reference
        )
    }

    fn languages_url(&self, repo: &RepoRef) -> String {
        format!(
            "{}/repos/{}/{}/languages",
            self.base_url, repo.owner, repo.name
        )
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T> {
        tracing::debug!(url, "GET");
        let resp = self.http.get(url).send()?;

        let status = resp.status();
        if !status.is_success() {
            tracing::debug!(url, %status, "request failed");
            return Err(RepoStatsError::FetchFailed {
                message: format!("Failed to fetch {} ({})", what, status),
            });
        }

        resp.json::<T>()
            .map_err(|e| RepoStatsError::Decode(e.to_string()))
    }

    fn fetch_tree_at(&self, repo: &RepoRef, reference: &str) -> Result<TreeListing> {
        let url = self.tree_url(repo, reference);
        let body: TreeResponse = self.get_json(&url, "repository contents")?;

        tracing::info!(
            repo = %repo,
            reference,
            entries = body.tree.len(),
            "fetched tree"
        );

        Ok(TreeListing {
            reference: reference.to_string(),
            entries: body.tree,
            truncated: body.truncated,
        })
    }
}

impl RepoSource for GitHubClient {
    fn describe(&self, repo: &RepoRef) -> String {
        format!("{}/repos/{}", self.base_url, repo)
    }

    fn fetch_tree(&self, repo: &RepoRef, reference: Option<&str>) -> Result<TreeListing> {
        if let Some(reference) = reference {
            return self.fetch_tree_at(repo, reference);
        }

        let [primary, fallback] = DEFAULT_BRANCHES;
        match self.fetch_tree_at(repo, primary) {
            Err(RepoStatsError::FetchFailed { .. }) => {
                tracing::info!(repo = %repo, "no '{}' branch, trying '{}'", primary, fallback);
                self.fetch_tree_at(repo, fallback).map_err(|e| match e {
                    RepoStatsError::FetchFailed { .. } => RepoStatsError::FetchFailed {
                        message: "Failed to fetch repository contents".to_string(),
                    },
                    other => other,
                })
            }
            other => other,
        }
    }

    fn fetch_languages(&self, repo: &RepoRef) -> Result<LanguageBytes> {
        let url = self.languages_url(repo);
        let languages: LanguageBytes = self.get_json(&url, "repository languages")?;
        tracing::info!(repo = %repo, languages = languages.len(), "fetched languages");
        Ok(languages)
    }
}
