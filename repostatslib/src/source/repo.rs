//! Repository identifiers and the fetcher seam.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::aggregate::LanguageBytes;
use crate::data::entry::TreeListing;
use crate::error::RepoStatsError;
use crate::Result;

/// An `owner/name` pair identifying a repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// Build from separate owner and name. Both must be non-blank and
    /// free of `/`.
    pub fn new(owner: &str, name: &str) -> Result<Self> {
        let owner = owner.trim();
        let name = name.trim();
        if owner.is_empty() || name.is_empty() {
            return Err(RepoStatsError::MissingInput);
        }
        if owner.contains('/') || name.contains('/') {
            return Err(RepoStatsError::InvalidRepo(format!("{}/{}", owner, name)));
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// Parse `owner/name`.
    pub fn parse(slug: &str) -> Result<Self> {
        let slug = slug.trim();
        if slug.is_empty() {
            return Err(RepoStatsError::MissingInput);
        }
        match slug.split_once('/') {
            Some((owner, name)) if !name.contains('/') => Self::new(owner, name),
            _ => Err(RepoStatsError::InvalidRepo(slug.to_string())),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Something that can produce a repository's tree or language map.
pub trait RepoSource {
    /// Human-readable description of where data comes from.
    fn describe(&self, repo: &RepoRef) -> String;

    /// Fetch the full recursive tree. With `reference == None` the source
    /// picks its default branch.
    fn fetch_tree(&self, repo: &RepoRef, reference: Option<&str>) -> Result<TreeListing>;

    /// Fetch the per-language byte counts.
    fn fetch_languages(&self, repo: &RepoRef) -> Result<LanguageBytes>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_requires_both_parts() {
        assert!(matches!(
            RepoRef::new("", "repo"),
            Err(RepoStatsError::MissingInput)
        ));
        assert!(matches!(
            RepoRef::new("octocat", "  "),
            Err(RepoStatsError::MissingInput)
        ));

        let repo = RepoRef::new(" octocat ", "hello-world").unwrap();
        assert_eq!(repo.owner, "octocat");
        assert_eq!(repo.to_string(), "octocat/hello-world");
    }

    #[test]
    fn test_new_rejects_slash_in_parts() {
        assert!(matches!(
            RepoRef::new("a", "b/c"),
            Err(RepoStatsError::InvalidRepo(ref s)) if s == "a/b/c"
        ));
        assert!(matches!(
            RepoRef::new("a/b", "c"),
            Err(RepoStatsError::InvalidRepo(_))
        ));
    }

    #[test]
    fn test_parse_slug() {
        let repo = RepoRef::parse("rust-lang/cargo").unwrap();
        assert_eq!(repo.owner, "rust-lang");
        assert_eq!(repo.name, "cargo");
    }

    #[test]
    fn test_parse_invalid_slug() {
        assert!(matches!(
            RepoRef::parse("just-a-name"),
            Err(RepoStatsError::InvalidRepo(_))
        ));
        assert!(matches!(
            RepoRef::parse("a/b/c"),
            Err(RepoStatsError::InvalidRepo(_))
        ));
        assert!(matches!(
            RepoRef::parse("owner/"),
            Err(RepoStatsError::MissingInput)
        ));
        assert!(matches!(RepoRef::parse(""), Err(RepoStatsError::MissingInput)));
    }
}
