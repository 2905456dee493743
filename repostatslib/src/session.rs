//! Explicit state for an interactive stats view.
//!
//! A [`StatsSession`] holds everything a front end needs between user
//! actions: the repository inputs, the ignore list, the last result or
//! error, and a loading flag. Handlers receive the session by `&mut`, so a
//! second fetch cannot start while one is running.

use serde::Serialize;

use crate::data::collect::{collect_stats, StatsOptions};
use crate::data::stats::LanguageStats;
use crate::query::options::Strategy;
use crate::source::filter::{FilterConfig, IgnoreList};
use crate::source::repo::{RepoRef, RepoSource};
use crate::Result;

/// State of one stats view.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatsSession {
    pub username: String,
    pub repository: String,
    pub ignore_list: IgnoreList,
    pub strategy: Strategy,
    /// Apply the ignore list to language names in the languages strategy
    pub apply_ignore_to_languages: bool,
    /// Branch or revision; `None` uses the source default
    pub reference: Option<String>,
    pub loading: bool,
    pub stats: Option<LanguageStats>,
    pub error: Option<String>,
}

impl StatsSession {
    pub fn new(username: impl Into<String>, repository: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            repository: repository.into(),
            ..Self::default()
        }
    }

    /// Flip one ignore rule. Returns whether it is active afterwards.
    pub fn toggle_ignore(&mut self, rule: &str) -> bool {
        self.ignore_list.toggle(rule)
    }

    /// Repository identifier from the current inputs.
    pub fn repo_ref(&self) -> Result<RepoRef> {
        RepoRef::new(&self.username, &self.repository)
    }

    /// Options for the next fetch, built from the session state plus any
    /// include patterns.
    pub fn options(&self, include: FilterConfig) -> StatsOptions {
        let filter = FilterConfig {
            ignore: self.ignore_list.clone(),
            include: include.include,
        };
        let mut options = StatsOptions::new()
            .strategy(self.strategy)
            .filter(filter)
            .apply_ignore_to_languages(self.apply_ignore_to_languages);
        if let Some(reference) = &self.reference {
            options = options.reference(reference.clone());
        }
        options
    }

    /// Run a fetch and record its outcome.
    ///
    /// Missing input is reported without touching the source. On any error
    /// the previous stats are cleared so nothing stale is shown alongside
    /// the message. `loading` is always false when this returns.
    pub fn fetch(&mut self, source: &dyn RepoSource, include: FilterConfig) -> Result<&LanguageStats> {
        self.error = None;

        let repo = match self.repo_ref() {
            Ok(repo) => repo,
            Err(e) => {
                self.stats = None;
                self.error = Some(e.to_string());
                return Err(e);
            }
        };

        let options = self.options(include);
        self.loading = true;
        let outcome = collect_stats(source, &repo, &options);
        self.loading = false;

        match outcome {
            Ok(stats) => Ok(self.stats.insert(stats)),
            Err(e) => {
                tracing::warn!(repo = %repo, error = %e, "fetch failed");
                self.stats = None;
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}
