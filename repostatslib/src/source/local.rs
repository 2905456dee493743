//! Local git repository source.
//!
//! Reads the committed tree of a repository on disk, so statistics can be
//! computed without network access. Only committed content is seen; the
//! working tree and index are ignored.

use std::path::{Path, PathBuf};

use crate::data::aggregate::LanguageBytes;
use crate::data::entry::{FileEntry, TreeListing};
use crate::error::RepoStatsError;
use crate::source::repo::{RepoRef, RepoSource};
use crate::Result;

/// A git repository discovered at or above a path.
pub struct LocalRepository {
    repo: gix::Repository,
    path: PathBuf,
}

impl LocalRepository {
    /// Discover the repository containing `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let repo = gix::discover(path).map_err(|e| {
            RepoStatsError::GitError(format!("Failed to discover git repository: {}", e))
        })?;
        Ok(Self {
            repo,
            path: path.to_path_buf(),
        })
    }

    /// Identifier derived from the directory name, for display.
    pub fn repo_ref(&self) -> RepoRef {
        let dir = self
            .repo
            .work_dir()
            .unwrap_or_else(|| self.repo.git_dir())
            .to_path_buf();
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "repository".to_string());
        RepoRef {
            owner: "local".to_string(),
            name,
        }
    }

    fn read_tree(&self, reference: &str) -> Result<Vec<FileEntry>> {
        let id = self
            .repo
            .rev_parse_single(reference.as_bytes())
            .map_err(|e| {
                RepoStatsError::GitError(format!("Failed to resolve '{}': {}", reference, e))
            })?
            .detach();

        let commit = self.repo.find_commit(id).map_err(|e| {
            RepoStatsError::GitError(format!("Failed to find commit '{}': {}", reference, e))
        })?;

        let tree = commit.tree().map_err(|e| {
            RepoStatsError::GitError(format!("Failed to get tree for '{}': {}", reference, e))
        })?;

        let mut entries = Vec::new();
        collect_entries(&self.repo, &tree, "", &mut entries)?;
        Ok(entries)
    }
}

/// Recursively collect blob and tree entries with slash-separated paths.
fn collect_entries(
    repo: &gix::Repository,
    tree: &gix::Tree<'_>,
    prefix: &str,
    entries: &mut Vec<FileEntry>,
) -> Result<()> {
    for entry in tree.iter() {
        let entry = entry
            .map_err(|e| RepoStatsError::GitError(format!("Failed to read tree entry: {}", e)))?;

        let name = entry.filename().to_string();
        let path = if prefix.is_empty() {
            name
        } else {
            format!("{}/{}", prefix, name)
        };

        // Symlinks are blobs holding the target path, as the GitHub tree reports them
        if entry.mode().is_blob_or_symlink() {
            let header = repo
                .find_header(entry.oid())
                .map_err(|e| RepoStatsError::GitError(format!("Failed to find blob: {}", e)))?;
            entries.push(FileEntry::blob(path, header.size()));
        } else if entry.mode().is_tree() {
            let subtree = repo
                .find_object(entry.oid())
                .map_err(|e| RepoStatsError::GitError(format!("Failed to find tree: {}", e)))?
                .try_into_tree()
                .map_err(|_| RepoStatsError::GitError("Object is not a tree".to_string()))?;
            entries.push(FileEntry::tree(path.clone()));
            collect_entries(repo, &subtree, &path, entries)?;
        }
    }
    Ok(())
}

impl RepoSource for LocalRepository {
    fn describe(&self, _repo: &RepoRef) -> String {
        format!("git:{}", self.path.display())
    }

    fn fetch_tree(&self, _repo: &RepoRef, reference: Option<&str>) -> Result<TreeListing> {
        let reference = reference.unwrap_or("HEAD");
        let entries = self.read_tree(reference)?;
        tracing::info!(
            path = %self.path.display(),
            reference,
            entries = entries.len(),
            "read local tree"
        );
        Ok(TreeListing::new(reference, entries))
    }

    fn fetch_languages(&self, _repo: &RepoRef) -> Result<LanguageBytes> {
        Err(RepoStatsError::Unsupported(
            "language detection needs the GitHub languages endpoint",
        ))
    }
}
