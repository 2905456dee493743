//! Repository tree entries as returned by a fetcher.

use serde::{Deserialize, Serialize};

/// Kind of a tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A file
    Blob,
    /// A directory
    Tree,
    /// A submodule pointer
    Commit,
}

/// One entry of a repository tree.
///
/// Deserializes directly from the objects in GitHub's recursive tree
/// listing (`path`, `type`, `size`); `size` is only present for blobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Slash-separated path relative to the repository root
    pub path: String,
    /// Size in bytes (0 for trees)
    #[serde(rename = "size", default)]
    pub size_bytes: u64,
    /// Blob, tree or submodule
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

impl FileEntry {
    /// Create a blob entry.
    pub fn blob(path: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            path: path.into(),
            size_bytes,
            kind: EntryKind::Blob,
        }
    }

    /// Create a tree (directory) entry.
    pub fn tree(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            size_bytes: 0,
            kind: EntryKind::Tree,
        }
    }

    pub fn is_blob(&self) -> bool {
        self.kind == EntryKind::Blob
    }
}

/// A full tree listing for one reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeListing {
    /// Branch or revision the tree was read from
    pub reference: String,
    /// Flat list of every entry in the tree
    pub entries: Vec<FileEntry>,
    /// Whether the host cut the listing short
    pub truncated: bool,
}

impl TreeListing {
    pub fn new(reference: impl Into<String>, entries: Vec<FileEntry>) -> Self {
        Self {
            reference: reference.into(),
            entries,
            truncated: false,
        }
    }

    /// Number of blob entries.
    pub fn blob_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_blob()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_github_entries() {
        let json = r#"[
            {"path": "src", "mode": "040000", "type": "tree", "sha": "abc"},
            {"path": "src/main.rs", "mode": "100644", "type": "blob", "sha": "def", "size": 1234},
            {"path": "vendor/lib", "mode": "160000", "type": "commit", "sha": "123"}
        ]"#;

        let entries: Vec<FileEntry> = serde_json::from_str(json).unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], FileEntry::tree("src"));
        assert_eq!(entries[1], FileEntry::blob("src/main.rs", 1234));
        assert_eq!(entries[2].kind, EntryKind::Commit);
        assert_eq!(entries[2].size_bytes, 0);
    }

    #[test]
    fn test_blob_count() {
        let listing = TreeListing::new(
            "main",
            vec![
                FileEntry::tree("src"),
                FileEntry::blob("src/a.rs", 10),
                FileEntry::blob("src/b.rs", 20),
            ],
        );

        assert_eq!(listing.blob_count(), 2);
        assert!(!listing.truncated);
    }
}
