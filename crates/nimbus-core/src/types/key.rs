//! Object-store key derivation.
//!
//! Every blob is addressed by a key derived from the owning user, the
//! folder label, and the record's generated id. The same derivation is
//! used by every operation that touches a blob, so upload and delete can
//! never disagree about where an object lives. The original filename is
//! deliberately excluded: user-supplied names must not influence storage
//! paths.

use std::fmt;

use crate::types::{FileId, UserId};

/// A derived object-store key of the form `<owner>/<folder>/<file-id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Derive the key for a file blob.
    ///
    /// The folder segment is sanitized so that free-form folder labels
    /// (including ones containing `/`, `\` or `..`) cannot escape the
    /// `<owner>/` prefix.
    pub fn derive(owner: UserId, folder: &str, file_id: FileId) -> Self {
        Self(format!(
            "{}/{}/{}",
            owner,
            sanitize_segment(folder),
            file_id
        ))
    }

    /// Return the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ObjectKey> for String {
    fn from(key: ObjectKey) -> String {
        key.0
    }
}

/// Reduce a free-form folder label to a single safe path segment.
///
/// Path separators become `_`, leading dots are stripped, and control
/// characters are dropped. An empty result falls back to `root`.
fn sanitize_segment(segment: &str) -> String {
    let cleaned: String = segment
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '/' | '\\' => '_',
            c => c,
        })
        .collect();

    let cleaned = cleaned.trim().trim_start_matches('.').to_string();

    if cleaned.is_empty() {
        "root".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_parts(key: &ObjectKey) -> Vec<String> {
        key.as_str().split('/').map(String::from).collect()
    }

    #[test]
    fn test_plain_folder() {
        let owner = UserId::new();
        let file = FileId::new();
        let key = ObjectKey::derive(owner, "docs", file);
        assert_eq!(
            key.as_str(),
            format!("{owner}/docs/{file}")
        );
    }

    #[test]
    fn test_empty_folder_defaults_to_root() {
        let key = ObjectKey::derive(UserId::new(), "", FileId::new());
        assert_eq!(key_parts(&key)[1], "root");
    }

    #[test]
    fn test_traversal_attempts_stay_under_prefix() {
        let owner = UserId::new();
        for folder in ["../secrets", "..", "a/b/c", "..\\..\\etc", "./hidden", "\0x"] {
            let key = ObjectKey::derive(owner, folder, FileId::new());
            let parts = key_parts(&key);
            assert_eq!(parts.len(), 3, "folder {folder:?} produced {key}");
            assert_eq!(parts[0], owner.to_string());
            assert_ne!(parts[1], "..");
            assert!(!parts[1].starts_with('.'));
        }
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let owner = UserId::new();
        let file = FileId::new();
        assert_eq!(
            ObjectKey::derive(owner, "Work", file),
            ObjectKey::derive(owner, "Work", file)
        );
    }
}
