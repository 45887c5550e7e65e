//! Source-file resolution: validate that a script document exists and is
//! readable before handing it to the engine or the fallback copy.
//!
//! The check is deliberately shallow — existence and read permission only.
//! The content is not inspected: the browser is the authority on what it can
//! render, and the fallback copies bytes it never looks at.

use crate::error::DocumentError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolve a source path, validating existence and readability.
pub fn resolve_source(path: &Path) -> Result<PathBuf, DocumentError> {
    if !path.exists() {
        return Err(DocumentError::SourceMissing {
            path: path.to_path_buf(),
        });
    }

    // Check read permission by attempting to open.
    match std::fs::File::open(path) {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(DocumentError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(_) => {
            return Err(DocumentError::SourceMissing {
                path: path.to_path_buf(),
            });
        }
    }

    debug!("Resolved source document: {}", path.display());
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_source_missing() {
        let err = resolve_source(Path::new("/no/such/file.html")).unwrap_err();
        assert!(matches!(err, DocumentError::SourceMissing { .. }));
    }

    #[test]
    fn existing_file_resolves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.html");
        std::fs::write(&path, "<html></html>").unwrap();

        let resolved = resolve_source(&path).unwrap();
        assert_eq!(resolved, path);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_file_is_permission_denied() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locked.html");
        std::fs::write(&path, "<html></html>").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores permission bits; only assert when the open really fails.
        if std::fs::File::open(&path).is_err() {
            assert!(matches!(
                resolve_source(&path).unwrap_err(),
                DocumentError::PermissionDenied { .. }
            ));
        }

        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();
    }
}
