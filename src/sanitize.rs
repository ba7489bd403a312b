//! Relative path sanitization against the photo root.
//!
//! Cleaning is purely lexical: empty and `.` segments are dropped and
//! parent-directory segments are rejected. Symlinks are not resolved, so a
//! symlink inside the photo root can still point outside it (known
//! limitation).

use std::path::{Path, PathBuf};

use crate::{PiccullError, Result};

/// Lexically clean a caller-supplied relative path.
///
/// An empty input cleans to the empty string, which addresses the base
/// directory itself. Absolute paths and `..` segments fail with a
/// permission error before any filesystem access happens.
pub fn clean_relative(path: &str) -> Result<String> {
    if path.starts_with('/') {
        return Err(PiccullError::Permission(format!("absolute path: {path}")));
    }

    let mut segments = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                return Err(PiccullError::Permission(format!(
                    "path traversal: {path}"
                )))
            }
            s => segments.push(s),
        }
    }

    Ok(segments.join("/"))
}

/// Resolve a caller-supplied relative path against a base directory.
///
/// Returns the cleaned relative path together with the absolute path under
/// `base`.
pub fn resolve(base: &Path, path: &str) -> Result<(String, PathBuf)> {
    let clean = clean_relative(path)?;
    let full = if clean.is_empty() {
        base.to_path_buf()
    } else {
        base.join(&clean)
    };
    Ok((clean, full))
}

/// Join a cleaned relative directory path with a child entry name.
pub fn join_relative(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_plain_path() {
        assert_eq!(clean_relative("vacation/beach.jpg").unwrap(), "vacation/beach.jpg");
    }

    #[test]
    fn test_clean_empty_is_root() {
        assert_eq!(clean_relative("").unwrap(), "");
    }

    #[test]
    fn test_clean_drops_dot_and_empty_segments() {
        assert_eq!(clean_relative("./a//b/./c").unwrap(), "a/b/c");
        assert_eq!(clean_relative("a/b/").unwrap(), "a/b");
    }

    #[test]
    fn test_clean_rejects_traversal() {
        for path in ["../secret", "a/../../b", "a/..", ".."] {
            let err = clean_relative(path).unwrap_err();
            assert!(
                matches!(err, PiccullError::Permission(_)),
                "expected permission error for {path:?}"
            );
        }
    }

    #[test]
    fn test_clean_rejects_absolute_path() {
        let err = clean_relative("/etc/passwd").unwrap_err();
        assert!(matches!(err, PiccullError::Permission(_)));
    }

    #[test]
    fn test_clean_keeps_dotted_names() {
        // A segment merely containing dots is a regular name.
        assert_eq!(clean_relative("a..b/c.jpg").unwrap(), "a..b/c.jpg");
    }

    #[test]
    fn test_resolve_joins_base() {
        let base = Path::new("/photos");
        let (clean, full) = resolve(base, "trip/a.jpg").unwrap();
        assert_eq!(clean, "trip/a.jpg");
        assert_eq!(full, PathBuf::from("/photos/trip/a.jpg"));
    }

    #[test]
    fn test_resolve_empty_is_base() {
        let base = Path::new("/photos");
        let (clean, full) = resolve(base, "").unwrap();
        assert_eq!(clean, "");
        assert_eq!(full, PathBuf::from("/photos"));
    }

    #[test]
    fn test_join_relative() {
        assert_eq!(join_relative("", "a.jpg"), "a.jpg");
        assert_eq!(join_relative("trip", "a.jpg"), "trip/a.jpg");
    }
}
