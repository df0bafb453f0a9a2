//! Path validation for the database file

use std::path::Path;

use parcel_core::{Error, Result};

/// Validate database path preconditions
pub(crate) fn validate_database_path(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Err(Error::io_error(format!(
            "Database path is a directory, not a file: {}",
            path.display()
        )));
    }

    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
            Err(Error::io_error(format!(
                "Database directory does not exist: {}",
                parent.display()
            )))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_directory_is_rejected() -> Result<()> {
        let dir = TempDir::new()?;
        let result = validate_database_path(dir.path());
        assert!(matches!(result, Err(Error::Io(msg)) if msg.contains("directory")));
        Ok(())
    }

    #[test]
    fn test_missing_parent_is_rejected() -> Result<()> {
        let dir = TempDir::new()?;
        let result = validate_database_path(&dir.path().join("nope").join("tracker.db"));
        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn test_new_file_in_existing_dir_is_accepted() -> Result<()> {
        let dir = TempDir::new()?;
        assert!(validate_database_path(&dir.path().join("tracker.db")).is_ok());
        assert!(validate_database_path(Path::new("tracker.db")).is_ok());
        Ok(())
    }
}
