//! Path management for PettyFlow
//!
//! Provides XDG-compliant path resolution for configuration, the ledger file,
//! the session file and the audit log.
//!
//! ## Path Resolution Order
//!
//! 1. `PETTYFLOW_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/pettyflow` or `~/.config/pettyflow`
//! 3. Windows: `%APPDATA%\pettyflow`

use std::path::PathBuf;

use crate::error::PettyError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "PETTYFLOW_DATA_DIR";

/// Manages all paths used by PettyFlow
#[derive(Debug, Clone)]
pub struct PettyPaths {
    /// Base directory for all PettyFlow data
    base_dir: PathBuf,
}

impl PettyPaths {
    /// Create a new PettyPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, PettyError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create PettyPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/pettyflow/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/pettyflow/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to the session file
    pub fn session_file(&self) -> PathBuf {
        self.base_dir.join("session.json")
    }

    /// Get the path to ledger.json (users, vendors, categories, transactions)
    pub fn ledger_file(&self) -> PathBuf {
        self.data_dir().join("ledger.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), PettyError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| PettyError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| PettyError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if PettyFlow has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, PettyError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                PettyError::Config("HOME environment variable not set".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("pettyflow"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, PettyError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| PettyError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("pettyflow"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PettyPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        std::env::set_var(DATA_DIR_ENV, custom_path);
        let paths = PettyPaths::new().unwrap();
        std::env::remove_var(DATA_DIR_ENV);

        assert_eq!(paths.base_dir(), temp_dir.path());
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PettyPaths::with_base_dir(temp_dir.path().join("nested"));

        assert!(!paths.is_initialized());
        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PettyPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.session_file(), temp_dir.path().join("session.json"));
        assert_eq!(
            paths.ledger_file(),
            temp_dir.path().join("data").join("ledger.json")
        );
    }
}
