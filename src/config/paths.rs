//! Where settings and the word list live on disk.
//!
//! Both files share one directory, `<config_dir>/word-drill/`:
//!
//!   Windows: %APPDATA%\word-drill\
//!   macOS:   ~/Library/Application Support/word-drill/
//!   Linux:   ~/.config/word-drill/
//!
//! The `--config` flag replaces that directory wholesale.

use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "word-drill";
const SETTINGS_FILE_NAME: &str = "settings.toml";
const WORD_LIST_FILE_NAME: &str = "word-list.json";

/// Resolved locations of every file the application reads or writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub settings_file: PathBuf,
    pub word_list_file: PathBuf,
}

impl AppPaths {
    /// Platform default directory (current directory if the platform has
    /// no config dir).
    pub fn new() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::in_dir(&base.join(APP_DIR_NAME))
    }

    /// Every file inside `config_dir`.
    pub fn in_dir(config_dir: &Path) -> Self {
        Self {
            config_dir: config_dir.to_path_buf(),
            settings_file: config_dir.join(SETTINGS_FILE_NAME),
            word_list_file: config_dir.join(WORD_LIST_FILE_NAME),
        }
    }

    /// `override_dir` when given, otherwise the platform default.
    pub fn resolve(override_dir: Option<&Path>) -> Self {
        match override_dir {
            Some(dir) => {
                log::debug!("config: using directory {}", dir.display());
                Self::in_dir(dir)
            }
            None => Self::new(),
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dir_ends_with_app_name() {
        let paths = AppPaths::new();
        assert!(paths.config_dir.ends_with(APP_DIR_NAME));
        assert_eq!(paths.settings_file.parent(), Some(paths.config_dir.as_path()));
        assert_eq!(paths.word_list_file.parent(), Some(paths.config_dir.as_path()));
    }

    #[test]
    fn in_dir_places_files_in_that_directory() {
        let paths = AppPaths::in_dir(Path::new("/tmp/drill"));
        assert_eq!(paths.settings_file, Path::new("/tmp/drill/settings.toml"));
        assert_eq!(paths.word_list_file, Path::new("/tmp/drill/word-list.json"));
    }

    #[test]
    fn resolve_prefers_override() {
        let dir = Path::new("/srv/drill");
        assert_eq!(AppPaths::resolve(Some(dir)), AppPaths::in_dir(dir));
        assert_eq!(AppPaths::resolve(None), AppPaths::new());
    }
}
