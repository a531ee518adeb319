//! Where Typing Buddy keeps its settings.
//!
//! | Platform | `settings.toml` location |
//! |----------|--------------------------|
//! | Windows  | `%APPDATA%\typing-buddy\` |
//! | macOS    | `~/Library/Application Support/typing-buddy/` |
//! | Linux    | `~/.config/typing-buddy/` |

use std::path::{Path, PathBuf};

const APP_DIR: &str = "typing-buddy";
const SETTINGS_FILE: &str = "settings.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub settings_file: PathBuf,
}

impl AppPaths {
    /// Paths under the platform config directory (`dirs::config_dir`), or
    /// under the working directory when the platform has none.
    pub fn new() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::under(&base)
    }

    /// Paths rooted at `base` instead of the platform config directory.
    pub fn under(base: &Path) -> Self {
        let config_dir = base.join(APP_DIR);
        let settings_file = config_dir.join(SETTINGS_FILE);
        Self {
            config_dir,
            settings_file,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}
