use std::fs;
use std::path::PathBuf;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use crate::error::Result;

/// Manages paths for tabquote configuration and data
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root configuration directory (~/.tabquote)
    pub root: PathBuf,
    /// Configuration file path (~/.tabquote/config.toml)
    pub config_file: PathBuf,
    /// Persistent key-value store (~/.tabquote/store.json)
    pub store_file: PathBuf,
}

impl Paths {
    /// Create a new Paths instance using the user's home directory
    pub fn new() -> Result<Self> {
        let home = std::env::var("HOME")?;
        Ok(Self::at(PathBuf::from(home).join(".tabquote")))
    }

    /// Lay out all paths under a given root directory
    pub fn at(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.toml"),
            store_file: root.join("store.json"),
            root,
        }
    }

    /// Create `~/.tabquote`, owner-only
    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;

        #[cfg(unix)]
        {
            let perms = fs::Permissions::from_mode(0o700);
            fs::set_permissions(&self.root, perms)?;
        }

        Ok(())
    }

    pub fn config_exists(&self) -> bool {
        self.config_file.exists()
    }
}
