//! Platform directory table used by path resolution.

use std::env;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{Error, Result};

/// Local folder names probed for a synced cloud directory, in order
/// of preference.
pub const CLOUD_FOLDER_NAMES: [&str; 3] = ["Nextcloud", "ownCloud", "owncloud"];

/// The well-known directories of the current user.
///
/// Detected once at startup; tests build the table by hand so no
/// resolution behavior depends on the machine running them.
#[derive(Debug, Clone)]
pub struct SysDirs {
    pub home: PathBuf,
    pub username: String,
    /// Directory containing user homes (`/home`, `/Users`, `C:\Users`).
    pub profiles_root: PathBuf,
    pub appdata: PathBuf,
    pub local_appdata: PathBuf,
    pub documents: PathBuf,
    pub temp: PathBuf,
    /// Per-user executables, searched in addition to PATH.
    pub local_bin: PathBuf,
    /// Synced cloud folder under home, when one exists.
    pub cloud: Option<PathBuf>,
}

impl SysDirs {
    pub fn detect() -> Result<Self> {
        let home = dirs::home_dir().ok_or(Error::NoHome)?;
        let username = whoami::username();
        let profiles_root = home
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| home.clone());
        let (appdata, local_appdata) = if cfg!(windows) {
            (
                env::var_os("APPDATA")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| home.join("AppData").join("Roaming")),
                env::var_os("LOCALAPPDATA")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| home.join("AppData").join("Local")),
            )
        } else {
            (home.join(".config"), home.join(".local").join("share"))
        };
        let documents = dirs::document_dir().unwrap_or_else(|| home.join("Documents"));
        let cloud = CLOUD_FOLDER_NAMES
            .iter()
            .map(|name| home.join(name))
            .find(|candidate| candidate.is_dir());
        if let Some(found) = &cloud {
            debug!(path = %found.display(), "detected cloud folder");
        }
        Ok(Self {
            local_bin: home.join(".local").join("bin"),
            temp: env::temp_dir(),
            home,
            username,
            profiles_root,
            appdata,
            local_appdata,
            documents,
            cloud,
        })
    }

    /// Leaf name of the detected cloud folder, if any.
    pub fn cloud_name(&self) -> Option<&str> {
        self.cloud
            .as_deref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
    }
}
