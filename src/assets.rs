//! Loading haptic descriptors from an asset directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{Error, Result};

/// A read-only store of named assets, plus a private writable area that
/// assets can be copied into when a player needs a real file path.
pub trait AssetSource {
    /// Reads the full contents of an asset.
    fn read_asset(&self, name: &str) -> Result<Vec<u8>>;

    /// Copies an asset into private storage and returns the copy's path.
    ///
    /// An existing copy is kept as is, so repeated calls are cheap.
    fn copy_to_private_storage(&self, name: &str) -> Result<PathBuf>;

    /// Reads an asset as UTF-8 text with its line breaks removed.
    ///
    /// HE descriptors are JSON, where line breaks between tokens carry no
    /// meaning, and players expect them as a single line.
    fn read_pattern(&self, name: &str) -> Result<String> {
        let bytes = self.read_asset(name)?;
        let text = String::from_utf8(bytes).map_err(|e| Error::Asset {
            name: name.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;
        Ok(text.lines().collect())
    }
}

/// Assets stored as files in a directory.
///
/// # Examples
///
/// ```no_run
/// use haptic_dynamics::assets::{AssetSource, DirAssets};
///
/// let assets = DirAssets::new("assets", "target/haptic-storage");
/// let pattern = assets.read_pattern("bow_drag.he")?;
/// let heartbeat = assets.copy_to_private_storage("heartbeat.he")?;
/// # Ok::<(), haptic_dynamics::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct DirAssets {
    asset_dir: PathBuf,
    storage_dir: PathBuf,
}

impl DirAssets {
    /// Creates a source reading from `asset_dir` and copying into `storage_dir`.
    ///
    /// Neither directory is touched until an asset is requested.
    pub fn new(asset_dir: impl Into<PathBuf>, storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            asset_dir: asset_dir.into(),
            storage_dir: storage_dir.into(),
        }
    }

    pub fn asset_dir(&self) -> &Path {
        &self.asset_dir
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    fn asset_path(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self.asset_dir.join(name))
    }
}

impl AssetSource for DirAssets {
    fn read_asset(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.asset_path(name)?;
        debug!(?path, "reading asset");
        fs::read(&path).map_err(|source| Error::Asset {
            name: name.to_string(),
            source,
        })
    }

    fn copy_to_private_storage(&self, name: &str) -> Result<PathBuf> {
        let source_path = self.asset_path(name)?;
        let dest = self.storage_dir.join(name);
        if dest.exists() {
            debug!(?dest, "asset already copied");
            return Ok(dest);
        }

        fs::create_dir_all(&self.storage_dir).map_err(|source| Error::Io {
            path: self.storage_dir.clone(),
            source,
        })?;
        fs::copy(&source_path, &dest).map_err(|source| Error::Asset {
            name: name.to_string(),
            source,
        })?;
        info!(?dest, "copied asset to private storage");
        Ok(dest)
    }
}

/// Accepts bare file names only.
fn validate_name(name: &str) -> Result<()> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\'])
        || Path::new(name).is_absolute();
    if bad {
        return Err(Error::InvalidAssetName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, DirAssets) {
        let dir = TempDir::new().unwrap();
        let assets_dir = dir.path().join("assets");
        fs::create_dir(&assets_dir).unwrap();
        fs::write(
            assets_dir.join("bow_drag.he"),
            "{\n  \"Metadata\": {\"Version\": 1},\n  \"Pattern\": []\n}\n",
        )
        .unwrap();
        fs::write(assets_dir.join("heartbeat.he"), "{\"Pattern\": []}").unwrap();
        let assets = DirAssets::new(assets_dir, dir.path().join("storage"));
        (dir, assets)
    }

    #[test]
    fn test_read_pattern_joins_lines() {
        let (_dir, assets) = setup();
        let text = assets.read_pattern("bow_drag.he").unwrap();
        assert_eq!(text, "{  \"Metadata\": {\"Version\": 1},  \"Pattern\": []}");
    }

    #[test]
    fn test_missing_asset() {
        let (_dir, assets) = setup();
        let err = assets.read_asset("missing.he").unwrap_err();
        assert!(matches!(err, Error::Asset { ref name, .. } if name == "missing.he"));
    }

    #[test]
    fn test_invalid_utf8_pattern() {
        let (_dir, assets) = setup();
        fs::write(assets.asset_dir().join("binary.he"), [0xff, 0xfe, 0x00]).unwrap();
        assert!(matches!(
            assets.read_pattern("binary.he"),
            Err(Error::Asset { .. })
        ));
    }

    #[test]
    fn test_copy_creates_storage_and_keeps_existing() {
        let (_dir, assets) = setup();
        let path = assets.copy_to_private_storage("heartbeat.he").unwrap();
        assert_eq!(path, assets.storage_dir().join("heartbeat.he"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"Pattern\": []}");

        // An existing copy is left alone even when the asset changes
        fs::write(&path, "edited").unwrap();
        fs::write(assets.asset_dir().join("heartbeat.he"), "new").unwrap();
        let again = assets.copy_to_private_storage("heartbeat.he").unwrap();
        assert_eq!(again, path);
        assert_eq!(fs::read_to_string(&again).unwrap(), "edited");
    }

    #[test]
    fn test_rejects_paths() {
        let (_dir, assets) = setup();
        for name in ["", ".", "..", "../secret", "nested/file.he", "a\\b", "/etc/passwd"] {
            assert!(
                matches!(assets.read_asset(name), Err(Error::InvalidAssetName(_))),
                "accepted {name:?}"
            );
        }
    }
}
