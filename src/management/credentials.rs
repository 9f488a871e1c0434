use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::{error::StoreError, types::TokenRecord};

/// Pass-through serializer for the single persisted [`TokenRecord`].
///
/// The store keeps no copy of the record. Writes go to a sibling `.tmp` file
/// that is renamed over the target, so readers never see a partial file.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<Option<TokenRecord>, StoreError> {
        let content = match async_fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        let record = serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(Some(record))
    }

    pub async fn save(&self, record: &TokenRecord) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            // only tighten directories we create ourselves
            if !parent.as_os_str().is_empty() && async_fs::metadata(parent).await.is_err() {
                async_fs::create_dir_all(parent)
                    .await
                    .map_err(|e| self.io_error(e))?;
                restrict_permissions(parent, 0o700)
                    .await
                    .map_err(|e| self.io_error(e))?;
            }
        }

        let json = serde_json::to_string_pretty(record).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            source: e,
        })?;

        let tmp = self.tmp_path();
        let result = match write_owner_only(&tmp, json.as_bytes()).await {
            Ok(()) => async_fs::rename(&tmp, &self.path).await,
            Err(e) => Err(e),
        };

        if let Err(e) = result {
            let _ = async_fs::remove_file(&tmp).await;
            return Err(self.io_error(e));
        }
        Ok(())
    }

    /// Removes the record. A missing file is not an error.
    pub async fn clear(&self) -> Result<(), StoreError> {
        match async_fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// Writes `contents` to a fresh file that is owner-only from creation on.
/// A leftover file at `path` is removed first, since `mode` only applies to
/// newly created files.
async fn write_owner_only(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    match async_fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    file.write_all(contents).await?;
    file.sync_all().await
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    async_fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).await
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path, _mode: u32) -> std::io::Result<()> {
    Ok(())
}
