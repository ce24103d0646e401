use crate::cache::error::CacheError;
use bincode::config::{Configuration, Fixint, LittleEndian};
use chrono::{DateTime, TimeDelta, Utc};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

const BINCODE_CONFIG: Configuration<LittleEndian, Fixint> =
    bincode::config::standard().with_fixed_int_encoding();

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    expires_at: DateTime<Utc>,
    value: T,
}

/// Key/value store persisted as one bincode file per key.
#[derive(Debug, Clone)]
pub struct DiskCache {
    cache_dir: PathBuf,
}

impl DiskCache {
    pub fn new(cache_dir: &Path) -> Self {
        Self {
            cache_dir: cache_dir.to_path_buf(),
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// File backing `key`; anything other than ASCII alphanumerics, `-` and `_`
    /// is replaced with `_`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.cache_dir.join(format!("{name}.bin"))
    }

    /// Reads `key`, deleting the file when it has expired.
    pub async fn get<T>(&self, key: &str) -> Result<Option<T>, CacheError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let path = self.path_for(key);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("Disk cache miss for '{}'", key);
                return Ok(None);
            }
            Err(e) => return Err(CacheError::Read(path, e)),
        };

        let decode_path = path.clone();
        let envelope = tokio::task::spawn_blocking(move || {
            bincode::serde::decode_from_slice::<Envelope<T>, _>(&bytes, BINCODE_CONFIG)
                .map(|(envelope, _)| envelope)
                .map_err(|e| CacheError::Decode(decode_path, Box::new(e)))
        })
        .await??;

        if Utc::now() >= envelope.expires_at {
            info!("Disk cache entry '{}' expired, removing {:?}", key, path);
            if let Err(e) = tokio::fs::remove_file(&path).await {
                warn!("Failed to remove expired cache file {:?}: {}", path, e);
            }
            return Ok(None);
        }
        info!("Disk cache hit for '{}' at {:?}", key, path);
        Ok(Some(envelope.value))
    }

    pub async fn put<T>(&self, key: &str, value: T, ttl: Duration) -> Result<(), CacheError>
    where
        T: Serialize + Send + 'static,
    {
        tokio::fs::create_dir_all(&self.cache_dir)
            .await
            .map_err(|e| CacheError::CacheDirCreation(self.cache_dir.clone(), e))?;

        let now = Utc::now();
        let expires_at = TimeDelta::from_std(ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let bytes = tokio::task::spawn_blocking(move || {
            bincode::serde::encode_to_vec(Envelope { expires_at, value }, BINCODE_CONFIG)
                .map_err(|e| CacheError::Encode(Box::new(e)))
        })
        .await??;

        let path = self.path_for(key);
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| CacheError::Write(path.clone(), e))?;
        info!("Wrote {} bytes to disk cache at {:?}", bytes.len(), path);
        Ok(())
    }

    /// Deletes the file for `key` if present.
    pub async fn remove(&self, key: &str) -> Result<(), CacheError> {
        let path = self.path_for(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::Write(path, e)),
        }
    }
}
