use log::info;
use std::io;
use std::path::{Path, PathBuf};

const CACHE_DIR_NAME: &str = "event_weather_cache";

pub fn get_cache_dir() -> io::Result<PathBuf> {
    dirs::cache_dir()
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine system cache directory",
            )
        })
        .map(|p| p.join(CACHE_DIR_NAME))
}

pub async fn ensure_cache_dir_exists(path: &Path) -> io::Result<()> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => {
            if !metadata.is_dir() {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("Cache path exists but is not a directory: {}", path.display()),
                ));
            }
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("Creating cache directory: {}", path.display());
            tokio::fs::create_dir_all(path).await
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ensure_cache_dir_exists() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("a").join("b");
        ensure_cache_dir_exists(&nested).await.expect("created");
        assert!(nested.is_dir());
        ensure_cache_dir_exists(&nested).await.expect("idempotent");

        let file = dir.path().join("file");
        std::fs::write(&file, b"x").expect("write");
        assert!(ensure_cache_dir_exists(&file).await.is_err());
    }
}
