use crate::cache::error::CacheError;
use crate::config::ConfigError;
use crate::upstream::error::UpstreamError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventWeatherError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to determine cache directory")]
    CacheDirResolution(#[source] std::io::Error),
}
