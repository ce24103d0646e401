use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse JSON response from {url}")]
    JsonParse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse XML response from {url}")]
    XmlParse {
        url: String,
        #[source]
        source: quick_xml::Error,
    },

    #[error("No observation stations listed near {latitude},{longitude}")]
    NoStations { latitude: f64, longitude: f64 },

    #[error("No time dimension found in WMS capabilities from {0}")]
    NoTimeDimension(String),
}
