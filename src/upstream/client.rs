//! Thin async HTTP client over the upstream weather services: api.weather.gov for
//! forecasts and observations, the NOAA GeoServer WMS for radar, and SSEC RealEarth
//! for satellite frame times.

use crate::types::raw_series::RawFieldSeries;
use crate::upstream::error::UpstreamError;
use crate::upstream::models::{
    AlertCollection, GridPoint, GridpointResponse, ObservationProperties, ObservationResponse,
    PointsResponse, StationCollection,
};
use log::{info, warn};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;

pub const NWS_API_URL: &str = "https://api.weather.gov";
pub const RADAR_WMS_URL: &str = "https://opengeo.ncep.noaa.gov/geoserver/conus/conus_bref_qcd/ows";
pub const SATELLITE_TIMES_URL: &str = "https://realearth.ssec.wisc.edu/api/times";
pub const SATELLITE_TILE_URL: &str = "https://realearth.ssec.wisc.edu/api/image";

const USER_AGENT: &str = concat!("event_weather/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct NwsClient {
    http: Client,
    api_url: String,
}

impl NwsClient {
    pub fn new() -> Result<Self, UpstreamError> {
        Self::with_api_url(NWS_API_URL)
    }

    /// Creates a client pointed at a different api.weather.gov compatible host.
    pub fn with_api_url(api_url: &str) -> Result<Self, UpstreamError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/geo+json"));
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(UpstreamError::ClientBuild)?;
        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_text(&self, url: &str) -> Result<String, UpstreamError> {
        info!("Fetching {}", url);
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| UpstreamError::NetworkRequest(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    UpstreamError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    UpstreamError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        response
            .text()
            .await
            .map_err(|e| UpstreamError::NetworkRequest(url.to_string(), e))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, UpstreamError> {
        let body = self.get_text(url).await?;
        serde_json::from_str(&body).map_err(|source| UpstreamError::JsonParse {
            url: url.to_string(),
            source,
        })
    }

    /// Resolves the forecast grid cell covering a coordinate.
    pub async fn points(&self, latitude: f64, longitude: f64) -> Result<GridPoint, UpstreamError> {
        let url = format!("{}/points/{:.4},{:.4}", self.api_url, latitude, longitude);
        let response: PointsResponse = self.get_json(&url).await?;
        Ok(response.properties)
    }

    /// Fetches the raw gridpoint forecast layers for a grid cell.
    pub async fn gridpoint(&self, grid: &GridPoint) -> Result<Vec<RawFieldSeries>, UpstreamError> {
        let url = format!(
            "{}/gridpoints/{}/{},{}",
            self.api_url, grid.grid_id, grid.grid_x, grid.grid_y
        );
        let response: GridpointResponse = self.get_json(&url).await?;
        Ok(response.properties.into_series())
    }

    pub async fn stations(&self, stations_url: &str) -> Result<StationCollection, UpstreamError> {
        self.get_json(stations_url).await
    }

    /// Latest observation of a station, given the station's resource URL.
    pub async fn latest_observation(
        &self,
        station_url: &str,
    ) -> Result<ObservationProperties, UpstreamError> {
        let url = format!("{}/observations/latest", station_url.trim_end_matches('/'));
        let response: ObservationResponse = self.get_json(&url).await?;
        Ok(response.properties)
    }

    /// Watches, warnings and advisories currently in effect at a coordinate.
    pub async fn active_alerts(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<AlertCollection, UpstreamError> {
        let url = format!(
            "{}/alerts/active?point={:.4},{:.4}",
            self.api_url, latitude, longitude
        );
        self.get_json(&url).await
    }

    /// Raw WMS GetCapabilities XML of the radar layer.
    pub async fn radar_capabilities(&self) -> Result<String, UpstreamError> {
        let url = format!("{RADAR_WMS_URL}?service=wms&version=1.3.0&request=GetCapabilities");
        self.get_text(&url).await
    }

    /// Available frame times per product, as RealEarth reports them (`YYYYMMDD.HHMMSS`).
    pub async fn satellite_times(
        &self,
        product: &str,
    ) -> Result<HashMap<String, Vec<String>>, UpstreamError> {
        let url = format!("{SATELLITE_TIMES_URL}?products={product}");
        self.get_json(&url).await
    }
}
