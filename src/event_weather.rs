//! The main entry point: an [`EventWeather`] client bound to one event's venue and
//! schedule, fetching and caching the upstream data the dashboard shows.

use crate::alerts::ActiveAlerts;
use crate::cache::disk_cache::DiskCache;
use crate::cache::memory_cache::MemoryCache;
use crate::chart::chart_spec::ChartSize;
use crate::chart::timeline::{build_timeline, Timeline};
use crate::config::EventConfig;
use crate::error::EventWeatherError;
use crate::forecast::hourly_forecast::HourlyForecast;
use crate::forecast::resampler::AnchorPolicy;
use crate::imagery::radar::{parse_time_dimension, RadarFrames};
use crate::imagery::satellite::{SatelliteChannel, SatelliteFrames};
use crate::observations::current_conditions::CurrentConditions;
use crate::observations::nearest_station::nearest_station;
use crate::types::raw_series::RawFieldSeries;
use crate::upstream::client::{NwsClient, NWS_API_URL, RADAR_WMS_URL};
use crate::upstream::error::UpstreamError;
use crate::upstream::models::GridPoint;
use crate::utils::{ensure_cache_dir_exists, get_cache_dir};
use bon::bon;
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::path::PathBuf;
use std::time::Duration;

pub const POINTS_TTL: Duration = Duration::from_secs(3600);
pub const FORECAST_TTL: Duration = Duration::from_secs(3600);
pub const CONDITIONS_TTL: Duration = Duration::from_secs(300);
pub const RADAR_TTL: Duration = Duration::from_secs(120);
pub const SATELLITE_TTL: Duration = Duration::from_secs(300);
pub const ALERTS_TTL: Duration = Duration::from_secs(60);

const CONDITIONS_KEY: &str = "weather_current";
const RADAR_KEY: &str = "radar_times";

/// Weather client for a single configured event.
///
/// Grid metadata and raw gridpoint forecasts are cached on disk; observations
/// and imagery frame lists are cached in memory. Every cache entry expires after
/// a fixed time-to-live.
///
/// # Examples
///
/// ```no_run
/// # use event_weather::{EventConfig, EventWeather, EventWeatherError};
/// # use std::path::Path;
/// # async fn run() -> Result<(), EventWeatherError> {
/// let config = EventConfig::load(Path::new("event.config.json"))?;
/// let client = EventWeather::new(config).await?;
/// let forecast = client.hourly_forecast().call().await;
/// println!("{} hours from {:?}", forecast.hours.len(), forecast.source);
/// # Ok(())
/// # }
/// ```
pub struct EventWeather {
    config: EventConfig,
    client: NwsClient,
    disk_cache: DiskCache,
    grid_cache: MemoryCache<GridPoint>,
    conditions_cache: MemoryCache<CurrentConditions>,
    radar_cache: MemoryCache<RadarFrames>,
    satellite_cache: MemoryCache<SatelliteFrames>,
    alerts_cache: MemoryCache<ActiveAlerts>,
}

#[bon]
impl EventWeather {
    /// Creates a client caching under `cache_folder`, which is created if missing.
    pub async fn with_cache_folder(
        config: EventConfig,
        cache_folder: PathBuf,
    ) -> Result<Self, EventWeatherError> {
        Self::with_api_url(config, cache_folder, NWS_API_URL).await
    }

    /// Like [`EventWeather::with_cache_folder`], against another api.weather.gov
    /// compatible host.
    pub async fn with_api_url(
        config: EventConfig,
        cache_folder: PathBuf,
        api_url: &str,
    ) -> Result<Self, EventWeatherError> {
        config.validate()?;
        ensure_cache_dir_exists(&cache_folder)
            .await
            .map_err(|e| EventWeatherError::CacheDirCreation(cache_folder.clone(), e))?;
        Ok(Self {
            config,
            client: NwsClient::with_api_url(api_url)?,
            disk_cache: DiskCache::new(&cache_folder),
            grid_cache: MemoryCache::new(),
            conditions_cache: MemoryCache::new(),
            radar_cache: MemoryCache::new(),
            satellite_cache: MemoryCache::new(),
            alerts_cache: MemoryCache::new(),
        })
    }

    /// Creates a client using the default cache directory
    /// (e.g. `~/.cache/event_weather_cache` on Linux).
    pub async fn new(config: EventConfig) -> Result<Self, EventWeatherError> {
        let cache_folder = get_cache_dir().map_err(EventWeatherError::CacheDirResolution)?;
        Self::with_cache_folder(config, cache_folder).await
    }

    pub fn config(&self) -> &EventConfig {
        &self.config
    }

    /// The forecast grid cell covering the venue.
    pub async fn grid_point(&self) -> Result<GridPoint, EventWeatherError> {
        let key = format!(
            "points_{:.4}_{:.4}",
            self.config.latitude, self.config.longitude
        );
        if let Some(grid) = self.grid_cache.get(&key) {
            return Ok(grid);
        }
        match self.disk_cache.get::<GridPoint>(&key).await {
            Ok(Some(grid)) => {
                self.grid_cache.put(key, grid.clone(), POINTS_TTL);
                return Ok(grid);
            }
            Ok(None) => {}
            Err(e) => warn!("Ignoring unreadable grid point cache: {}", e),
        }

        let grid = self
            .client
            .points(self.config.latitude, self.config.longitude)
            .await?;
        info!(
            "Venue is in grid {} {},{}",
            grid.grid_id, grid.grid_x, grid.grid_y
        );
        if let Err(e) = self.disk_cache.put(&key, grid.clone(), POINTS_TTL).await {
            warn!("Failed to cache grid point: {}", e);
        }
        self.grid_cache.put(key, grid.clone(), POINTS_TTL);
        Ok(grid)
    }

    /// The raw gridpoint layers for `grid`, from the disk cache when fresh.
    pub async fn gridpoint_series(
        &self,
        grid: &GridPoint,
    ) -> Result<Vec<RawFieldSeries>, EventWeatherError> {
        let key = format!("gridpoint_{}_{}_{}", grid.grid_id, grid.grid_x, grid.grid_y);
        match self.disk_cache.get::<Vec<RawFieldSeries>>(&key).await {
            Ok(Some(series)) => return Ok(series),
            Ok(None) => {}
            Err(e) => warn!("Ignoring unreadable gridpoint cache: {}", e),
        }

        let series = self.client.gridpoint(grid).await?;
        if let Err(e) = self.disk_cache.put(&key, series.clone(), FORECAST_TTL).await {
            warn!("Failed to cache gridpoint forecast: {}", e);
        }
        Ok(series)
    }

    /// The next 24 hours of the gridpoint forecast at the venue.
    ///
    /// Never fails: when the upstream fetch fails the returned forecast carries the
    /// error message and no hours.
    ///
    /// * `.now(DateTime<Utc>)`: Optional. The instant to anchor on, defaults to the current time.
    /// * `.anchor(AnchorPolicy)`: Optional. Defaults to [`AnchorPolicy::NextHour`].
    #[builder]
    pub async fn hourly_forecast(
        &self,
        now: Option<DateTime<Utc>>,
        anchor: Option<AnchorPolicy>,
    ) -> HourlyForecast {
        let now = now.unwrap_or_else(Utc::now);
        let thresholds = self.config.adverse_conditions;

        let fetched = async {
            let grid = self.grid_point().await?;
            let series = self.gridpoint_series(&grid).await?;
            Ok::<_, EventWeatherError>((grid, series))
        }
        .await;

        match fetched {
            Ok((grid, series)) => HourlyForecast::from_series(
                &series,
                &grid,
                thresholds,
                now,
                anchor.unwrap_or_default(),
            ),
            Err(e) => {
                warn!("Gridpoint forecast unavailable: {}", e);
                HourlyForecast::failed(
                    format!("Unable to fetch gridpoint forecast: {e}"),
                    thresholds,
                    now,
                )
            }
        }
    }

    /// Latest observation from the station nearest to the venue.
    pub async fn current_conditions(&self) -> Result<CurrentConditions, EventWeatherError> {
        if let Some(conditions) = self.conditions_cache.get(CONDITIONS_KEY) {
            info!("Cache hit for current conditions");
            return Ok(conditions);
        }

        let grid = self.grid_point().await?;
        let stations = self.client.stations(&grid.observation_stations).await?;
        let station = nearest_station(&stations, self.config.latitude, self.config.longitude)
            .ok_or(UpstreamError::NoStations {
                latitude: self.config.latitude,
                longitude: self.config.longitude,
            })?;
        info!(
            "Using observation station {} ({:?} mi)",
            station.id, station.distance_miles
        );
        let observation = self.client.latest_observation(&station.url).await?;
        let conditions = CurrentConditions::from_observation(&observation, station, Utc::now());
        self.conditions_cache
            .put(CONDITIONS_KEY, conditions.clone(), CONDITIONS_TTL);
        Ok(conditions)
    }

    /// Radar frames of roughly the last half hour.
    pub async fn radar_frames(&self) -> Result<RadarFrames, EventWeatherError> {
        if let Some(frames) = self.radar_cache.get(RADAR_KEY) {
            return Ok(frames);
        }
        let xml = self.client.radar_capabilities().await?;
        let all = parse_time_dimension(&xml, RADAR_WMS_URL)?;
        let frames = RadarFrames::from_times(&all, Utc::now());
        info!(
            "Radar: {} of {} frames selected",
            frames.times.len(),
            frames.total_available
        );
        self.radar_cache.put(RADAR_KEY, frames.clone(), RADAR_TTL);
        Ok(frames)
    }

    /// Satellite frames of roughly the last half hour for one channel.
    ///
    /// * `.channel(SatelliteChannel)`: Optional. Defaults to [`SatelliteChannel::Visible`].
    #[builder]
    pub async fn satellite_frames(
        &self,
        channel: Option<SatelliteChannel>,
    ) -> Result<SatelliteFrames, EventWeatherError> {
        let channel = channel.unwrap_or_default();
        let key = format!("satellite_times_{}", channel.product());
        if let Some(frames) = self.satellite_cache.get(&key) {
            return Ok(frames);
        }
        let mut by_product = self.client.satellite_times(channel.product()).await?;
        let all = by_product.remove(channel.product()).unwrap_or_default();
        let frames = SatelliteFrames::from_times(channel, &all, Utc::now());
        self.satellite_cache.put(key, frames.clone(), SATELLITE_TTL);
        Ok(frames)
    }

    /// Watches, warnings and advisories in effect at the venue.
    ///
    /// Never fails: an upstream failure yields an empty list carrying an error
    /// message, and is not cached.
    pub async fn alerts(&self) -> ActiveAlerts {
        let key = format!(
            "alerts_{:.4}_{:.4}",
            self.config.latitude, self.config.longitude
        );
        if let Some(alerts) = self.alerts_cache.get(&key) {
            return alerts;
        }
        match self
            .client
            .active_alerts(self.config.latitude, self.config.longitude)
            .await
        {
            Ok(collection) => {
                let alerts = ActiveAlerts::from_collection(collection, Utc::now());
                info!("{} active alerts at the venue", alerts.count);
                self.alerts_cache.put(key, alerts.clone(), ALERTS_TTL);
                alerts
            }
            Err(e) => {
                warn!("Alerts unavailable: {}", e);
                ActiveAlerts::failed(Utc::now())
            }
        }
    }

    /// Fetches the hourly forecast and renders the three-row timeline.
    ///
    /// * `.size(ChartSize)`: Optional. Size of each chart row, defaults to 800x160.
    /// * `.now(DateTime<Utc>)`: Optional. Defaults to the current time.
    #[builder]
    pub async fn timeline(
        &self,
        size: Option<ChartSize>,
        now: Option<DateTime<Utc>>,
    ) -> Timeline {
        let forecast = self.hourly_forecast().maybe_now(now).call().await;
        build_timeline(&forecast, &self.config, size.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::forecast_field::ForecastField;
    use crate::types::raw_series::RawFieldValue;
    use crate::upstream::models::AlertCollection;
    use chrono::TimeZone;

    // Nothing listens on the discard port, so every upstream request fails fast.
    const DEAD_API: &str = "http://127.0.0.1:9";

    fn config() -> EventConfig {
        serde_json::from_str(
            r#"{
                "name": "Super Bowl LX",
                "location": "Levi's Stadium",
                "latitude": 37.403147,
                "longitude": -121.969814,
                "timezone": "America/Los_Angeles",
                "startDate": "2026-02-08T15:30:00-08:00",
                "endDate": "2026-02-08T22:00:00-08:00"
            }"#,
        )
        .expect("valid config")
    }

    fn grid() -> GridPoint {
        GridPoint {
            grid_id: "MTR".to_string(),
            grid_x: 97,
            grid_y: 87,
            forecast: None,
            forecast_hourly: None,
            observation_stations: format!("{DEAD_API}/gridpoints/MTR/97,87/stations"),
        }
    }

    async fn seed(cache_folder: &std::path::Path) {
        let disk = DiskCache::new(cache_folder);
        disk.put("points_37.4031_-121.9698", grid(), POINTS_TTL)
            .await
            .expect("seed points");
        let temperature = RawFieldValue::from_valid_time("2026-02-08T16:00:00+00:00/PT6H", Some(20.0))
            .expect("valid time");
        let rain = RawFieldValue::from_valid_time("2026-02-08T16:00:00+00:00/P1D", Some(30.0))
            .expect("valid time");
        let series = vec![
            RawFieldSeries::new(ForecastField::Temperature, vec![temperature]),
            RawFieldSeries::new(ForecastField::ProbabilityOfPrecipitation, vec![rain]),
        ];
        disk.put("gridpoint_MTR_97_87", series, FORECAST_TTL)
            .await
            .expect("seed gridpoint");
    }

    #[tokio::test]
    async fn test_hourly_forecast_from_cache() {
        let dir = tempfile::tempdir().expect("tempdir");
        seed(dir.path()).await;
        let client = EventWeather::with_api_url(config(), dir.path().to_path_buf(), DEAD_API)
            .await
            .expect("client");

        let now = Utc.with_ymd_and_hms(2026, 2, 8, 15, 45, 0).unwrap();
        let forecast = client.hourly_forecast().now(now).call().await;
        assert!(forecast.is_ok(), "{:?}", forecast.error);
        assert_eq!(
            forecast.source.as_deref(),
            Some("NWS Gridpoint Forecast (MTR 97,87)")
        );
        assert_eq!(forecast.hours.len(), 24);
        assert_eq!(forecast.hours[0].time, Utc.with_ymd_and_hms(2026, 2, 8, 16, 0, 0).unwrap());
        assert_eq!(forecast.hours[5].temperature, Some(68.0));
        assert_eq!(forecast.hours[6].temperature, None);
        assert!(forecast
            .hours
            .iter()
            .all(|h| h.probability_of_precipitation == Some(30.0)));

        let timeline = client
            .timeline()
            .now(now)
            .size(ChartSize::new(400.0, 120.0))
            .call()
            .await;
        assert!(matches!(&timeline, Timeline::Rows(rows) if rows.len() == 3));
    }

    #[tokio::test]
    async fn test_hourly_forecast_failure_is_a_descriptor() {
        let dir = tempfile::tempdir().expect("tempdir");
        let client = EventWeather::with_api_url(config(), dir.path().to_path_buf(), DEAD_API)
            .await
            .expect("client");
        let forecast = client.hourly_forecast().call().await;
        assert!(!forecast.is_ok());
        assert!(forecast.hours.is_empty());
        let error = forecast.error.as_deref().expect("error message");
        assert!(error.starts_with("Unable to fetch gridpoint forecast: "));

        let timeline = client.timeline().call().await;
        let html = timeline.to_html();
        assert!(html.contains("error-msg"));
        assert!(html.contains("Unable to fetch gridpoint forecast: "));
    }

    #[tokio::test]
    async fn test_alerts_failure_is_a_descriptor() {
        let dir = tempfile::tempdir().expect("tempdir");
        let client = EventWeather::with_api_url(config(), dir.path().to_path_buf(), DEAD_API)
            .await
            .expect("client");
        let alerts = client.alerts().await;
        assert!(!alerts.is_ok());
        assert_eq!(alerts.count, 0);
        assert!(alerts.alerts.is_empty());
        assert_eq!(alerts.error.as_deref(), Some("Unable to fetch alert data"));
    }

    #[tokio::test]
    async fn test_alerts_served_from_memory_within_ttl() {
        let dir = tempfile::tempdir().expect("tempdir");
        let client = EventWeather::with_api_url(config(), dir.path().to_path_buf(), DEAD_API)
            .await
            .expect("client");
        let collection: AlertCollection = serde_json::from_str(
            r#"{"features": [{"id": "urn:1", "properties": {"event": "Wind Advisory"}}]}"#,
        )
        .expect("valid json");
        let cached = ActiveAlerts::from_collection(collection, Utc::now());
        client
            .alerts_cache
            .put("alerts_37.4031_-121.9698", cached.clone(), ALERTS_TTL);

        assert_eq!(client.alerts().await, cached);
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut config = config();
        config.longitude = 200.0;
        let result = EventWeather::with_api_url(config, dir.path().to_path_buf(), DEAD_API).await;
        assert!(matches!(result, Err(EventWeatherError::Config(_))));
    }
}
