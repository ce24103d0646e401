//! Fetches the live gridpoint forecast for an event and writes the timeline to an
//! HTML file.
//!
//! ```text
//! cargo run --example render_timeline -- event.config.json timeline.html
//! ```

use event_weather::{ChartSize, EventConfig, EventWeather, EventWeatherError};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<(), EventWeatherError> {
    let mut args = std::env::args().skip(1);
    let config_path = PathBuf::from(args.next().unwrap_or_else(|| "event.config.json".into()));
    let output_path = PathBuf::from(args.next().unwrap_or_else(|| "timeline.html".into()));

    let config = EventConfig::load(&config_path)?;
    println!(
        "{} at {} ({}, {})",
        config.name, config.location, config.latitude, config.longitude
    );

    let client = EventWeather::new(config).await?;
    let forecast = client.hourly_forecast().call().await;
    match &forecast.error {
        Some(error) => println!("Forecast unavailable: {error}"),
        None => println!(
            "{} hours from {}",
            forecast.hours.len(),
            forecast.source.as_deref().unwrap_or("unknown source")
        ),
    }

    let timeline = client
        .timeline()
        .size(ChartSize::new(960.0, 180.0))
        .call()
        .await;
    let html = format!(
        "<!DOCTYPE html>\n<html><body style=\"background:#1a237e;color:#e8eaf6\">\n{}\n</body></html>\n",
        timeline.to_html()
    );
    if let Err(e) = std::fs::write(&output_path, html) {
        eprintln!("Failed to write {}: {e}", output_path.display());
        return Ok(());
    }
    println!("Wrote {}", output_path.display());

    match client.current_conditions().await {
        Ok(now) => println!(
            "Now at {}: {:?} F, wind {:?} mph {}",
            now.station.id,
            now.temperature,
            now.wind_speed,
            now.wind_cardinal.map(|c| c.to_string()).unwrap_or_default()
        ),
        Err(e) => println!("Current conditions unavailable: {e}"),
    }
    Ok(())
}
