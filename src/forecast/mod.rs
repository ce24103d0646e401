pub mod conversions;
pub mod duration;
pub mod hourly_forecast;
pub mod resampler;
