pub mod compass;
pub mod forecast_field;
pub mod hourly_point;
pub mod raw_series;
