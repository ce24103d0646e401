pub mod frames;
pub mod radar;
pub mod satellite;
