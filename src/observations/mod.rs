pub mod current_conditions;
pub mod nearest_station;
