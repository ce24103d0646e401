use crate::upstream::models::{StationCollection, StationFeature};
use haversine::{distance, Location as HaversineLocation, Units};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// An observation station chosen for the venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationStation {
    /// Short identifier, e.g. `"KSJC"`.
    pub id: String,
    /// Resource URL the latest observation is read from.
    pub url: String,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub distance_miles: Option<f64>,
}

impl ObservationStation {
    fn from_feature(feature: &StationFeature, distance_miles: Option<f64>) -> Self {
        let (longitude, latitude) = feature
            .geometry
            .as_ref()
            .and_then(|g| match g.coordinates.as_slice() {
                [lon, lat, ..] => Some((*lon, *lat)),
                _ => None,
            })
            .unzip();
        Self {
            id: feature.properties.station_identifier.clone(),
            url: feature.id.clone(),
            name: feature.properties.name.clone(),
            latitude,
            longitude,
            distance_miles,
        }
    }
}

fn distance_miles(latitude: f64, longitude: f64, feature: &StationFeature) -> Option<f64> {
    let coordinates = feature.geometry.as_ref()?.coordinates.as_slice();
    let [lon, lat, ..] = coordinates else {
        return None;
    };
    let miles = distance(
        HaversineLocation {
            latitude,
            longitude,
        },
        HaversineLocation {
            latitude: *lat,
            longitude: *lon,
        },
        Units::Miles,
    );
    miles.is_finite().then_some(miles)
}

/// Picks the station closest to the venue by great-circle distance.
///
/// Stations without coordinates are only used when none has any, in which case
/// the first listed station is returned, matching the upstream ordering.
pub fn nearest_station(
    stations: &StationCollection,
    latitude: f64,
    longitude: f64,
) -> Option<ObservationStation> {
    let closest = stations
        .features
        .iter()
        .filter_map(|f| distance_miles(latitude, longitude, f).map(|d| (OrderedFloat(d), f)))
        .min_by_key(|(d, _)| *d);

    match closest {
        Some((d, feature)) => Some(ObservationStation::from_feature(feature, Some(d.into_inner()))),
        None => stations
            .features
            .first()
            .map(|f| ObservationStation::from_feature(f, None)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(json: &str) -> StationCollection {
        serde_json::from_str(json).expect("valid json")
    }

    #[test]
    fn test_picks_closest_not_first() {
        let stations = collection(
            r#"{"features": [
                {"id": "https://api.weather.gov/stations/KSFO",
                 "geometry": {"type": "Point", "coordinates": [-122.366, 37.619]},
                 "properties": {"stationIdentifier": "KSFO", "name": "San Francisco Intl"}},
                {"id": "https://api.weather.gov/stations/KSJC",
                 "geometry": {"type": "Point", "coordinates": [-121.927, 37.359]},
                 "properties": {"stationIdentifier": "KSJC", "name": "San Jose Intl"}}
            ]}"#,
        );
        let station = nearest_station(&stations, 37.403147, -121.969814).expect("a station");
        assert_eq!(station.id, "KSJC");
        assert_eq!(station.latitude, Some(37.359));
        let miles = station.distance_miles.expect("distance");
        assert!(miles > 2.0 && miles < 5.0, "got {miles}");
    }

    #[test]
    fn test_falls_back_to_first_without_geometry() {
        let stations = collection(
            r#"{"features": [
                {"id": "https://api.weather.gov/stations/KNUQ", "geometry": null,
                 "properties": {"stationIdentifier": "KNUQ"}}
            ]}"#,
        );
        let station = nearest_station(&stations, 37.4, -121.97).expect("a station");
        assert_eq!(station.id, "KNUQ");
        assert_eq!(station.distance_miles, None);
        assert!(nearest_station(&collection(r#"{"features": []}"#), 0.0, 0.0).is_none());
    }
}
