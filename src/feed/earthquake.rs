use chrono::{DateTime, TimeZone, Utc};

use super::geometry::point_from_geometry;

/// One earthquake from the event feed.
#[derive(Debug, Clone, PartialEq)]
pub struct EarthquakeEvent {
    /// Epicenter as lon/lat.
    pub location: geo::Point,
    pub place: String,
    /// NaN when the feed has no numeric magnitude for the event.
    pub magnitude: f64,
    pub time: Option<DateTime<Utc>>,
}

impl EarthquakeEvent {
    /// Event time as shown in popups.
    pub fn formatted_time(&self) -> String {
        match self.time {
            Some(time) => time.format("%a %b %d %Y %H:%M:%S UTC").to_string(),
            None => "Invalid Date".to_string(),
        }
    }
}

fn epoch_millis_to_time(value: &serde_json::Value) -> Option<DateTime<Utc>> {
    let millis = value
        .as_i64()
        .or_else(|| value.as_f64().map(|millis| millis as i64))?;
    Utc.timestamp_millis_opt(millis).single()
}

/// Magnitude as a number. Numeric strings such as `"3.1"` are accepted as well.
fn magnitude_value(value: &serde_json::Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|mag| mag.trim().parse().ok()))
}

pub fn earthquake_from_feature(feature: &geojson::Feature) -> anyhow::Result<EarthquakeEvent> {
    let location = point_from_geometry(feature.geometry.as_ref())?;
    let place = feature
        .property("place")
        .and_then(|place| place.as_str())
        .unwrap_or_default()
        .to_string();
    let magnitude = match feature.property("mag").and_then(magnitude_value) {
        Some(magnitude) => magnitude,
        None => {
            log::warn!("Earthquake at '{}' has no numeric magnitude", place);
            f64::NAN
        }
    };
    let time = feature.property("time").and_then(epoch_millis_to_time);
    Ok(EarthquakeEvent {
        location,
        place,
        magnitude,
        time,
    })
}

/// Convert every feature with a usable point geometry. Features without one are skipped.
pub fn read_earthquakes(collection: &geojson::FeatureCollection) -> Vec<EarthquakeEvent> {
    let num_features = collection.features.len();
    let events: Vec<EarthquakeEvent> = collection
        .features
        .iter()
        .filter_map(|feature| match earthquake_from_feature(feature) {
            Ok(event) => Some(event),
            Err(err) => {
                log::debug!("Skipping earthquake feature: {}", err);
                None
            }
        })
        .collect();
    if events.len() != num_features {
        log::warn!(
            "Out of {} earthquake features read, only {} had a point geometry.",
            num_features,
            events.len()
        )
    }
    events
}
