use super::geometry::line_from_geometry;

/// One plate boundary segment from the fault line feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FaultLine {
    pub name: String,
    /// Trace as lon/lat, never empty.
    pub path: geo::LineString,
}

pub fn fault_line_from_feature(feature: &geojson::Feature) -> anyhow::Result<FaultLine> {
    let path = line_from_geometry(feature.geometry.as_ref())?;
    let name = feature
        .property("Name")
        .and_then(|name| name.as_str())
        .unwrap_or_default()
        .to_string();
    Ok(FaultLine { name, path })
}

pub fn read_fault_lines(collection: &geojson::FeatureCollection) -> Vec<FaultLine> {
    let num_features = collection.features.len();
    let fault_lines: Vec<FaultLine> = collection
        .features
        .iter()
        .filter_map(|feature| match fault_line_from_feature(feature) {
            Ok(fault_line) => Some(fault_line),
            Err(err) => {
                log::debug!("Skipping fault line feature: {}", err);
                None
            }
        })
        .collect();
    if fault_lines.len() != num_features {
        log::warn!(
            "Out of {} fault line features read, only {} were LineStrings.",
            num_features,
            fault_lines.len()
        )
    }
    fault_lines
}
