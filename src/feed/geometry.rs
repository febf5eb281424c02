use anyhow::anyhow;
use geojson::{Geometry, Position, Value};

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn position_to_coord(position: &Position) -> anyhow::Result<geo::Coord> {
    match position.as_slice() {
        [lon, lat, ..] => Ok(geo::Coord { x: *lon, y: *lat }),
        _ => Err(anyhow!(
            "Position needs at least two values, found {}",
            position.len()
        )),
    }
}

/// Read a GeoJSON point geometry as a lon/lat point. Extra values such as depth are ignored.
pub fn point_from_geometry(geometry: Option<&Geometry>) -> anyhow::Result<geo::Point> {
    match geometry.map(|geometry| &geometry.value) {
        Some(Value::Point(position)) => Ok(position_to_coord(position)?.into()),
        Some(other) => Err(anyhow!("Expected a Point, found {}", value_type_name(other))),
        None => Err(anyhow!("Feature has no geometry")),
    }
}

/// Read a GeoJSON line geometry as a lon/lat line string with at least one coordinate.
pub fn line_from_geometry(geometry: Option<&Geometry>) -> anyhow::Result<geo::LineString> {
    match geometry.map(|geometry| &geometry.value) {
        Some(Value::LineString(positions)) => {
            if positions.is_empty() {
                return Err(anyhow!("LineString has no coordinates"));
            }
            positions
                .iter()
                .map(position_to_coord)
                .collect::<anyhow::Result<Vec<geo::Coord>>>()
                .map(geo::LineString::new)
        }
        Some(other) => Err(anyhow!("Expected a LineString, found {}", value_type_name(other))),
        None => Err(anyhow!("Feature has no geometry")),
    }
}
