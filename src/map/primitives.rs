use serde::{Serialize, Serializer};

/// Map position, serialized in Leaflet's `[lat, lng]` order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<geo::Coord> for LatLng {
    fn from(coord: geo::Coord) -> Self {
        Self {
            lat: coord.y,
            lng: coord.x,
        }
    }
}

impl From<geo::Point> for LatLng {
    fn from(point: geo::Point) -> Self {
        Self::from(point.0)
    }
}

impl Serialize for LatLng {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.lat, self.lng].serialize(serializer)
    }
}

/// Leaflet path options shared by markers and lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStyle {
    pub stroke: bool,
    pub color: &'static str,
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
}

/// Circle with a fixed pixel radius, independent of zoom.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircleMarker {
    pub center: LatLng,
    pub radius: f64,
    pub style: PathStyle,
    /// Popup body as HTML.
    pub popup: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    pub path: Vec<LatLng>,
    pub style: PathStyle,
    /// Popup body as HTML.
    pub popup: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum MapPrimitive {
    CircleMarker(CircleMarker),
    Polyline(Polyline),
}

impl MapPrimitive {
    pub fn popup(&self) -> &str {
        match self {
            MapPrimitive::CircleMarker(marker) => &marker.popup,
            MapPrimitive::Polyline(line) => &line.popup,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CircleMarker, LatLng, MapPrimitive, PathStyle};

    #[test]
    fn test_lat_lng_swaps_geo_order() {
        let lat_lng = LatLng::from(geo::Point::new(-116.8, 33.5));
        assert_eq!(lat_lng, LatLng { lat: 33.5, lng: -116.8 });
        assert_eq!(serde_json::to_string(&lat_lng).unwrap(), "[33.5,-116.8]");
    }

    #[test]
    fn test_primitive_serialization() {
        let primitive = MapPrimitive::CircleMarker(CircleMarker {
            center: LatLng { lat: 1.0, lng: 2.0 },
            radius: 12.5,
            style: PathStyle {
                stroke: true,
                color: "black",
                weight: 0.5,
                fill_color: Some("#FFCC00"),
                fill_opacity: Some(0.85),
            },
            popup: "<h3>here</h3>".to_string(),
        });
        let value = serde_json::to_value(&primitive).unwrap();
        assert_eq!(value["kind"], "CircleMarker");
        assert_eq!(value["center"], serde_json::json!([1.0, 2.0]));
        assert_eq!(value["style"]["fillColor"], "#FFCC00");
        assert_eq!(value["style"]["fillOpacity"], 0.85);
        assert_eq!(primitive.popup(), "<h3>here</h3>");
    }

    #[test]
    fn test_nan_radius_serializes_as_null() {
        let marker = CircleMarker {
            center: LatLng { lat: 0.0, lng: 0.0 },
            radius: f64::NAN,
            style: PathStyle {
                stroke: true,
                color: "black",
                weight: 0.5,
                fill_color: None,
                fill_opacity: None,
            },
            popup: String::new(),
        };
        let value = serde_json::to_value(&marker).unwrap();
        assert!(value["radius"].is_null());
        assert!(value["style"].get("fillColor").is_none());
    }
}
