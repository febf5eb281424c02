use serde::{Deserialize, Serialize};

use super::primitives::MapPrimitive;

pub const STREET_LAYER_NAME: &str = "Street";
pub const OUTDOOR_LAYER_NAME: &str = "Outdoor";
pub const SATELLITE_LAYER_NAME: &str = "Satellite";

/// Style identifiers of the tile provider, one per base layer.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct TileStyles {
    pub street: String,
    pub outdoor: String,
    pub satellite: String,
}

impl Default for TileStyles {
    fn default() -> Self {
        Self {
            street: "streets-v9".to_string(),
            outdoor: "outdoors-v9".to_string(),
            satellite: "satellite-streets-v9".to_string(),
        }
    }
}

fn default_url_template() -> String {
    "https://api.mapbox.com/styles/v1/mapbox/{style}/tiles/256/{z}/{x}/{y}?access_token={access_token}"
        .to_string()
}

/// External tile service backing the base layers. `{style}` and the percent-encoded
/// `{access_token}` are substituted here, `{z}/{x}/{y}` are left for the map engine.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct TileProvider {
    #[serde(default = "default_url_template")]
    pub url_template: String,
    pub access_token: String,
    #[serde(default)]
    pub styles: TileStyles,
}

impl TileProvider {
    pub fn tile_url(&self, style: &str) -> String {
        self.url_template
            .replace("{style}", style)
            .replace("{access_token}", &urlencoding::encode(&self.access_token))
    }

    /// The mutually exclusive backgrounds, street first.
    pub fn base_layers(&self) -> Vec<BaseLayer> {
        [
            (STREET_LAYER_NAME, &self.styles.street),
            (OUTDOOR_LAYER_NAME, &self.styles.outdoor),
            (SATELLITE_LAYER_NAME, &self.styles.satellite),
        ]
        .into_iter()
        .map(|(name, style)| BaseLayer {
            name: name.to_string(),
            url: self.tile_url(style),
            visible: false,
        })
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaseLayer {
    pub name: String,
    /// Tile URL template with `{z}`, `{x}` and `{y}` placeholders.
    pub url: String,
    pub visible: bool,
}

/// Named group of primitives toggled on and off as one unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayLayer {
    pub name: String,
    pub primitives: Vec<MapPrimitive>,
    pub visible: bool,
}

impl OverlayLayer {
    /// A visible layer without primitives.
    pub fn empty(name: &str) -> Self {
        Self {
            name: name.to_string(),
            primitives: Vec::new(),
            visible: true,
        }
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}
