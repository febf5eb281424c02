use maud::{html, PreEscaped};
use serde::{Deserialize, Serialize};

use super::{
    layer::{BaseLayer, OverlayLayer},
    primitives::LatLng,
};
use crate::style::magnitude::MAGNITUDE_BUCKETS;

fn default_container_id() -> String {
    "map".to_string()
}

fn default_center() -> [f64; 2] {
    [37.09, -32.77]
}

fn default_zoom() -> u8 {
    3
}

fn default_title() -> String {
    "Live Earthquakes Map".to_string()
}

fn default_data_source_name() -> String {
    "USGS".to_string()
}

fn default_data_source_url() -> String {
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/geojson.php".to_string()
}

/// Fixed presentation settings of the map page.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ViewConfig {
    /// Id of the DOM element the map is mounted into.
    #[serde(default = "default_container_id")]
    pub container_id: String,
    /// Initial center as `[lat, lon]`.
    #[serde(default = "default_center")]
    pub center: [f64; 2],
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_data_source_name")]
    pub data_source_name: String,
    #[serde(default = "default_data_source_url")]
    pub data_source_url: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            container_id: default_container_id(),
            center: default_center(),
            zoom: default_zoom(),
            title: default_title(),
            data_source_name: default_data_source_name(),
            data_source_url: default_data_source_url(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlPosition {
    BottomLeft,
    BottomRight,
}

/// Static, non-interactive box pinned to a corner of the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HtmlControl {
    pub position: ControlPosition,
    /// CSS class of the container element.
    pub class_name: &'static str,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerControl {
    pub collapsed: bool,
}

/// Composed map: backgrounds, overlays and decorations, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    /// Document title of the rendered page.
    pub page_title: String,
    pub container_id: String,
    pub center: LatLng,
    pub zoom: u8,
    /// Exactly one of these is visible.
    pub base_layers: Vec<BaseLayer>,
    pub overlays: Vec<OverlayLayer>,
    pub layer_control: LayerControl,
    pub legend: HtmlControl,
    pub title: HtmlControl,
}

impl MapView {
    pub fn visible_base_layer(&self) -> Option<&BaseLayer> {
        self.base_layers.iter().find(|layer| layer.visible)
    }

    pub fn overlay(&self, name: &str) -> Option<&OverlayLayer> {
        self.overlays.iter().find(|overlay| overlay.name == name)
    }
}

/// Legend box listing every magnitude bucket with its color swatch.
pub fn legend_control() -> HtmlControl {
    let markup = html! {
        "Magnitude"
        hr;
        @for bucket in &MAGNITUDE_BUCKETS {
            table {
                tr {
                    td style={ "background-color: " (bucket.color) ";" } { (PreEscaped("&nbsp;")) }
                    td { (bucket.label) }
                }
            }
        }
    };
    HtmlControl {
        position: ControlPosition::BottomRight,
        class_name: "info-legend",
        html: markup.into_string(),
    }
}

pub fn title_control(config: &ViewConfig) -> HtmlControl {
    let markup = html! {
        h1 { (config.title) }
        "Data source: "
        a href=(config.data_source_url) target="new_" { (config.data_source_name) }
    };
    HtmlControl {
        position: ControlPosition::BottomLeft,
        class_name: "map-title",
        html: markup.into_string(),
    }
}
