use indicatif::{MultiProgress, ParallelProgressIterator, ProgressBar, ProgressStyle};
use maud::html;
use rayon::prelude::*;

use super::{
    layer::{OverlayLayer, TileProvider},
    primitives::{CircleMarker, LatLng, MapPrimitive, PathStyle, Polyline},
    view::{legend_control, title_control, LayerControl, MapView, ViewConfig},
};
use crate::{
    feed::{earthquake::EarthquakeEvent, fault_line::FaultLine},
    style::magnitude::{resolve_color, resolve_radius},
};

pub const EARTHQUAKE_LAYER_NAME: &str = "Earthquakes";
pub const FAULT_LINE_LAYER_NAME: &str = "Fault Lines";

fn earthquake_popup(event: &EarthquakeEvent) -> String {
    html! {
        h3 { (event.place) }
        hr;
        "Magnitude: " (event.magnitude)
        br;
        (event.formatted_time())
    }
    .into_string()
}

/// Popup of a fault line. The first coordinate is shown as (lat,lon), swapped from the feed's
/// lon,lat order.
fn fault_line_popup(fault_line: &FaultLine) -> String {
    let coordinates = match fault_line.path.0.first() {
        Some(coord) => format!("({},{})", coord.y, coord.x),
        None => "()".to_string(),
    };
    html! {
        h3 { "Name: " (fault_line.name) }
        hr;
        "Coordinates: " (coordinates)
    }
    .into_string()
}

pub fn earthquake_marker(event: &EarthquakeEvent) -> CircleMarker {
    CircleMarker {
        center: event.location.into(),
        radius: resolve_radius(event.magnitude),
        style: PathStyle {
            stroke: true,
            color: "black",
            weight: 0.5,
            fill_color: Some(resolve_color(event.magnitude).color),
            fill_opacity: Some(0.85),
        },
        popup: earthquake_popup(event),
    }
}

pub fn fault_line_polyline(fault_line: &FaultLine) -> Polyline {
    Polyline {
        path: fault_line.path.coords().map(|coord| LatLng::from(*coord)).collect(),
        style: PathStyle {
            stroke: true,
            color: "blue",
            weight: 3.0,
            fill_color: None,
            fill_opacity: None,
        },
        popup: fault_line_popup(fault_line),
    }
}

/// Progress bar for one overlay, registered with `progress` so concurrently built overlays each
/// draw on their own line.
pub fn layer_progress_bar(progress: &MultiProgress, layer_name: &str, len: usize) -> ProgressBar {
    let style = ProgressStyle::with_template("{prefix:>12} {wide_bar} {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress.add(
        ProgressBar::new(len as u64)
            .with_style(style)
            .with_prefix(layer_name.to_string()),
    )
}

/// One circle marker per event, in feed order.
pub fn compose_earthquake_layer(
    events: &[EarthquakeEvent],
    progress: &MultiProgress,
) -> OverlayLayer {
    log::info!("Styling {} earthquake markers", events.len());
    let bar = layer_progress_bar(progress, EARTHQUAKE_LAYER_NAME, events.len());
    let primitives = events
        .par_iter()
        .progress_with(bar)
        .map(|event| MapPrimitive::CircleMarker(earthquake_marker(event)))
        .collect();
    OverlayLayer {
        name: EARTHQUAKE_LAYER_NAME.to_string(),
        primitives,
        visible: true,
    }
}

/// One polyline per fault, in feed order.
pub fn compose_fault_line_layer(
    fault_lines: &[FaultLine],
    progress: &MultiProgress,
) -> OverlayLayer {
    log::info!("Tracing {} fault lines", fault_lines.len());
    let bar = layer_progress_bar(progress, FAULT_LINE_LAYER_NAME, fault_lines.len());
    let primitives = fault_lines
        .par_iter()
        .progress_with(bar)
        .map(|fault_line| MapPrimitive::Polyline(fault_line_polyline(fault_line)))
        .collect();
    OverlayLayer {
        name: FAULT_LINE_LAYER_NAME.to_string(),
        primitives,
        visible: true,
    }
}

/// Assemble the map: the street background is shown first, every given overlay starts visible.
pub fn compose_view(
    view_config: &ViewConfig,
    tile_provider: &TileProvider,
    earthquakes: OverlayLayer,
    fault_lines: Option<OverlayLayer>,
) -> MapView {
    let mut base_layers = tile_provider.base_layers();
    if let Some(street) = base_layers.first_mut() {
        street.visible = true;
    }
    let overlays: Vec<OverlayLayer> = std::iter::once(earthquakes).chain(fault_lines).collect();
    for overlay in &overlays {
        log::info!("Overlay '{}' holds {} primitives", overlay.name, overlay.len());
    }
    MapView {
        page_title: view_config.title.clone(),
        container_id: view_config.container_id.clone(),
        center: LatLng {
            lat: view_config.center[0],
            lng: view_config.center[1],
        },
        zoom: view_config.zoom,
        base_layers,
        overlays,
        layer_control: LayerControl { collapsed: false },
        legend: legend_control(),
        title: title_control(view_config),
    }
}
