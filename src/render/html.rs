//! Standalone HTML page for a composed [`MapView`].
//!
//! The page pulls Leaflet from a CDN, embeds the view as JSON and instantiates it with a fixed
//! bootstrap script. Everything map specific lives in the embedded JSON.

use anyhow::Context;
use maud::{html, PreEscaped, DOCTYPE};
use std::{fs, path::Path};

use crate::map::view::MapView;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const VIEW_ELEMENT_ID: &str = "map-view";
/// Stands in for [`VIEW_ELEMENT_ID`] in [`BOOTSTRAP_SCRIPT`].
const VIEW_ELEMENT_ID_PLACEHOLDER: &str = "__VIEW_ELEMENT_ID__";

const PAGE_STYLE: &str = r#"
    html, body { height: 100%; margin: 0; padding: 0; }
    .map-container { height: 100%; width: 100%; }
    .info-legend, .map-title {
      background: rgba(255, 255, 255, 0.85);
      border-radius: 5px;
      box-shadow: 0 0 15px rgba(0, 0, 0, 0.2);
      font: 14px/16px Arial, Helvetica, sans-serif;
      padding: 6px 8px;
    }
    .info-legend table { border-collapse: collapse; }
    .info-legend td:first-child { width: 18px; }
    .map-title h1 { font-size: 20px; margin: 0 0 4px 0; }
"#;

const BOOTSTRAP_SCRIPT: &str = r#"
    (function () {
      var view = JSON.parse(document.getElementById("__VIEW_ELEMENT_ID__").textContent);
      var baseMaps = {};
      var overlayMaps = {};
      var initialLayers = [];
      view.base_layers.forEach(function (base) {
        var layer = L.tileLayer(base.url);
        baseMaps[base.name] = layer;
        if (base.visible) { initialLayers.push(layer); }
      });
      view.overlays.forEach(function (overlay) {
        var group = L.layerGroup();
        overlay.primitives.forEach(function (primitive) {
          var layer;
          if (primitive.kind === "CircleMarker") {
            layer = L.circleMarker(primitive.center,
              Object.assign({ radius: primitive.radius }, primitive.style));
          } else {
            layer = L.polyline(primitive.path, primitive.style);
          }
          layer.bindPopup(primitive.popup).addTo(group);
        });
        overlayMaps[overlay.name] = group;
        if (overlay.visible) { initialLayers.push(group); }
      });
      var map = L.map(view.container_id, {
        center: view.center,
        zoom: view.zoom,
        layers: initialLayers
      });
      L.control.layers(baseMaps, overlayMaps, { collapsed: view.layer_control.collapsed })
        .addTo(map);
      [view.legend, view.title].forEach(function (control) {
        var box = L.control({ position: control.position });
        box.onAdd = function () {
          var div = L.DomUtil.create("div", control.class_name);
          div.innerHTML = control.html;
          return div;
        };
        box.addTo(map);
      });
    })();
"#;

/// Serialize the view for a `<script type="application/json">` element. `</` only occurs inside
/// JSON strings, where `<\/` is an equivalent escape that cannot close the element.
fn view_to_embedded_json(view: &MapView) -> anyhow::Result<String> {
    let json = serde_json::to_string(view).context("Serializing map view")?;
    Ok(json.replace("</", "<\\/"))
}

fn bootstrap_script() -> String {
    BOOTSTRAP_SCRIPT.replace(VIEW_ELEMENT_ID_PLACEHOLDER, VIEW_ELEMENT_ID)
}

pub fn render_html(view: &MapView) -> anyhow::Result<String> {
    let view_json = view_to_embedded_json(view)?;
    let page = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (view.page_title) }
                link rel="stylesheet" href=(LEAFLET_CSS);
                script src=(LEAFLET_JS) {}
                style { (PreEscaped(PAGE_STYLE)) }
            }
            body {
                div id=(view.container_id) class="map-container" {}
                script id=(VIEW_ELEMENT_ID) type="application/json" { (PreEscaped(view_json)) }
                script { (PreEscaped(bootstrap_script())) }
            }
        }
    };
    Ok(page.into_string())
}

pub fn write_html(view: &MapView, output_filepath: &Path) -> anyhow::Result<()> {
    let page = render_html(view)?;
    if let Some(parent) = output_filepath.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    log::info!("Writing map page to {:?}", output_filepath);
    fs::write(output_filepath, page)
        .with_context(|| format!("Could not write map page to {:?}", output_filepath))
}
