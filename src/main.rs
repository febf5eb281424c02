extern crate log;
pub mod feed;
pub mod map;
pub mod render;
pub mod style;
use crate::feed::download::{load_feed, FeedSource, FetchOptions};
use crate::feed::earthquake::read_earthquakes;
use crate::feed::fault_line::read_fault_lines;
use crate::map::compose::{
    compose_earthquake_layer, compose_fault_line_layer, compose_view, EARTHQUAKE_LAYER_NAME,
    FAULT_LINE_LAYER_NAME,
};
use crate::map::layer::{OverlayLayer, TileProvider};
use crate::map::view::{MapView, ViewConfig};
use anyhow::{anyhow, Context};
use clap::Parser;
use indicatif::MultiProgress;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use std::{fs::read_to_string, path::Path};

/// Render a map of recent earthquakes and plate boundaries to an HTML page.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the input config file.
    #[arg(short, long)]
    config_filepath: String,

    /// Output HTML file, overrides the one in the config.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn default_earthquake_feed() -> FeedSource {
    FeedSource::Url {
        url: "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson"
            .to_string(),
    }
}

fn default_fault_line_feed() -> Option<FeedSource> {
    Some(FeedSource::File {
        filepath: PathBuf::from("data/PB2002_boundaries.json"),
    })
}

fn default_output_filepath() -> PathBuf {
    PathBuf::from("quake_map.html")
}

fn default_request_timeout_secs() -> u64 {
    30
}

#[derive(Deserialize, Debug)]
struct Config {
    #[serde(default = "default_earthquake_feed")]
    earthquakes: FeedSource,
    /// `null` renders the map without the fault line overlay.
    #[serde(default = "default_fault_line_feed")]
    fault_lines: Option<FeedSource>,
    tile_provider: TileProvider,
    #[serde(default)]
    view: ViewConfig,
    #[serde(default = "default_output_filepath")]
    output_filepath: PathBuf,
    #[serde(default)]
    data_dir: Option<PathBuf>,
    /// Fail on feed errors instead of rendering the affected overlay empty.
    #[serde(default)]
    strict: bool,
    #[serde(default = "default_request_timeout_secs")]
    request_timeout_secs: u64,
}

impl Config {
    fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            timeout: Duration::from_secs(self.request_timeout_secs),
            data_dir: self.data_dir.clone(),
        }
    }
}

fn load_config(config_filepath: &Path) -> anyhow::Result<Config> {
    if !config_filepath.exists() {
        return Err(anyhow!("Config file {:?} not found", config_filepath));
    }
    let config_contents = read_to_string(config_filepath)?;
    serde_yaml::from_str(&config_contents)
        .with_context(|| format!("Parsing config file {:?}", config_filepath))
}

/// The `--output` argument wins over the config's output file.
fn output_filepath(args: &Args, config: &Config) -> PathBuf {
    args.output
        .clone()
        .unwrap_or_else(|| config.output_filepath.clone())
}

fn load_earthquake_layer(
    source: &FeedSource,
    options: &FetchOptions,
    progress: &MultiProgress,
) -> anyhow::Result<OverlayLayer> {
    let collection = load_feed("earthquakes", source, options)?;
    let events = read_earthquakes(&collection);
    Ok(compose_earthquake_layer(&events, progress))
}

fn load_fault_line_layer(
    source: &FeedSource,
    options: &FetchOptions,
    progress: &MultiProgress,
) -> anyhow::Result<OverlayLayer> {
    let collection = load_feed("fault_lines", source, options)?;
    let fault_lines = read_fault_lines(&collection);
    Ok(compose_fault_line_layer(&fault_lines, progress))
}

/// Leave the overlay empty on failure unless running strict.
fn layer_or_empty(
    result: anyhow::Result<OverlayLayer>,
    name: &str,
    strict: bool,
) -> anyhow::Result<OverlayLayer> {
    match result {
        Ok(layer) => Ok(layer),
        Err(err) if !strict => {
            log::warn!("Rendering '{}' without data: {:?}", name, err);
            Ok(OverlayLayer::empty(name))
        }
        Err(err) => Err(err),
    }
}

/// Load both feeds concurrently and compose the view. The two loads are independent, each one
/// produces its own overlay and draws its own line of `progress`.
fn build_map_view(config: &Config, progress: &MultiProgress) -> anyhow::Result<MapView> {
    let options = config.fetch_options();
    let (earthquakes, fault_lines) = rayon::join(
        || load_earthquake_layer(&config.earthquakes, &options, progress),
        || {
            config
                .fault_lines
                .as_ref()
                .map(|source| load_fault_line_layer(source, &options, progress))
        },
    );
    let earthquakes = layer_or_empty(earthquakes, EARTHQUAKE_LAYER_NAME, config.strict)?;
    let fault_lines = fault_lines
        .map(|result| layer_or_empty(result, FAULT_LINE_LAYER_NAME, config.strict))
        .transpose()?;
    Ok(compose_view(
        &config.view,
        &config.tile_provider,
        earthquakes,
        fault_lines,
    ))
}

fn try_main() -> anyhow::Result<()> {
    let args = Args::try_parse()?;
    let config = load_config(Path::new(&args.config_filepath))?;

    let view = build_map_view(&config, &MultiProgress::new())?;
    let output_filepath = output_filepath(&args, &config);
    render::html::write_html(&view, &output_filepath)?;
    log::info!("Map written to {:?}", output_filepath);
    Ok(())
}

fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    env_logger::init();
    if let Err(e) = try_main() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1)
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use clap::Parser;
    use indicatif::{MultiProgress, ProgressDrawTarget};
    use rstest::rstest;
    use testdir::testdir;

    use super::{build_map_view, load_config, output_filepath, Args, Config};
    use crate::feed::download::FeedSource;
    use crate::map::{
        compose::{EARTHQUAKE_LAYER_NAME, FAULT_LINE_LAYER_NAME},
        primitives::{LatLng, MapPrimitive},
    };

    const EARTHQUAKE_FIXTURE: &str = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "properties": {"mag": 0.5, "place": "5km N of The Geysers, CA", "time": 1700000000000},
         "geometry": {"type": "Point", "coordinates": [-122.8, 38.8, 1.2]}},
        {"type": "Feature", "properties": {"mag": 2.5, "place": "20km SW of Tonopah, NV", "time": 1700000060000},
         "geometry": {"type": "Point", "coordinates": [-117.4, 37.9, 7.0]}},
        {"type": "Feature", "properties": {"mag": 6.0, "place": "Off the coast of Honshu, Japan", "time": 1700000120000},
         "geometry": {"type": "Point", "coordinates": [142.3, 38.3, 30.0]}}
    ]}"#;

    const FAULT_LINE_FIXTURE: &str = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "properties": {"Name": "Ridge-1"},
         "geometry": {"type": "LineString", "coordinates": [[-10.0, 20.0], [-11.0, 21.0]]}}
    ]}"#;

    fn write_config(test_dir: &Path, fault_lines: &str, strict: bool) -> Config {
        fs::write(test_dir.join("earthquakes.geojson"), EARTHQUAKE_FIXTURE).unwrap();
        fs::write(test_dir.join("faults.json"), FAULT_LINE_FIXTURE).unwrap();
        let config = format!(
            r#"
earthquakes: !File {{ filepath: "{dir}/earthquakes.geojson" }}
fault_lines: {fault_lines}
tile_provider:
  access_token: pk.test
output_filepath: "{dir}/quake_map.html"
strict: {strict}
"#,
            dir = test_dir.display(),
        );
        serde_yaml::from_str(&config).unwrap()
    }

    fn hidden_progress() -> MultiProgress {
        MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
    }

    #[test]
    fn test_build_map_view_from_fixture_feeds() {
        let test_dir = testdir!();
        let fault_lines = format!(
            "!File {{ filepath: \"{}/faults.json\" }}",
            test_dir.display()
        );
        let config = write_config(&test_dir, &fault_lines, false);
        let view = build_map_view(&config, &hidden_progress()).unwrap();

        let earthquakes = view.overlay(EARTHQUAKE_LAYER_NAME).unwrap();
        let fill_colors: Vec<&str> = earthquakes
            .primitives
            .iter()
            .map(|primitive| match primitive {
                MapPrimitive::CircleMarker(marker) => marker.style.fill_color.unwrap(),
                MapPrimitive::Polyline(_) => panic!("Expected only circle markers"),
            })
            .collect();
        assert_eq!(fill_colors, vec!["#99CC00", "#FFCC00", "#FF0000"]);

        let fault_lines = view.overlay(FAULT_LINE_LAYER_NAME).unwrap();
        assert_eq!(fault_lines.len(), 1);
        assert!(fault_lines.primitives[0].popup().contains("(20,-10)"));

        assert_eq!(view.visible_base_layer().unwrap().name, "Street");
        assert_eq!(view.center, LatLng { lat: 37.09, lng: -32.77 });
        assert_eq!(view.zoom, 3);
    }

    #[test]
    fn test_build_map_view_without_fault_lines() {
        let test_dir = testdir!();
        let config = write_config(&test_dir, "null", false);
        let view = build_map_view(&config, &hidden_progress()).unwrap();
        assert_eq!(view.overlays.len(), 1);
        assert_eq!(view.overlay(EARTHQUAKE_LAYER_NAME).unwrap().len(), 3);
    }

    #[rstest]
    #[case(false)]
    #[case(true)]
    fn test_missing_fault_line_feed(#[case] strict: bool) {
        let test_dir = testdir!();
        let fault_lines = format!(
            "!File {{ filepath: \"{}/missing.json\" }}",
            test_dir.display()
        );
        let config = write_config(&test_dir, &fault_lines, strict);
        let result = build_map_view(&config, &hidden_progress());
        if strict {
            assert!(result.is_err());
        } else {
            let view = result.unwrap();
            assert!(view.overlay(FAULT_LINE_LAYER_NAME).unwrap().is_empty());
            assert_eq!(view.overlay(EARTHQUAKE_LAYER_NAME).unwrap().len(), 3);
        }
    }

    #[test]
    fn test_config_defaults() {
        let config: Config =
            serde_yaml::from_str("tile_provider: { access_token: pk.test }").unwrap();
        assert!(!config.strict);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.output_filepath, Path::new("quake_map.html"));
        assert!(config.fault_lines.is_some());
        assert_eq!(
            config.earthquakes.to_string(),
            "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson"
        );
    }

    #[test]
    fn test_example_config_parses() {
        let config: Config = serde_yaml::from_str(include_str!("../config.example.yaml")).unwrap();
        assert_eq!(
            config.earthquakes,
            FeedSource::Url {
                url: "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson"
                    .to_string()
            }
        );
        assert_eq!(
            config.fault_lines,
            Some(FeedSource::File {
                filepath: "data/PB2002_boundaries.json".into()
            })
        );
        assert_eq!(config.data_dir, Some("data/feeds".into()));
    }

    #[test]
    fn test_load_config_from_file() {
        let test_dir = testdir!();
        let config_filepath = test_dir.join("config.yaml");
        fs::write(
            &config_filepath,
            "tile_provider: { access_token: pk.test }\nfault_lines: null\nstrict: true\n",
        )
        .unwrap();
        let config = load_config(&config_filepath).unwrap();
        assert!(config.strict);
        assert!(config.fault_lines.is_none());
    }

    #[rstest]
    #[case(None)]
    #[case(Some("earthquakes: { url: https://example.com }\ntile_provider: { access_token: pk.test }"))]
    #[case(Some("output_filepath: quake_map.html"))]
    fn test_load_config_errors(#[case] contents: Option<&str>) {
        let test_dir = testdir!();
        let config_filepath = test_dir.join("config.yaml");
        if let Some(contents) = contents {
            fs::write(&config_filepath, contents).unwrap();
        }
        assert!(load_config(&config_filepath).is_err());
    }

    #[rstest]
    #[case(vec!["quake_map", "-c", "config.yaml"], "quake_map.html")]
    #[case(vec!["quake_map", "-c", "config.yaml", "-o", "out/map.html"], "out/map.html")]
    fn test_output_filepath(#[case] argv: Vec<&str>, #[case] expected_filepath: &str) {
        let args = Args::try_parse_from(argv).unwrap();
        let config: Config =
            serde_yaml::from_str("tile_provider: { access_token: pk.test }").unwrap();
        assert_eq!(output_filepath(&args, &config), Path::new(expected_filepath));
    }
}
