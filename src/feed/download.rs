use anyhow::{anyhow, Context};
use serde::Deserialize;
use std::{
    fmt, fs,
    path::{Path, PathBuf},
    time::Duration,
};

/// Where a GeoJSON feed is loaded from.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub enum FeedSource {
    Url { url: String },
    File { filepath: PathBuf },
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedSource::Url { url } => write!(f, "{}", url),
            FeedSource::File { filepath } => write!(f, "{}", filepath.display()),
        }
    }
}

/// Settings shared by all feed loads of one run.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub timeout: Duration,
    /// Raw downloaded feeds are written here for reference when set.
    pub data_dir: Option<PathBuf>,
}

pub fn download_feed(url: &str, timeout: Duration) -> anyhow::Result<String> {
    let client = reqwest::blocking::Client::builder()
        .user_agent("quake-map")
        .timeout(timeout)
        .build()?;
    let response = client.get(url).send()?.error_for_status()?;
    response.text().or(Err(anyhow!("No response text")))
}

pub fn parse_feature_collection(contents: &str) -> anyhow::Result<geojson::FeatureCollection> {
    let geojson: geojson::GeoJson = contents.parse().context("Parsing GeoJSON")?;
    match geojson {
        geojson::GeoJson::FeatureCollection(collection) => Ok(collection),
        geojson::GeoJson::Feature(_) => {
            Err(anyhow!("Expected a FeatureCollection, found a Feature"))
        }
        geojson::GeoJson::Geometry(_) => {
            Err(anyhow!("Expected a FeatureCollection, found a Geometry"))
        }
    }
}

pub fn dump_raw_feed(name: &str, contents: &str, data_dir: &Path) -> anyhow::Result<()> {
    let dump_filepath = data_dir.join(format!("{name}.geojson"));
    log::info!("Writing raw {} feed to {:?}", name, &dump_filepath);
    fs::create_dir_all(data_dir)?;
    fs::write(&dump_filepath, contents)
        .with_context(|| format!("Could not write {} feed to {:?}", name, dump_filepath))
}

/// Load the feed called `name` and parse it as a feature collection. Downloaded feeds are dumped
/// to the configured data directory before parsing when possible.
pub fn load_feed(
    name: &str,
    source: &FeedSource,
    options: &FetchOptions,
) -> anyhow::Result<geojson::FeatureCollection> {
    log::info!("Loading {} feed from {}", name, source);
    let contents = match source {
        FeedSource::Url { url } => {
            let contents = download_feed(url, options.timeout)
                .with_context(|| format!("Downloading {} feed", name))?;
            if let Some(data_dir) = &options.data_dir {
                // The dump is only a reference copy, the feed is still usable without it.
                if let Err(err) = dump_raw_feed(name, &contents, data_dir) {
                    log::warn!("Keeping {} feed without a raw copy: {:?}", name, err);
                }
            }
            contents
        }
        FeedSource::File { filepath } => fs::read_to_string(filepath)
            .with_context(|| format!("Reading {} feed from {:?}", name, filepath))?,
    };
    let collection = parse_feature_collection(&contents)
        .with_context(|| format!("Parsing {} feed from {}", name, source))?;
    log::info!("Loaded {} {} features", collection.features.len(), name);
    Ok(collection)
}
