use crate::config::AppConfig;
use crate::error::DataError;
use crate::filter::{distinct_values, HotspotField};
use crate::types::{ArtKind, ArtRecord, HotspotRecord, VisitorRecord};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Columns the external hotspot table must carry. Extra columns are ignored.
pub const HOTSPOT_COLUMNS: [&str; 6] = ["name", "state", "type", "latitude", "longitude", "description"];

/// Where the hotspots in use came from.
#[derive(Debug, Clone, PartialEq)]
pub enum HotspotSource {
    File(PathBuf),
    Embedded,
}

/// The three read-only tables, loaded once and shared by every request.
#[derive(Debug, Clone)]
pub struct Datasets {
    pub art: Vec<ArtRecord>,
    pub visitors: Vec<VisitorRecord>,
    pub hotspots: Vec<HotspotRecord>,
    pub hotspot_source: HotspotSource,
}

impl Datasets {
    pub fn load(config: &AppConfig) -> Self {
        let (hotspots, hotspot_source) = hotspots_or_default(config.input.hotspots_csv.as_deref());
        let datasets = Self {
            art: load_art_forms(),
            visitors: load_visitor_stats(),
            hotspots,
            hotspot_source,
        };
        tracing::info!(
            art = datasets.art.len(),
            visitors = datasets.visitors.len(),
            hotspots = datasets.hotspots.len(),
            "Datasets loaded (hotspots from {:?})",
            datasets.hotspot_source
        );
        datasets
    }
}

pub fn load_art_forms() -> Vec<ArtRecord> {
    [
        ("Kathak", "North India", ArtKind::Dance),
        ("Madhubani", "Bihar", ArtKind::Painting),
        ("Bharatanatyam", "Tamil Nadu", ArtKind::Dance),
        ("Pattachitra", "Odisha", ArtKind::Painting),
        ("Chhau", "Jharkhand", ArtKind::Dance),
        ("Warli", "Maharashtra", ArtKind::Painting),
    ]
    .into_iter()
    .map(|(name, region, kind)| ArtRecord {
        name: name.to_string(),
        region: region.to_string(),
        kind,
    })
    .collect()
}

pub fn load_visitor_stats() -> Vec<VisitorRecord> {
    [
        ("Rajasthan", "Jan", 120_000),
        ("Rajasthan", "Feb", 135_000),
        ("Odisha", "Jan", 70_000),
        ("Odisha", "Feb", 85_000),
        ("Karnataka", "Jan", 110_000),
        ("Karnataka", "Feb", 130_000),
    ]
    .into_iter()
    .map(|(state, month, visitors)| VisitorRecord {
        state: state.to_string(),
        month: month.to_string(),
        year: 2023,
        visitors,
    })
    .collect()
}

pub fn default_hotspots() -> Vec<HotspotRecord> {
    [
        ("Hampi", "Karnataka", "Heritage Site", 15.3350, 76.4600, "UNESCO site of Vijayanagara Empire"),
        ("Konark Sun Temple", "Odisha", "Temple", 19.8876, 86.0945, "13th-century temple dedicated to Sun God"),
        ("Sankheda Furniture", "Gujarat", "Craft", 22.3702, 73.1847, "Hand-painted wooden furniture"),
        ("Channapatna Toys", "Karnataka", "Craft", 12.8755, 77.2865, "Wooden toy craft called Gombegala Ooru"),
    ]
    .into_iter()
    .map(|(name, state, kind, latitude, longitude, description)| HotspotRecord {
        name: name.to_string(),
        state: state.to_string(),
        kind: kind.to_string(),
        latitude,
        longitude,
        description: description.to_string(),
    })
    .collect()
}

/// Strict read of an external hotspot table.
pub fn load_hotspots(path: &Path) -> Result<Vec<HotspotRecord>, DataError> {
    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut rdr = ReaderBuilder::new().from_reader(file);
    let headers = rdr.headers()?.clone();

    for column in HOTSPOT_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DataError::MissingColumn(column));
        }
    }

    let mut hotspots = Vec::new();
    for (i, result) in rdr.deserialize::<HotspotRecord>().enumerate() {
        let record = result?;
        if !record.has_valid_coordinates() {
            return Err(DataError::CoordinateOutOfRange {
                row: i + 1,
                name: record.name,
                latitude: record.latitude,
                longitude: record.longitude,
            });
        }
        hotspots.push(record);
    }

    Ok(hotspots)
}

/// Reads the external table if one is configured, otherwise (or on any
/// failure) substitutes the built-in set. Never fails.
pub fn hotspots_or_default(path: Option<&Path>) -> (Vec<HotspotRecord>, HotspotSource) {
    let Some(path) = path else {
        return (default_hotspots(), HotspotSource::Embedded);
    };

    match load_hotspots(path) {
        Ok(hotspots) => (hotspots, HotspotSource::File(path.to_path_buf())),
        Err(e) => {
            tracing::warn!("Using built-in hotspots: {}", e);
            (default_hotspots(), HotspotSource::Embedded)
        }
    }
}

/// Summary printed by `check`. Unlike `Datasets::load`, a broken hotspot
/// table is reported instead of replaced.
pub fn check_report(config: &AppConfig) -> Result<String, DataError> {
    let mut lines = vec![
        format!("Art forms: {}", load_art_forms().len()),
        format!("Visitor records: {}", load_visitor_stats().len()),
    ];

    match &config.input.hotspots_csv {
        Some(path) => {
            let hotspots = load_hotspots(path)?;
            let kinds = distinct_values(&hotspots, HotspotField::Type);
            lines.push(format!("Hotspots: {} from {:?}", hotspots.len(), path));
            lines.push(format!("Hotspot types: {}", kinds.join(", ")));
        }
        None => {
            lines.push(format!(
                "Hotspots: {} built-in (no hotspots_csv configured)",
                default_hotspots().len()
            ));
        }
    }

    Ok(lines.join("\n"))
}
