use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ArtKind {
    Dance,
    Painting,
}

impl ArtKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtKind::Dance => "Dance",
            ArtKind::Painting => "Painting",
        }
    }
}

impl fmt::Display for ArtKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtRecord {
    pub name: String,
    pub region: String,
    #[serde(rename = "type")]
    pub kind: ArtKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitorRecord {
    pub state: String,
    pub month: String,
    pub year: i32,
    pub visitors: u64,
}

/// A geolocated point of cultural interest.
///
/// `kind` stays a free string: the external table may introduce types
/// beyond the built-in Heritage Site / Temple / Craft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotspotRecord {
    pub name: String,
    pub state: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
}

impl HotspotRecord {
    pub fn has_valid_coordinates(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}
