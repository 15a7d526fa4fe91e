use crate::config::MapConfig;
use crate::error::AppError;
use crate::render::esc;
use crate::types::HotspotRecord;
use serde::Serialize;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub lat: f64,
    pub lon: f64,
    pub color: &'static str,
    /// HTML shown on click.
    pub popup: String,
    /// HTML shown on hover.
    pub tooltip: String,
}

/// Craft centres are green, every other kind of hotspot is blue.
pub fn marker_color(kind: &str) -> &'static str {
    if kind == "Craft" {
        "green"
    } else {
        "blue"
    }
}

pub fn popup_html(hotspot: &HotspotRecord) -> String {
    format!(
        "<b>{}</b><br>{}<br>{}",
        esc(&hotspot.name),
        esc(&hotspot.kind),
        esc(&hotspot.description)
    )
}

impl From<&HotspotRecord> for Marker {
    fn from(hotspot: &HotspotRecord) -> Self {
        Self {
            lat: hotspot.latitude,
            lon: hotspot.longitude,
            color: marker_color(&hotspot.kind),
            popup: popup_html(hotspot),
            tooltip: esc(&hotspot.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub center: (f64, f64),
    pub zoom: u8,
    pub width: u32,
    pub height: u32,
    pub markers: Vec<Marker>,
}

impl MapView {
    pub fn new(config: &MapConfig, hotspots: &[HotspotRecord]) -> Self {
        Self {
            center: (config.center_lat, config.center_lon),
            zoom: config.zoom,
            width: config.width,
            height: config.height,
            markers: hotspots.iter().map(Marker::from).collect(),
        }
    }

    pub fn to_html(&self) -> Result<String, AppError> {
        // "</" inside a script block would terminate it early.
        let markers = serde_json::to_string(&self.markers)?.replace("</", "<\\/");

        let mut out = String::new();
        out.push_str(&format!("<link rel=\"stylesheet\" href=\"{}\">", LEAFLET_CSS));
        out.push_str(&format!("<script src=\"{}\"></script>", LEAFLET_JS));
        out.push_str(&format!(
            "<div id=\"map\" data-markers=\"{}\" style=\"width: {}px; height: {}px;\"></div>",
            self.markers.len(),
            self.width,
            self.height
        ));
        out.push_str("<script>\n");
        out.push_str(&format!(
            "const map = L.map('map').setView([{}, {}], {});\n",
            self.center.0, self.center.1, self.zoom
        ));
        out.push_str(
            "L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', \
             { maxZoom: 18, attribution: '&copy; OpenStreetMap contributors' }).addTo(map);\n",
        );
        out.push_str(&format!("const markers = {};\n", markers));
        out.push_str(
            "for (const m of markers) {\n\
             \x20 L.circleMarker([m.lat, m.lon], { radius: 9, color: m.color, fillColor: m.color, fillOpacity: 0.8 })\n\
             \x20   .bindPopup(m.popup)\n\
             \x20   .bindTooltip(m.tooltip)\n\
             \x20   .addTo(map);\n\
             }\n",
        );
        out.push_str("</script>");
        Ok(out)
    }
}
