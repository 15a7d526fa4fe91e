use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::fs;
use anyhow::{Context, Result};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub input: InputConfig,
    pub server: ServerConfig,
    pub map: MapConfig,
    pub site: SiteConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct InputConfig {
    /// External hotspot table. `None` skips the read and uses the built-in set.
    pub hotspots_csv: Option<PathBuf>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            hotspots_csv: Some(PathBuf::from("cultural_spots.csv")),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            static_dir: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MapConfig {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: u8,
    pub width: u32,
    pub height: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        // Geographic centroid of India
        Self {
            center_lat: 22.9734,
            center_lon: 78.6569,
            zoom: 5,
            width: 700,
            height: 500,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
    pub banner_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "India's Cultural Lens".to_string(),
            banner_url: "https://upload.wikimedia.org/wikipedia/commons/9/98/Art_and_culture_banner.jpg"
                .to_string(),
        }
    }
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| "Failed to parse TOML configuration")?;
        Ok(config)
    }

    /// Like `load_from_file`, but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("Config file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_config_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9000
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.map.zoom, 5);
        assert!((config.map.center_lat - 22.9734).abs() < f64::EPSILON);
    }

    #[test]
    fn hotspot_table_path_defaults_to_cultural_spots() {
        let expected = Some(PathBuf::from("cultural_spots.csv"));
        assert_eq!(AppConfig::default().input.hotspots_csv, expected);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 9000").unwrap();
        let config = AppConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.input.hotspots_csv, expected);

        let config: AppConfig = toml::from_str("[input]\n").unwrap();
        assert_eq!(config.input.hotspots_csv, expected);
    }

    #[test]
    fn load_from_file_reads_input_section() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[input]\nhotspots_csv = \"spots.csv\"").unwrap();
        let config = AppConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.input.hotspots_csv, Some(PathBuf::from("spots.csv")));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.site.title, "India's Cultural Lens");
    }

    #[test]
    fn unparsable_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();
        assert!(AppConfig::load_or_default(file.path()).is_err());
    }
}
