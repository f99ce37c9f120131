//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::craigslist::models::Region;
use crate::craigslist::query::DEFAULT_PAGE_SIZE;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading.
///
/// Loaded once at startup and read-only for the rest of the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Regions to survey, in report order
    #[serde(default = "default_regions")]
    pub regions: Vec<Region>,

    /// Pagination offset increment (results per page)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Directory receiving one HTML file per fetched page group
    #[serde(default = "default_scrape_dir")]
    pub scrape_dir: PathBuf,

    /// Shared log of extracted neighborhood names
    #[serde(default = "default_locations_log")]
    pub locations_log: PathBuf,

    /// Truncate the neighborhood log once at the start of a run
    #[serde(default = "default_true")]
    pub reset_locations_log: bool,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Report format
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_scrape_dir() -> PathBuf {
    PathBuf::from("scraped")
}

fn default_locations_log() -> PathBuf {
    PathBuf::from("locations").join("locations.txt")
}

fn default_true() -> bool {
    true
}

/// The room-share searches surveyed when no configuration file is present.
fn default_regions() -> Vec<Region> {
    [
        ("San Francisco", "https://sfbay.craigslist.org/search/sfc/roo"),
        ("North Bay", "https://sfbay.craigslist.org/search/nby/roo"),
        ("East Bay", "https://sfbay.craigslist.org/search/eby/roo"),
        ("Chico", "https://chico.craigslist.org/search/roo"),
        ("Redding", "https://redding.craigslist.org/search/roo"),
        ("Sacramento", "https://sacramento.craigslist.org/search/roo"),
    ]
    .into_iter()
    .map(|(name, url)| Region::new(name, url))
    .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            regions: default_regions(),
            page_size: default_page_size(),
            scrape_dir: default_scrape_dir(),
            locations_log: default_locations_log(),
            reset_locations_log: true,
            proxy: None,
            format: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("rent-survey").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(proxy) = std::env::var("RENT_SURVEY_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(dir) = std::env::var("RENT_SURVEY_SCRAPE_DIR") {
            self.scrape_dir = PathBuf::from(dir);
        }

        if let Ok(log) = std::env::var("RENT_SURVEY_LOCATIONS_LOG") {
            self.locations_log = PathBuf::from(log);
        }

        if let Ok(size) = std::env::var("RENT_SURVEY_PAGE_SIZE") {
            if let Ok(s) = size.parse() {
                self.page_size = s;
            }
        }

        self
    }

    /// Checks that the configuration can drive a run.
    ///
    /// Only an empty region list is fatal; questionable region settings are
    /// reported by the survey and the region is still searched.
    pub fn validate(&self) -> Result<()> {
        if self.regions.is_empty() {
            anyhow::bail!("No regions configured. Add at least one [[regions]] entry.");
        }

        Ok(())
    }
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: text, json, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.regions.len(), 6);
        assert_eq!(config.regions[0].name, "San Francisco");
        assert_eq!(config.regions[5].name, "Sacramento");
        assert_eq!(config.page_size, 120);
        assert_eq!(config.scrape_dir, PathBuf::from("scraped"));
        assert_eq!(config.locations_log, PathBuf::from("locations/locations.txt"));
        assert!(config.reset_locations_log);
        assert!(config.proxy.is_none());
        assert_eq!(config.format, OutputFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("TXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);

        let err = "table".parse::<OutputFormat>().unwrap_err();
        assert!(err.contains("Unknown format"));
        assert!(err.contains("text, json, csv"));
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Text.to_string(), "text");
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            page_size = 100
            scrape_dir = "out/pages"
            format = "json"

            [[regions]]
            name = "Test"
            base_url = "http://x.test/search"
            price_min = 300
            price_max = 1800
            sub_locations = ["", "downtown"]
            pages_per_sub_location = 1
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.page_size, 100);
        assert_eq!(config.scrape_dir, PathBuf::from("out/pages"));
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.regions.len(), 1);

        let region = &config.regions[0];
        assert_eq!(region.name, "Test");
        assert_eq!(region.price_min, 300);
        assert_eq!(region.price_max, 1800);
        assert_eq!(region.sub_locations, vec!["", "downtown"]);
        assert_eq!(region.pages_per_sub_location, 1);
    }

    #[test]
    fn test_example_config_parses() {
        let config: Config = toml::from_str(include_str!("../config.example.toml")).unwrap();
        assert_eq!(config.regions.len(), 2);
        assert_eq!(config.regions[0].sub_locations.len(), 3);
        assert_eq!(config.regions[1].price_max, 2000);
        assert_eq!(config.regions[1].pages_per_sub_location, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_without_regions_uses_defaults() {
        let config: Config = toml::from_str("page_size = 50").unwrap();
        assert_eq!(config.regions.len(), 6);
    }

    #[test]
    fn test_config_empty_regions_fails_validation() {
        let config: Config = toml::from_str("regions = []").unwrap();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("No regions configured"));
    }

    #[test]
    fn test_config_inverted_price_bounds_is_not_fatal() {
        let mut config = Config::default();
        config.regions[0].price_min = 5000;
        config.regions[0].price_max = 100;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            locations_log = "logs/hoods.txt"

            [[regions]]
            name = "Chico"
            base_url = "https://chico.craigslist.org/search/roo"
            "#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.locations_log, PathBuf::from("logs/hoods.txt"));
        assert_eq!(config.regions[0].name, "Chico");
    }

    #[test]
    fn test_config_from_file_not_found() {
        let result = Config::from_file("/nonexistent/path/config.toml");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_config_from_file_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml {{{{").unwrap();

        let err = Config::from_file(file.path()).unwrap_err().to_string();
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_config_load_explicit_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "page_size = 30").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.page_size, 30);
    }

    #[test]
    fn test_config_with_env() {
        let orig_dir = std::env::var("RENT_SURVEY_SCRAPE_DIR").ok();
        let orig_size = std::env::var("RENT_SURVEY_PAGE_SIZE").ok();

        std::env::set_var("RENT_SURVEY_SCRAPE_DIR", "/tmp/pages");
        std::env::set_var("RENT_SURVEY_PAGE_SIZE", "not_a_number");

        let config = Config::new().with_env();
        assert_eq!(config.scrape_dir, PathBuf::from("/tmp/pages"));
        assert_eq!(config.page_size, 120);

        match orig_dir {
            Some(v) => std::env::set_var("RENT_SURVEY_SCRAPE_DIR", v),
            None => std::env::remove_var("RENT_SURVEY_SCRAPE_DIR"),
        }
        match orig_size {
            Some(v) => std::env::set_var("RENT_SURVEY_PAGE_SIZE", v),
            None => std::env::remove_var("RENT_SURVEY_PAGE_SIZE"),
        }
    }
}
