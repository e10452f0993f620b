use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub input: InputConfig,
    #[serde(default)]
    pub charts: ChartsConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    pub data_csv: PathBuf,
    /// Source column headers. Defaults match the Our World in Data export;
    /// override them here when the source uses different names.
    #[serde(default = "default_country_column")]
    pub country_column: String,
    #[serde(default = "default_code_column")]
    pub code_column: String,
    #[serde(default = "default_year_column")]
    pub year_column: String,
    #[serde(default = "default_emissions_column")]
    pub emissions_column: String,
    /// Rows older than this are dropped during cleaning.
    #[serde(default = "default_min_year")]
    pub min_year: i32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartsConfig {
    /// Bar chart shows the top N emitters for the selected year.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Bounds for the comparison selector count; out-of-range requests
    /// are clamped, not rejected.
    #[serde(default = "default_min_selectors")]
    pub min_selectors: usize,
    #[serde(default = "default_max_selectors")]
    pub max_selectors: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Directory of front-end assets to serve at /. Optional: the API is
    /// usable on its own.
    pub static_dir: Option<PathBuf>,
}

fn default_country_column() -> String {
    "Entity".to_string()
}

fn default_code_column() -> String {
    "Code".to_string()
}

fn default_year_column() -> String {
    "Year".to_string()
}

fn default_emissions_column() -> String {
    "Annual CO₂ emissions (tonnes )".to_string()
}

fn default_min_year() -> i32 {
    1950
}

fn default_top_n() -> usize {
    20
}

fn default_min_selectors() -> usize {
    1
}

fn default_max_selectors() -> usize {
    10
}

impl Default for ChartsConfig {
    fn default() -> Self {
        ChartsConfig {
            top_n: default_top_n(),
            min_selectors: default_min_selectors(),
            max_selectors: default_max_selectors(),
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
}
