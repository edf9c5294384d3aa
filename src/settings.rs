//! Run configuration: built-in defaults, then `courses.toml`, then
//! `COURSES_*` environment variables. Command-line flags are applied on top
//! by the binary.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{CatalogError, Result};
use crate::model::DescriptionPolicy;

pub const INDEX_URL: &str = "https://bulletins.nyu.edu/courses/";
pub const BASE_URL: &str = "https://bulletins.nyu.edu/";
pub const JSON_OUTPUT: &str = "nyu_courses.json";
pub const CSV_OUTPUT: &str = "nyu_courses.csv";
pub const FILTERED_OUTPUT: &str = "nyu_courses_no_description.json";

const CONFIG_FILE: &str = "courses.toml";
const ENV_PREFIX: &str = "COURSES";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl OutputFormat {
    pub fn default_path(self) -> &'static str {
        match self {
            OutputFormat::Json => JSON_OUTPUT,
            OutputFormat::Csv => CSV_OUTPUT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Page listing every subject's course page.
    pub index_url: String,
    /// Origin that relative subject links are resolved against.
    pub base_url: String,
    /// Catalog destination; derived from `format` when unset.
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    /// Input of the filter step is the JSON catalog, output is this path.
    pub filtered_output: PathBuf,
    pub description: DescriptionPolicy,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            index_url: INDEX_URL.to_string(),
            base_url: BASE_URL.to_string(),
            output: None,
            format: OutputFormat::default(),
            filtered_output: PathBuf::from(FILTERED_OUTPUT),
            description: DescriptionPolicy::default(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Settings {
    /// Load from `courses.toml` in the working directory (if present) and the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(file: &Path) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from(file).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn index_url(&self) -> Result<Url> {
        parse_url(&self.index_url)
    }

    pub fn base_url(&self) -> Result<Url> {
        parse_url(&self.base_url)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.format.default_path()))
    }

    /// Where `scrape` leaves the JSON catalog: the configured output when the
    /// format is JSON, the default JSON file name otherwise.
    pub fn catalog_json_path(&self) -> PathBuf {
        match self.format {
            OutputFormat::Json => self.output_path(),
            OutputFormat::Csv => PathBuf::from(JSON_OUTPUT),
        }
    }
}

fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|source| CatalogError::InvalidUrl {
        url: raw.to_string(),
        source,
    })
}
