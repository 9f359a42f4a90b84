//! Configuration management.
//!
//! Settings come from a TOML file layered with `LITERATURE_ANALYZER__*`
//! environment variables (double underscore between section and key):
//!
//! ```toml
//! [classifier]
//! occurrence_cap = 3
//! min_confidence = 0.5
//! max_confidence = 0.99
//! fallback_confidence = 0.3
//!
//! [[classifier.extra_keywords]]
//! paper_type = "clinical_research"
//! keyword = "non-inferiority"
//! weight = 3.5
//!
//! [extraction]
//! window_sentences = 1
//! positional_sentences = 2
//!
//! [resolver]
//! providers = ["crossref", "pubmed"]
//! timeout_seconds = 10
//! mailto = "you@example.org"
//! max_retries = 2
//!
//! [logging]
//! level = "info"
//! ```
//!
//! ```bash
//! export LITERATURE_ANALYZER__RESOLVER__TIMEOUT_SECONDS=20
//! export LITERATURE_ANALYZER__RESOLVER__PROVIDERS="pubmed,crossref"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::classifier::{ClassifierSettings, ExtraKeyword, KeywordTable};
use crate::extractor::ExtractionSettings;
use crate::sources::{CROSSREF_API_BASE, PUBMED_EUTILS_BASE};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "LITERATURE_ANALYZER";

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "literature-analyzer.toml";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Classifier constants and extra keywords
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Extraction strategy tunables
    #[serde(default)]
    pub extraction: ExtractionSettings,

    /// DOI resolution settings
    #[serde(default)]
    pub resolver: ResolverSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[classifier]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub occurrence_cap: usize,
    pub min_confidence: f64,
    pub max_confidence: f64,
    pub fallback_confidence: f64,
    pub epsilon: f64,

    /// Keywords added to the built-in tables
    pub extra_keywords: Vec<ExtraKeyword>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        let settings = ClassifierSettings::default();
        Self {
            occurrence_cap: settings.occurrence_cap,
            min_confidence: settings.min_confidence,
            max_confidence: settings.max_confidence,
            fallback_confidence: settings.fallback_confidence,
            epsilon: settings.epsilon,
            extra_keywords: Vec::new(),
        }
    }
}

impl ClassifierConfig {
    pub fn settings(&self) -> ClassifierSettings {
        ClassifierSettings {
            occurrence_cap: self.occurrence_cap,
            min_confidence: self.min_confidence,
            max_confidence: self.max_confidence,
            fallback_confidence: self.fallback_confidence,
            epsilon: self.epsilon,
        }
    }

    /// Built-in tables extended with the configured keywords
    pub fn keyword_table(&self) -> KeywordTable {
        KeywordTable::builtin().with_extra(&self.extra_keywords)
    }
}

/// `[resolver]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// Resolver ids in lookup order
    pub providers: Vec<String>,

    /// Per-request timeout
    pub timeout_seconds: u64,

    /// Contact address sent in the user agent (CrossRef polite pool)
    pub mailto: Option<String>,

    /// Retries on transient errors, on top of the first attempt
    pub max_retries: u32,

    pub crossref_base_url: String,
    pub pubmed_base_url: String,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            providers: vec!["crossref".to_string(), "pubmed".to_string()],
            timeout_seconds: 10,
            mailto: None,
            max_retries: 2,
            crossref_base_url: CROSSREF_API_BASE.to_string(),
            pubmed_base_url: PUBMED_EUTILS_BASE.to_string(),
        }
    }
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when neither `-v`/`-q` nor `RUST_LOG` is given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("resolver.providers")
        .try_parsing(true)
}

/// Load configuration from a file, with environment overrides
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(environment())
        .build()?;

    settings.try_deserialize()
}

/// Configuration from environment variables and defaults only
pub fn env_config() -> Result<Config, config::ConfigError> {
    config::Config::builder()
        .add_source(environment())
        .build()?
        .try_deserialize()
}

/// Locate a configuration file
///
/// Checks `./literature-analyzer.toml`, then
/// `<config dir>/literature-analyzer/config.toml`.
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(env!("CARGO_PKG_NAME")).join("config.toml"))
        .filter(|path| path.is_file())
}

/// Load the explicit file if given, else a discovered file, else defaults
pub fn get_config(explicit: Option<&Path>) -> Result<Config, config::ConfigError> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match find_config_file() {
        Some(path) => {
            tracing::info!("Using config file: {}", path.display());
            load_config(&path)
        }
        None => env_config(),
    }
}
