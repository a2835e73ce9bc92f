use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::quote::DuplicatePolicy;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub quote: QuoteConfig,
    pub catalog: CatalogConfig,
    pub business: BusinessConfig,
    pub llm: LlmConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub path: PathBuf,
}

#[derive(Clone, Debug)]
pub struct QuoteConfig {
    pub tax_rate: Decimal,
    pub duplicate_policy: DuplicatePolicy,
}

#[derive(Clone, Debug)]
pub struct CatalogConfig {
    /// Menu JSON supplied by the operator; the builtin menu otherwise.
    pub path: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct BusinessConfig {
    pub name: String,
}

#[derive(Clone, Debug)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<SecretString>,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Pretty => "pretty",
            Self::Json => "json",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub storage_path: Option<PathBuf>,
    pub duplicate_policy: Option<DuplicatePolicy>,
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig { path: PathBuf::from("quotes.json") },
            quote: QuoteConfig {
                tax_rate: Decimal::new(8, 2),
                duplicate_policy: DuplicatePolicy::Merge,
            },
            catalog: CatalogConfig { path: None },
            business: BusinessConfig { name: "QuoteCraft Catering".to_string() },
            llm: LlmConfig {
                base_url: "http://localhost:11434/v1".to_string(),
                model: "llama3.1".to_string(),
                api_key: None,
                timeout_secs: 30,
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl FromStr for DuplicatePolicy {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "merge" => Ok(Self::Merge),
            "append" => Ok(Self::Append),
            other => Err(ConfigError::Validation(format!(
                "unsupported duplicate policy `{other}` (expected merge|append)"
            ))),
        }
    }
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    storage: Option<StoragePatch>,
    quote: Option<QuotePatch>,
    catalog: Option<CatalogPatch>,
    business: Option<BusinessPatch>,
    llm: Option<LlmPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct StoragePatch {
    path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct QuotePatch {
    tax_rate: Option<f64>,
    duplicate_policy: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogPatch {
    path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct BusinessPatch {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LlmPatch {
    base_url: Option<String>,
    model: Option<String>,
    api_key: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<String>,
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch)?;
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("quotecraft.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) -> Result<(), ConfigError> {
        if let Some(storage) = patch.storage {
            if let Some(path) = storage.path {
                self.storage.path = path;
            }
        }

        if let Some(quote) = patch.quote {
            if let Some(tax_rate) = quote.tax_rate {
                self.quote.tax_rate = Decimal::from_f64(tax_rate).ok_or_else(|| {
                    ConfigError::Validation(format!("quote.tax_rate `{tax_rate}` is not a number"))
                })?;
            }
            if let Some(duplicate_policy) = quote.duplicate_policy {
                self.quote.duplicate_policy = duplicate_policy.parse()?;
            }
        }

        if let Some(catalog) = patch.catalog {
            if let Some(path) = catalog.path {
                self.catalog.path = Some(path);
            }
        }

        if let Some(business) = patch.business {
            if let Some(name) = business.name {
                self.business.name = name;
            }
        }

        if let Some(llm) = patch.llm {
            if let Some(base_url) = llm.base_url {
                self.llm.base_url = base_url;
            }
            if let Some(model) = llm.model {
                self.llm.model = model;
            }
            if let Some(api_key) = llm.api_key {
                self.llm.api_key = Some(api_key.into());
            }
            if let Some(timeout_secs) = llm.timeout_secs {
                self.llm.timeout_secs = timeout_secs;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format.parse()?;
            }
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("QUOTECRAFT_STORAGE_PATH") {
            self.storage.path = PathBuf::from(value);
        }
        if let Some(value) = read_env("QUOTECRAFT_TAX_RATE") {
            self.quote.tax_rate = parse_tax_rate("QUOTECRAFT_TAX_RATE", &value)?;
        }
        if let Some(value) = read_env("QUOTECRAFT_DUPLICATE_POLICY") {
            self.quote.duplicate_policy = value.parse()?;
        }
        if let Some(value) = read_env("QUOTECRAFT_CATALOG_PATH") {
            self.catalog.path = Some(PathBuf::from(value));
        }
        if let Some(value) = read_env("QUOTECRAFT_BUSINESS_NAME") {
            self.business.name = value;
        }
        if let Some(value) = read_env("QUOTECRAFT_LLM_BASE_URL") {
            self.llm.base_url = value;
        }
        if let Some(value) = read_env("QUOTECRAFT_LLM_MODEL") {
            self.llm.model = value;
        }
        if let Some(value) = read_env("QUOTECRAFT_LLM_API_KEY") {
            self.llm.api_key = Some(value.into());
        }
        if let Some(value) = read_env("QUOTECRAFT_LLM_TIMEOUT_SECS") {
            self.llm.timeout_secs = value.parse().map_err(|_| ConfigError::InvalidEnvOverride {
                key: "QUOTECRAFT_LLM_TIMEOUT_SECS".to_string(),
                value,
            })?;
        }
        if let Some(value) = read_env("QUOTECRAFT_LOG_LEVEL") {
            self.logging.level = value;
        }
        if let Some(value) = read_env("QUOTECRAFT_LOG_FORMAT") {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(storage_path) = overrides.storage_path {
            self.storage.path = storage_path;
        }
        if let Some(duplicate_policy) = overrides.duplicate_policy {
            self.quote.duplicate_policy = duplicate_policy;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quote.tax_rate < Decimal::ZERO || self.quote.tax_rate >= Decimal::ONE {
            return Err(ConfigError::Validation(
                "quote.tax_rate must be in range 0.0..1.0".to_string(),
            ));
        }

        if self.llm.timeout_secs == 0 || self.llm.timeout_secs > 300 {
            return Err(ConfigError::Validation(
                "llm.timeout_secs must be in range 1..=300".to_string(),
            ));
        }

        if self.business.name.trim().is_empty() {
            return Err(ConfigError::Validation("business.name must not be empty".to_string()));
        }

        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("quotecraft.toml"), PathBuf::from("config/quotecraft.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    toml::from_str::<ConfigPatch>(&raw)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

fn parse_tax_rate(key: &str, value: &str) -> Result<Decimal, ConfigError> {
    Decimal::from_str(value.trim()).map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use rust_decimal::Decimal;

    use crate::domain::quote::DuplicatePolicy;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};

    #[test]
    fn defaults_cover_every_section() {
        let config = AppConfig::default();

        assert_eq!(config.storage.path, PathBuf::from("quotes.json"));
        assert_eq!(config.quote.tax_rate, Decimal::new(8, 2));
        assert_eq!(config.quote.duplicate_policy, DuplicatePolicy::Merge);
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_patch_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            "[storage]\npath = \"archive/quotes.json\"\n\n\
             [quote]\ntax_rate = 0.17\nduplicate_policy = \"append\"\n\n\
             [business]\nname = \"Sultan Halls\"\n"
        )
        .expect("write config");

        let config = AppConfig::load(LoadOptions {
            config_path: Some(file.path().to_path_buf()),
            require_file: true,
            overrides: ConfigOverrides::default(),
        })
        .expect("load config");

        assert_eq!(config.storage.path, PathBuf::from("archive/quotes.json"));
        assert_eq!(config.quote.tax_rate, Decimal::new(17, 2));
        assert_eq!(config.quote.duplicate_policy, DuplicatePolicy::Append);
        assert_eq!(config.business.name, "Sultan Halls");
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let result = AppConfig::load(LoadOptions {
            config_path: Some(PathBuf::from("/nonexistent/quotecraft.toml")),
            require_file: true,
            overrides: ConfigOverrides::default(),
        });

        assert!(matches!(result, Err(ConfigError::MissingConfigFile(_))));
    }

    #[test]
    fn cli_overrides_win_over_file_values() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "[storage]\npath = \"from-file.json\"\n").expect("write config");

        let config = AppConfig::load(LoadOptions {
            config_path: Some(file.path().to_path_buf()),
            require_file: true,
            overrides: ConfigOverrides {
                storage_path: Some(PathBuf::from("from-cli.json")),
                duplicate_policy: Some(DuplicatePolicy::Append),
                log_level: Some("debug".to_string()),
            },
        })
        .expect("load config");

        assert_eq!(config.storage.path, PathBuf::from("from-cli.json"));
        assert_eq!(config.quote.duplicate_policy, DuplicatePolicy::Append);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn rejects_out_of_range_tax_rate() {
        let mut config = AppConfig::default();
        config.quote.tax_rate = Decimal::new(15, 1);

        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn parses_policy_and_format_names() {
        assert_eq!("MERGE".parse::<DuplicatePolicy>().unwrap(), DuplicatePolicy::Merge);
        assert_eq!(" append ".parse::<DuplicatePolicy>().unwrap(), DuplicatePolicy::Append);
        assert!("sometimes".parse::<DuplicatePolicy>().is_err());
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("yaml".parse::<LogFormat>().is_err());
    }
}
