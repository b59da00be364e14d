use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration with strongly-typed sections.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Core server configuration.
    pub server: ServerConfig,
    /// Storage configuration: where the flight catalog and report
    /// collection live on disk.
    pub storage: StorageConfig,
    /// CORS configuration (optional; no cross-origin access if None).
    #[serde(default)]
    pub cors: Option<CorsConfig>,
    /// Logging configuration (optional, uses defaults if None).
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub timeout_sec: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Data directory; will be normalized to an absolute path and created.
    /// Empty => "./data" relative to the working directory.
    #[serde(default)]
    pub data_dir: String,
    /// Flight catalog document, relative to `data_dir` unless absolute.
    #[serde(default = "default_flights_file")]
    pub flights_file: String,
    /// Report collection document, relative to `data_dir` unless absolute.
    #[serde(default = "default_reports_file")]
    pub reports_file: String,
    /// When true, a missing/empty/corrupt flight catalog aborts startup.
    /// When false, a built-in sample catalog is substituted.
    #[serde(default)]
    pub strict_catalog: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    /// Origins allowed to call the API with any headers and methods.
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub console_level: String, // "info", "debug", "error", "off"
    #[serde(default)]
    pub file: String, // "logs/flightboard.log", empty => console only
    #[serde(default)]
    pub file_level: String,
    #[serde(default)]
    pub max_backups: Option<usize>, // How many rotated files to keep
    #[serde(default)]
    pub max_size_mb: Option<u64>, // Max size of the file in MB
}

fn default_flights_file() -> String {
    "flights.json".to_string()
}

fn default_reports_file() -> String {
    "reports.json".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8086,
            timeout_sec: 10,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: String::new(),
            flights_file: default_flights_file(),
            reports_file: default_reports_file(),
            strict_catalog: false,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            console_level: "info".to_string(),
            file: "logs/flightboard.log".to_string(),
            file_level: "debug".to_string(),
            max_backups: Some(3),
            max_size_mb: Some(100),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            cors: Some(CorsConfig::default()),
            logging: Some(LoggingConfig::default()),
        }
    }
}

impl StorageConfig {
    /// Absolute path of the flight catalog document.
    pub fn flights_path(&self) -> PathBuf {
        resolve_data_path(&self.flights_file, Path::new(&self.data_dir))
    }

    /// Absolute path of the report collection document.
    pub fn reports_path(&self) -> PathBuf {
        resolve_data_path(&self.reports_file, Path::new(&self.data_dir))
    }
}

impl AppConfig {
    /// Load configuration with layered loading: defaults → YAML file → environment variables.
    /// Also normalizes `storage.data_dir` into an absolute path and creates the directory.
    pub fn load_layered<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        use figment::{
            providers::{Env, Format, Serialized, Yaml},
            Figment,
        };

        // Yaml::file silently skips missing files; an explicitly requested
        // config file that does not exist is an error instead.
        if !config_path.as_ref().exists() {
            anyhow::bail!(
                "Config file '{}' not found",
                config_path.as_ref().display()
            );
        }

        // Start from a minimal base where optional sections are None,
        // so they remain None unless explicitly provided by YAML/ENV.
        let base = AppConfig {
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            cors: None,
            logging: None,
        };

        let figment = Figment::new()
            .merge(Serialized::defaults(base))
            .merge(Yaml::file(config_path.as_ref()))
            // Example: APP__SERVER__PORT=8086 maps to server.port
            .merge(Env::prefixed("APP__").split("__"));

        let mut config: AppConfig = figment
            .extract()
            .with_context(|| "Failed to extract config from figment".to_string())?;

        normalize_data_dir_inplace(&mut config.storage)
            .context("Failed to resolve storage.data_dir")?;

        Ok(config)
    }

    /// Load configuration from file or create with default values.
    /// Also normalizes `storage.data_dir` into an absolute path and creates the directory.
    pub fn load_or_default<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_layered(path),
            None => {
                let mut c = Self::default();
                normalize_data_dir_inplace(&mut c.storage)
                    .context("Failed to resolve storage.data_dir (defaults)")?;
                Ok(c)
            }
        }
    }

    /// Serialize configuration to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config to YAML")
    }

    /// Apply overrides from command line arguments.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(port) = args.port {
            self.server.port = port;
        }

        if args.strict_catalog {
            self.storage.strict_catalog = true;
        }

        // Raise the console level based on verbose flags.
        let logging = self.logging.get_or_insert_with(LoggingConfig::default);
        logging.console_level = match args.verbose {
            0 => logging.console_level.clone(), // keep
            1 => "debug".to_string(),
            _ => "trace".to_string(),
        };
    }
}

/// Command line arguments structure.
#[derive(Debug, Clone)]
pub struct CliArgs {
    pub config: Option<String>,
    pub port: Option<u16>,
    pub print_config: bool,
    pub verbose: u8,
    pub strict_catalog: bool,
}

const fn default_data_subdir() -> &'static str {
    "data"
}

/// Resolve a storage file path against the (normalized) data dir.
/// Absolute paths are kept as-is; relative paths are joined.
fn resolve_data_path(file: &str, data_dir: &Path) -> PathBuf {
    let p = Path::new(file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        data_dir.join(p)
    }
}

/// Normalize `storage.data_dir` into an absolute path, create it, and store it back.
fn normalize_data_dir_inplace(storage: &mut StorageConfig) -> Result<()> {
    // Treat empty string as "not provided" => "data" under the working dir.
    let raw = if storage.data_dir.trim().is_empty() {
        PathBuf::from(default_data_subdir())
    } else {
        PathBuf::from(&storage.data_dir)
    };

    let resolved = if raw.is_absolute() {
        raw
    } else {
        std::env::current_dir()
            .context("Failed to resolve the current working directory")?
            .join(raw)
    };

    std::fs::create_dir_all(&resolved)
        .with_context(|| format!("Failed to create data dir '{}'", resolved.display()))?;

    storage.data_dir = resolved.to_string_lossy().to_string();
    Ok(())
}
