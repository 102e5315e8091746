use config::{Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use crate::auth::PinPolicy;
use crate::error::{Error, Result};
use crate::platform::paths::{absolutize, default_registry_file};
use crate::platform::AppPaths;

pub const ENV_PREFIX: &str = "APP_LAUNCHER";
pub const THEMES: &[&str] = &["dark", "light"];
/// PIN lengths may be narrowed in config but never widened.
pub const PIN_LENGTHS: RangeInclusive<usize> = 5..=10;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub registry: RegistryConfig,
    pub security: SecurityConfig,
    pub ui: UIConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Registry file. Relative paths resolve against the working directory;
    /// unset means `apps.txt` in the working directory.
    pub path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub max_pin_attempts: u32,
    pub min_pin_length: usize,
    pub max_pin_length: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UIConfig {
    pub theme: String,
    pub show_full_paths: bool,
    pub tick_rate_ms: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        let policy = PinPolicy::default();
        Self {
            max_pin_attempts: policy.max_attempts,
            min_pin_length: policy.min_length,
            max_pin_length: policy.max_length,
        }
    }
}

impl Default for UIConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            show_full_paths: true,
            tick_rate_ms: 250,
        }
    }
}

impl AppConfig {
    /// Loads `config.toml`, writing the defaults first if it does not exist.
    /// `APP_LAUNCHER_*` environment variables override file values.
    pub async fn load(paths: &AppPaths) -> Result<Self> {
        let config_file = paths.config_file();

        if !config_file.exists() {
            info!("Config file not found, creating default configuration");
            Self::default().save(paths).await?;
        }

        info!("Loading configuration from: {:?}", config_file);
        let config = Self::from_sources(&config_file, Some(Environment::with_prefix(ENV_PREFIX)))?;
        config.validate()?;

        info!("Configuration loaded successfully");
        Ok(config)
    }

    fn from_sources(config_file: &Path, env: Option<Environment>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(File::from(config_file).format(FileFormat::Toml).required(false));

        if let Some(env) = env {
            builder = builder.add_source(
                env.prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );
        }

        Ok(builder.build()?.try_deserialize()?)
    }

    pub async fn save(&self, paths: &AppPaths) -> Result<()> {
        let config_file = paths.config_file();

        info!("Saving configuration to: {:?}", config_file);

        let config_content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(config::ConfigError::Message(e.to_string())))?;

        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&config_file, config_content).await?;

        info!("Configuration saved successfully");
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let security = &self.security;
        if !(1..=10).contains(&security.max_pin_attempts) {
            return Err(Error::validation("max_pin_attempts must be between 1 and 10"));
        }
        for (name, length) in [
            ("min_pin_length", security.min_pin_length),
            ("max_pin_length", security.max_pin_length),
        ] {
            if !PIN_LENGTHS.contains(&length) {
                return Err(Error::validation(format!(
                    "{} must be between {} and {}",
                    name,
                    PIN_LENGTHS.start(),
                    PIN_LENGTHS.end()
                )));
            }
        }
        if security.max_pin_length < security.min_pin_length {
            return Err(Error::validation(
                "max_pin_length must not be smaller than min_pin_length",
            ));
        }

        if !THEMES.contains(&self.ui.theme.as_str()) {
            return Err(Error::validation(format!(
                "Unknown theme '{}', expected one of: {}",
                self.ui.theme,
                THEMES.join(", ")
            )));
        }
        if self.ui.tick_rate_ms == 0 {
            return Err(Error::validation("tick_rate_ms must be greater than 0"));
        }

        if matches!(&self.registry.path, Some(path) if path.trim().is_empty()) {
            return Err(Error::validation("registry path must not be empty"));
        }

        Ok(())
    }

    pub fn pin_policy(&self) -> PinPolicy {
        PinPolicy {
            min_length: self.security.min_pin_length,
            max_length: self.security.max_pin_length,
            max_attempts: self.security.max_pin_attempts,
        }
    }

    /// Absolute location of the registry file.
    pub fn registry_file(&self) -> Result<PathBuf> {
        match &self.registry.path {
            Some(path) => absolutize(Path::new(path.trim())),
            None => default_registry_file(),
        }
    }
}
