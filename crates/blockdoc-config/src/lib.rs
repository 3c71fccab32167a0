//! Configuration management for blockdoc rendering.
//!
//! Parses `blockdoc.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! Every section is optional. A missing file yields [`Config::default`], which
//! matches the built-in rendering policy:
//!
//! ```toml
//! [links]
//! allowed_schemes = ["http", "https", "mailto"]
//!
//! [blocks]
//! disabled = []
//!
//! [blocks.header]
//! min_level = 1
//! max_level = 6
//!
//! [blocks.embed]
//! allowed_hosts = ["www.youtube.com", "www.youtube-nocookie.com", "player.vimeo.com"]
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "blockdoc.toml";

/// Highest heading level HTML supports.
const MAX_HEADING_LEVEL: u8 = 6;

/// Rendering configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Hyperlink policy applied to rendered output.
    pub links: LinksConfig,
    /// Block type configuration.
    pub blocks: BlocksConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Hyperlink policy.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// URI schemes an anchor `href` may use. Relative references are always allowed.
    pub allowed_schemes: Vec<String>,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            allowed_schemes: vec!["http".to_owned(), "https".to_owned(), "mailto".to_owned()],
        }
    }
}

/// Block type configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct BlocksConfig {
    /// Block types removed from the default registry.
    ///
    /// Disabled types are treated like unknown types: skipped during
    /// validation and omitted from rendered output.
    pub disabled: Vec<String>,
    /// Header block options.
    pub header: HeaderConfig,
    /// Embed block options.
    pub embed: EmbedConfig,
}

/// Header block options.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    /// Smallest accepted heading level.
    pub min_level: u8,
    /// Largest accepted heading level.
    pub max_level: u8,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            min_level: 1,
            max_level: MAX_HEADING_LEVEL,
        }
    }
}

/// Embed block options.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct EmbedConfig {
    /// Hosts an embed iframe may point at.
    pub allowed_hosts: Vec<String>,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            allowed_hosts: vec![
                "www.youtube.com".to_owned(),
                "www.youtube-nocookie.com".to_owned(),
                "player.vimeo.com".to_owned(),
            ],
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a list field to contain at least one entry.
fn require_non_empty<T>(values: &[T], field: &str) -> Result<(), ConfigError> {
    if values.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URI scheme to match `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
fn require_scheme(scheme: &str, field: &str) -> Result<(), ConfigError> {
    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !valid {
        return Err(ConfigError::Validation(format!(
            "{field} contains an invalid scheme: {scheme:?}"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `blockdoc.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the loaded values are invalid.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }

        match std::env::current_dir() {
            Ok(cwd) => Self::load_discovered(&cwd),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Load the first `blockdoc.toml` found in `start` or its parents,
    /// falling back to defaults.
    fn load_discovered(start: &Path) -> Result<Self, ConfigError> {
        match Self::discover_config(start) {
            Some(discovered) => Self::load_from_file(&discovered),
            None => Ok(Self::default()),
        }
    }

    /// Parse configuration from a TOML string.
    ///
    /// Values are normalized (schemes and hosts lower-cased) and validated.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML and
    /// `ConfigError::Validation` for out-of-range values.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Whether a block type is enabled for the default registry.
    #[must_use]
    pub fn is_block_enabled(&self, block_type: &str) -> bool {
        !self.blocks.disabled.iter().any(|t| t == block_type)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file or string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_links()?;
        self.validate_header()?;
        self.validate_embed()?;
        Ok(())
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Lower-case case-insensitive values so lookups can compare exactly.
    fn normalize(&mut self) {
        for scheme in &mut self.links.allowed_schemes {
            scheme.make_ascii_lowercase();
        }
        for host in &mut self.blocks.embed.allowed_hosts {
            host.make_ascii_lowercase();
        }
    }

    fn validate_links(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.links.allowed_schemes, "links.allowed_schemes")?;
        for scheme in &self.links.allowed_schemes {
            require_scheme(scheme, "links.allowed_schemes")?;
        }
        Ok(())
    }

    fn validate_header(&self) -> Result<(), ConfigError> {
        let HeaderConfig {
            min_level,
            max_level,
        } = self.blocks.header;

        if !(1..=MAX_HEADING_LEVEL).contains(&min_level)
            || !(1..=MAX_HEADING_LEVEL).contains(&max_level)
        {
            return Err(ConfigError::Validation(format!(
                "blocks.header levels must be between 1 and {MAX_HEADING_LEVEL}"
            )));
        }
        if min_level > max_level {
            return Err(ConfigError::Validation(
                "blocks.header.min_level cannot exceed blocks.header.max_level".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_embed(&self) -> Result<(), ConfigError> {
        if self.blocks.embed.allowed_hosts.iter().any(String::is_empty) {
            return Err(ConfigError::Validation(
                "blocks.embed.allowed_hosts cannot contain empty hosts".to_owned(),
            ));
        }
        Ok(())
    }
}
