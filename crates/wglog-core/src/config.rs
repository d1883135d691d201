//! Configuration types for wglog.
//!
//! [`Config::load`] layers the built-in defaults, the optional user file at
//! `$XDG_CONFIG_HOME/wglog/config.toml` and an optional explicit file.
//! [`Config::defaults`] returns the built-in defaults without touching the
//! filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[extractor]
subsystem_tag   = "wireguard:"
excluded_prefix = "Keypair"
strict_peer     = false
year_policy     = "current"

[output]
format              = "pretty"
pri                 = "<134>"
nil_value           = "NILVALUE"
omit_nil_fields     = false
include_peer_fields = false
ascii_only          = true
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub extractor: ExtractorConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[extractor]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractorConfig {
    /// Token 6 must equal this, byte for byte.
    #[serde(default = "default_subsystem_tag")]
    pub subsystem_tag: String,
    /// Messages starting with this prefix are skipped.
    #[serde(default = "default_excluded_prefix")]
    pub excluded_prefix: String,
    /// Reject lines whose peer can not be resolved instead of emitting them
    /// with absent peer fields.
    #[serde(default)]
    pub strict_peer: bool,
    #[serde(default)]
    pub year_policy: YearPolicy,
}

fn default_subsystem_tag() -> String { "wireguard:".to_string() }
fn default_excluded_prefix() -> String { "Keypair".to_string() }

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            subsystem_tag: default_subsystem_tag(),
            excluded_prefix: default_excluded_prefix(),
            strict_peer: false,
            year_policy: YearPolicy::default(),
        }
    }
}

/// How to fill in the year that syslog headers leave out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YearPolicy {
    /// Always the year of the reference date.
    #[default]
    Current,
    /// The reference year, or the year before when the line's month lies
    /// after the reference month.
    Rollover,
}

/// `[output]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Constant PRI value: local0 (16) * 8 + informational (6).
    #[serde(default = "default_pri")]
    pub pri: String,
    /// Placeholder for PID, MESSAGEID, STRUCTURED-DATA and unknown peers.
    #[serde(default = "default_nil_value")]
    pub nil_value: String,
    /// Leave out fields that would only carry `nil_value`.
    #[serde(default)]
    pub omit_nil_fields: bool,
    /// Append `PEER-NUMBER` and `PEER-ADDRESS` to each record.
    #[serde(default)]
    pub include_peer_fields: bool,
    /// Escape every non-ASCII character as `\uXXXX`.
    #[serde(default = "default_ascii_only")]
    pub ascii_only: bool,
}

fn default_pri() -> String { "<134>".to_string() }
fn default_nil_value() -> String { "NILVALUE".to_string() }
fn default_ascii_only() -> bool { true }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            pri: default_pri(),
            nil_value: default_nil_value(),
            omit_nil_fields: false,
            include_peer_fields: false,
            ascii_only: default_ascii_only(),
        }
    }
}

/// Serialized record layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented JSON object per record, four-space indent.
    #[default]
    Pretty,
    /// One JSON object per line.
    Compact,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pretty" => Ok(OutputFormat::Pretty),
            "compact" => Ok(OutputFormat::Compact),
            other => Err(format!("unknown output format {other:?} (expected pretty or compact)")),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load the built-in defaults, then the user file if present, then
    /// `explicit` if given. A missing explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_from(Some(config_path().as_path()), explicit)
    }

    /// [`Config::load`] with the user file location given by the caller.
    /// `None` skips the user layer.
    pub fn load_from(user: Option<&Path>, explicit: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));

        if let Some(path) = user {
            builder = builder.add_source(config::File::from(path).required(false));
        }
        if let Some(path) = explicit {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder.build()?.try_deserialize().map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("wglog")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
