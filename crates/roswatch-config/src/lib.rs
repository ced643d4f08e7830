//! Configuration for the roswatch exporter.
//!
//! A TOML file with one `[[routerboard]]` table per device, merged with
//! `ROSWATCH_`-prefixed environment overrides, validated, and translated
//! into `roswatch_core::DeviceConfig`. The exporter binary is the only
//! consumer -- core never reads config files.

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use roswatch_core::{DeviceConfig, FacetFlags, TlsVerification};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field} for routerboard '{name}': {reason}")]
    Validation {
        name: String,
        field: String,
        reason: String,
    },

    #[error("no password configured for routerboard '{name}'")]
    NoCredentials { name: String },

    #[error("no routerboards configured in {}", path.display())]
    NoRouterboards { path: PathBuf },

    #[error("duplicate routerboard name '{name}'")]
    DuplicateName { name: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level exporter configuration.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Port the scrape endpoint listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// One entry per device, in file order (which becomes session
    /// registration order).
    #[serde(default, rename = "routerboard")]
    pub routerboards: Vec<RouterboardProfile>,
}

/// One `[[routerboard]]` table.
#[derive(Debug, Deserialize)]
pub struct RouterboardProfile {
    /// Unique device name; becomes the `routerboard_name` label value.
    pub name: String,

    /// Host or host:port of the REST API.
    pub host: String,

    /// REST API username.
    pub username: String,

    /// Plaintext password (prefer `password_env`).
    pub password: Option<String>,

    /// Environment variable holding the password.
    pub password_env: Option<String>,

    /// Use https instead of http.
    #[serde(default)]
    pub use_tls: bool,

    /// Verify the device certificate against the system store.
    /// Off by default -- routerboards ship self-signed certs.
    pub verify_tls: Option<bool>,

    /// Path to a custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    // Facet flags, boolean-as-string: only the literal "True" enables.
    pub interface: Option<String>,
    pub wireless: Option<String>,
    pub caps_man: Option<String>,
    pub l2tp: Option<String>,
    pub gre: Option<String>,
}

fn default_listen_port() -> u16 {
    9100
}
fn default_timeout() -> u64 {
    1
}

// ── Config loading ──────────────────────────────────────────────────

/// Load configuration from a TOML file plus `ROSWATCH_` environment
/// overrides, then validate it.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("ROSWATCH_"));

    let config: Config = figment.extract()?;
    validate(&config, path)?;
    Ok(config)
}

fn validate(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if config.routerboards.is_empty() {
        return Err(ConfigError::NoRouterboards {
            path: path.to_path_buf(),
        });
    }
    let mut seen = std::collections::HashSet::new();
    for profile in &config.routerboards {
        if profile.name.is_empty() {
            return Err(ConfigError::Validation {
                name: profile.host.clone(),
                field: "name".into(),
                reason: "must not be empty".into(),
            });
        }
        if !seen.insert(profile.name.as_str()) {
            return Err(ConfigError::DuplicateName {
                name: profile.name.clone(),
            });
        }
    }
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve a device password: environment variable first, then the
/// plaintext config value.
pub fn resolve_password(profile: &RouterboardProfile) -> Result<SecretString, ConfigError> {
    if let Some(ref env_name) = profile.password_env {
        if let Ok(value) = std::env::var(env_name) {
            return Ok(SecretString::from(value));
        }
    }

    if let Some(ref password) = profile.password {
        return Ok(SecretString::from(password.clone()));
    }

    Err(ConfigError::NoCredentials {
        name: profile.name.clone(),
    })
}

// ── Translation to runtime config ───────────────────────────────────

/// Interpret a boolean-as-string facet flag: only the literal `"True"`
/// enables; anything else, including absence, disables.
fn flag_enabled(flag: Option<&str>) -> bool {
    flag == Some("True")
}

/// The facet flags a profile enables.
pub fn facet_flags(profile: &RouterboardProfile) -> FacetFlags {
    FacetFlags {
        interface: flag_enabled(profile.interface.as_deref()),
        wireless: flag_enabled(profile.wireless.as_deref()),
        caps_man: flag_enabled(profile.caps_man.as_deref()),
        l2tp: flag_enabled(profile.l2tp.as_deref()),
        gre: flag_enabled(profile.gre.as_deref()),
    }
}

/// Build a `DeviceConfig` from a profile.
pub fn to_device_config(profile: &RouterboardProfile) -> Result<DeviceConfig, ConfigError> {
    let scheme = if profile.use_tls { "https" } else { "http" };
    let url: Url = format!("{scheme}://{}", profile.host)
        .parse()
        .map_err(|_| ConfigError::Validation {
            name: profile.name.clone(),
            field: "host".into(),
            reason: format!("'{}' is not a valid host", profile.host),
        })?;

    let password = resolve_password(profile)?;

    let tls = if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else if profile.verify_tls.unwrap_or(false) {
        TlsVerification::SystemDefaults
    } else {
        TlsVerification::DangerAcceptInvalid
    };

    Ok(DeviceConfig {
        name: profile.name.clone(),
        url,
        username: profile.username.clone(),
        password,
        tls,
        timeout: Duration::from_secs(profile.timeout),
        facets: facet_flags(profile),
    })
}
