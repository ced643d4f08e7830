// ── Runtime device configuration ──
//
// These types describe *how* to reach one routerboard and which facets to
// collect from it. The exporter binary builds them (via roswatch-config)
// and hands them in; core never reads config files.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification. Default: routerboards ship self-signed certs.
    #[default]
    DangerAcceptInvalid,
}

/// Which facets to collect from a device.
///
/// The traffic facets and the l2tp-server count are opt-in per device;
/// resources, health, identity, routerboard and DHCP leases are always
/// collected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FacetFlags {
    pub interface: bool,
    pub wireless: bool,
    pub caps_man: bool,
    pub l2tp: bool,
    pub gre: bool,
}

impl FacetFlags {
    /// All facets enabled.
    pub fn all() -> Self {
        Self {
            interface: true,
            wireless: true,
            caps_man: true,
            l2tp: true,
            gre: true,
        }
    }
}

/// Configuration for connecting to a single routerboard.
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// Unique device name; becomes the `routerboard_name` label value.
    pub name: String,
    /// Device base URL (e.g., `https://192.168.88.1`).
    pub url: Url,
    /// REST API username.
    pub username: String,
    /// REST API password.
    pub password: SecretString,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Per-request timeout; the pipeline's only hang protection.
    pub timeout: Duration,
    /// Facet enable flags.
    pub facets: FacetFlags,
}
