// RouterOS REST response models
//
// One strongly-typed struct per device facet. RouterOS serializes nearly
// every value as a string (numbers included), so fields stay `String` and
// numeric interpretation happens downstream. Wire keys are hyphenated;
// `#[serde(rename)]` maps them onto underscore field names. Fields use
// `#[serde(default)]` liberally because presence varies by RouterOS
// version and board.

use serde::{Deserialize, Serialize};

// ── System ───────────────────────────────────────────────────────────

/// `system/resource`: memory, CPU, disk, uptime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemResource {
    #[serde(default)]
    pub uptime: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, rename = "free-memory")]
    pub free_memory: String,
    #[serde(default, rename = "total-memory")]
    pub total_memory: String,
    #[serde(default, rename = "cpu-count")]
    pub cpu_count: String,
    #[serde(default, rename = "cpu-load")]
    pub cpu_load: String,
    #[serde(default, rename = "free-hdd-space")]
    pub free_hdd_space: String,
    #[serde(default, rename = "total-hdd-space")]
    pub total_hdd_space: String,
    #[serde(default, rename = "architecture-name")]
    pub architecture_name: String,
    #[serde(default, rename = "board-name")]
    pub board_name: String,
    #[serde(default)]
    pub platform: String,
}

/// `system/health`: voltage and temperature sensors.
///
/// Boards without sensors omit the fields entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub voltage: Option<String>,
    #[serde(default)]
    pub temperature: Option<String>,
}

/// `system/identity`: the administrator-assigned device name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default)]
    pub name: String,
}

/// `system/routerboard`: hardware and firmware descriptors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Routerboard {
    #[serde(default)]
    pub routerboard: String,
    #[serde(default)]
    pub model: String,
    #[serde(default, rename = "board-name")]
    pub board_name: String,
    #[serde(default, rename = "serial-number")]
    pub serial_number: String,
    #[serde(default, rename = "firmware-type")]
    pub firmware_type: String,
    #[serde(default, rename = "factory-firmware")]
    pub factory_firmware: String,
    #[serde(default, rename = "current-firmware")]
    pub current_firmware: String,
    #[serde(default, rename = "upgrade-firmware")]
    pub upgrade_firmware: String,
}

// ── DHCP ─────────────────────────────────────────────────────────────

/// One entry from `ip/dhcp-server/lease`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DhcpLease {
    #[serde(default)]
    pub address: String,
    #[serde(default, rename = "mac-address")]
    pub mac_address: String,
    /// `"bound"`, `"waiting"`, `"offered"`, ...
    #[serde(default)]
    pub status: String,
    #[serde(default, rename = "host-name")]
    pub host_name: Option<String>,
    #[serde(default, rename = "expires-after")]
    pub expires_after: Option<String>,
    #[serde(default)]
    pub dynamic: Option<String>,
}

// ── Interfaces ───────────────────────────────────────────────────────

/// One entry from an interface listing (`interface/ethernet`,
/// `interface/wireless`, `caps-man/interface`, `interface/gre`,
/// `interface/l2tp-server`). Only the fields the traffic pipeline needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceEntry {
    pub name: String,
    #[serde(default)]
    pub running: String,
    #[serde(default)]
    pub disabled: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default, rename = "mac-address")]
    pub mac_address: Option<String>,
}

impl InterfaceEntry {
    /// Whether the device reports the interface as running.
    pub fn is_running(&self) -> bool {
        self.running == "true"
    }
}

/// One sample from `interface/monitor-traffic` with `once`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficSample {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "rx-bits-per-second")]
    pub rx_bits_per_second: String,
    #[serde(default, rename = "tx-bits-per-second")]
    pub tx_bits_per_second: String,
    #[serde(default, rename = "rx-packets-per-second")]
    pub rx_packets_per_second: Option<String>,
    #[serde(default, rename = "tx-packets-per-second")]
    pub tx_packets_per_second: Option<String>,
}
