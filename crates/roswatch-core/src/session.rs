// ── Device session ──
//
// Owns one routerboard's connection lifecycle and exposes the facet
// accessors. Every accessor returns normalized records tagged with the
// device name; gated accessors return an empty list without touching the
// network when their facet is disabled.

use tracing::{info, warn};

use roswatch_api::models::InterfaceEntry;
use roswatch_api::{RosClient, TlsMode, TransportConfig};

use crate::config::{DeviceConfig, FacetFlags, TlsVerification};
use crate::convert::{Record, count_record, record_for, uptime_seconds};
use crate::error::CoreError;

/// One category of device state, fetched and normalized independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Facet {
    Resources,
    Health,
    Identity,
    Routerboard,
    DhcpLeases,
    DhcpLeaseCount,
    DhcpBoundLeaseCount,
    InterfaceTraffic,
    WirelessTraffic,
    CapsManTraffic,
    GreTraffic,
    L2tpServerTraffic,
    L2tpServerCount,
}

/// The interface classes the traffic facets sample from.
#[derive(Debug, Clone, Copy)]
enum InterfaceClass {
    Ethernet,
    Wireless,
    CapsMan,
    Gre,
    L2tpServer,
}

/// The live connection and state associated with one configured device.
///
/// Constructed once at startup via [`connect`](Self::connect) and kept for
/// the process lifetime; `reconnect` is the sole recovery path after a
/// mid-cycle failure.
pub struct DeviceSession {
    name: String,
    facets: FacetFlags,
    client: RosClient,
    connected: bool,
}

impl DeviceSession {
    /// Build the client and probe the device.
    ///
    /// A failed probe is fatal here -- starting blind against a device that
    /// was never reachable is treated as a configuration error, while the
    /// same device going dark later is absorbed by the fleet.
    pub async fn connect(config: DeviceConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: tls_mode(&config.tls),
            timeout: config.timeout,
        };
        let client = RosClient::new(config.url, config.username, config.password, &transport)
            .map_err(|e| CoreError::ConnectionFailed {
                device: config.name.clone(),
                reason: e.to_string(),
            })?;

        let session = Self {
            name: config.name,
            facets: config.facets,
            client,
            connected: true,
        };

        if let Err(e) = session.client.system_identity().await {
            return Err(CoreError::ConnectionFailed {
                device: session.name,
                reason: e.to_string(),
            });
        }
        info!(device = %session.name, "connected");
        Ok(session)
    }

    /// The configured device name (the `routerboard_name` label value).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the device answered its most recent probe or call.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub(crate) fn mark_disconnected(&mut self) {
        self.connected = false;
    }

    /// Re-probe a disconnected device. No-op when connected; never
    /// propagates a failure past this boundary.
    pub async fn reconnect(&mut self) {
        if self.connected {
            return;
        }
        info!(device = %self.name, "trying to reconnect");
        match self.client.system_identity().await {
            Ok(_) => {
                self.connected = true;
                info!(device = %self.name, "reconnected");
            }
            Err(err) => {
                warn!(device = %self.name, error = %err, "still unreachable");
            }
        }
    }

    /// Uniform facet dispatch, used by the fleet and the catalog.
    pub async fn fetch(&self, facet: Facet) -> Result<Vec<Record>, CoreError> {
        match facet {
            Facet::Resources => self.resources().await,
            Facet::Health => self.health().await,
            Facet::Identity => self.identity().await,
            Facet::Routerboard => self.routerboard().await,
            Facet::DhcpLeases => self.leases().await,
            Facet::DhcpLeaseCount => self.lease_count().await,
            Facet::DhcpBoundLeaseCount => self.bound_lease_count().await,
            Facet::InterfaceTraffic => self.interface_traffic().await,
            Facet::WirelessTraffic => self.wireless_traffic().await,
            Facet::CapsManTraffic => self.caps_man_traffic().await,
            Facet::GreTraffic => self.gre_traffic().await,
            Facet::L2tpServerTraffic => self.l2tp_server_traffic().await,
            Facet::L2tpServerCount => self.l2tp_server_count().await,
        }
    }

    // ── Single-call facets ───────────────────────────────────────────

    /// Memory/CPU/disk/uptime figures, with `uptime` replaced by parsed
    /// seconds so it can be shaped as a gauge.
    pub async fn resources(&self) -> Result<Vec<Record>, CoreError> {
        let mut records = Vec::new();
        for resource in self.client.system_resource().await? {
            let mut record = record_for(&self.name, &resource);
            record.insert("uptime".into(), uptime_seconds(&resource.uptime).into());
            records.push(record);
        }
        Ok(records)
    }

    /// Voltage and temperature sensor readings.
    pub async fn health(&self) -> Result<Vec<Record>, CoreError> {
        let health = self.client.system_health().await?;
        Ok(health.iter().map(|h| record_for(&self.name, h)).collect())
    }

    /// The administrator-assigned device name.
    pub async fn identity(&self) -> Result<Vec<Record>, CoreError> {
        let identity = self.client.system_identity().await?;
        Ok(identity.iter().map(|i| record_for(&self.name, i)).collect())
    }

    /// Hardware and firmware descriptors.
    pub async fn routerboard(&self) -> Result<Vec<Record>, CoreError> {
        let boards = self.client.system_routerboard().await?;
        Ok(boards.iter().map(|b| record_for(&self.name, b)).collect())
    }

    /// All DHCP server leases.
    pub async fn leases(&self) -> Result<Vec<Record>, CoreError> {
        let leases = self.client.dhcp_leases().await?;
        Ok(leases.iter().map(|l| record_for(&self.name, l)).collect())
    }

    // ── Derived facets ───────────────────────────────────────────────

    /// Total DHCP lease count.
    pub async fn lease_count(&self) -> Result<Vec<Record>, CoreError> {
        let leases = self.client.dhcp_leases().await?;
        Ok(vec![count_record(&self.name, leases.len())])
    }

    /// DHCP leases currently in `bound` state.
    pub async fn bound_lease_count(&self) -> Result<Vec<Record>, CoreError> {
        let leases = self.client.dhcp_leases().await?;
        let bound = leases.iter().filter(|l| l.status == "bound").count();
        Ok(vec![count_record(&self.name, bound)])
    }

    /// Number of configured l2tp-server entries (connected clients).
    pub async fn l2tp_server_count(&self) -> Result<Vec<Record>, CoreError> {
        if !self.facets.l2tp {
            return Ok(Vec::new());
        }
        let servers = self.client.list_l2tp_server().await?;
        Ok(vec![count_record(&self.name, servers.len())])
    }

    // ── Traffic facets ───────────────────────────────────────────────

    /// Traffic samples for running ethernet interfaces. Interface names
    /// with a comment render as `name(comment)`.
    pub async fn interface_traffic(&self) -> Result<Vec<Record>, CoreError> {
        if !self.facets.interface {
            return Ok(Vec::new());
        }
        self.sample_class(InterfaceClass::Ethernet).await
    }

    /// Traffic samples for running wireless interfaces.
    pub async fn wireless_traffic(&self) -> Result<Vec<Record>, CoreError> {
        if !self.facets.wireless {
            return Ok(Vec::new());
        }
        self.sample_class(InterfaceClass::Wireless).await
    }

    /// Traffic samples for running CAPsMAN-managed interfaces.
    pub async fn caps_man_traffic(&self) -> Result<Vec<Record>, CoreError> {
        if !self.facets.caps_man {
            return Ok(Vec::new());
        }
        self.sample_class(InterfaceClass::CapsMan).await
    }

    /// Traffic samples for running GRE tunnels.
    pub async fn gre_traffic(&self) -> Result<Vec<Record>, CoreError> {
        if !self.facets.gre {
            return Ok(Vec::new());
        }
        self.sample_class(InterfaceClass::Gre).await
    }

    /// Traffic samples for running l2tp-server interfaces.
    pub async fn l2tp_server_traffic(&self) -> Result<Vec<Record>, CoreError> {
        if !self.facets.l2tp {
            return Ok(Vec::new());
        }
        self.sample_class(InterfaceClass::L2tpServer).await
    }

    /// List one interface class, then sample each running interface.
    ///
    /// The per-interface calls stay strictly sequential: each is a
    /// blocking round trip and the device connection is not meant for
    /// concurrent use.
    async fn sample_class(&self, class: InterfaceClass) -> Result<Vec<Record>, CoreError> {
        let interfaces = match class {
            InterfaceClass::Ethernet => self.client.list_ethernet().await?,
            InterfaceClass::Wireless => self.client.list_wireless().await?,
            InterfaceClass::CapsMan => self.client.list_caps_man().await?,
            InterfaceClass::Gre => self.client.list_gre().await?,
            InterfaceClass::L2tpServer => self.client.list_l2tp_server().await?,
        };
        let decorate = matches!(class, InterfaceClass::Ethernet);

        let mut records = Vec::new();
        for interface in interfaces.into_iter().filter(InterfaceEntry::is_running) {
            let Some(mut sample) = self
                .client
                .monitor_traffic(&interface.name)
                .await?
                .into_iter()
                .next()
            else {
                warn!(device = %self.name, interface = %interface.name,
                    "empty monitor-traffic response");
                continue;
            };
            if sample.name.is_empty() {
                sample.name.clone_from(&interface.name);
            }
            if decorate {
                if let Some(comment) = interface.comment.as_deref().filter(|c| !c.is_empty()) {
                    sample.name = format!("{}({comment})", interface.name);
                }
            }
            records.push(record_for(&self.name, &sample));
        }
        Ok(records)
    }
}

fn tls_mode(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
