// ── Collection cycle orchestration ──
//
// One cycle per inbound scrape: gather every facet across the fleet,
// shape the catalog's series, trigger the reconnect pass, return. The
// fleet mutex serializes overlapping scrapes; a cycle always runs to
// completion with per-device failures absorbed along the way.

use tokio::sync::Mutex;
use tracing::debug;

use crate::catalog::{self, SeriesSource};
use crate::convert::Record;
use crate::fleet::Fleet;
use crate::session::Facet;
use crate::shape::MetricSeries;

/// Per-cycle record lists, one per catalog source.
///
/// The "wifi" logical facet is caps-man traffic followed by wireless
/// traffic; everything else maps one-to-one onto a session facet.
pub(crate) struct CycleData {
    interface_traffic: Vec<Record>,
    wifi_traffic: Vec<Record>,
    gre_traffic: Vec<Record>,
    l2tp_server_traffic: Vec<Record>,
    l2tp_server_count: Vec<Record>,
    resources: Vec<Record>,
    health: Vec<Record>,
    dhcp_lease_count: Vec<Record>,
    dhcp_bound_lease_count: Vec<Record>,
    identity: Vec<Record>,
    routerboard: Vec<Record>,
}

impl CycleData {
    /// Gather every facet the catalog needs, one facet at a time. Each
    /// facet is independently fault-isolated by the fleet.
    pub(crate) async fn gather(fleet: &mut Fleet) -> Self {
        let interface_traffic = fleet.collect(Facet::InterfaceTraffic).await;
        let mut wifi_traffic = fleet.collect(Facet::CapsManTraffic).await;
        wifi_traffic.extend(fleet.collect(Facet::WirelessTraffic).await);
        let gre_traffic = fleet.collect(Facet::GreTraffic).await;
        let l2tp_server_traffic = fleet.collect(Facet::L2tpServerTraffic).await;
        let l2tp_server_count = fleet.collect(Facet::L2tpServerCount).await;
        let resources = fleet.collect(Facet::Resources).await;
        let health = fleet.collect(Facet::Health).await;
        let dhcp_lease_count = fleet.collect(Facet::DhcpLeaseCount).await;
        let dhcp_bound_lease_count = fleet.collect(Facet::DhcpBoundLeaseCount).await;
        let identity = fleet.collect(Facet::Identity).await;
        let routerboard = fleet.collect(Facet::Routerboard).await;

        Self {
            interface_traffic,
            wifi_traffic,
            gre_traffic,
            l2tp_server_traffic,
            l2tp_server_count,
            resources,
            health,
            dhcp_lease_count,
            dhcp_bound_lease_count,
            identity,
            routerboard,
        }
    }

    pub(crate) fn records(&self, source: SeriesSource) -> &[Record] {
        match source {
            SeriesSource::InterfaceTraffic => &self.interface_traffic,
            SeriesSource::WifiTraffic => &self.wifi_traffic,
            SeriesSource::GreTraffic => &self.gre_traffic,
            SeriesSource::L2tpServerTraffic => &self.l2tp_server_traffic,
            SeriesSource::L2tpServerCount => &self.l2tp_server_count,
            SeriesSource::Resources => &self.resources,
            SeriesSource::Health => &self.health,
            SeriesSource::DhcpLeaseCount => &self.dhcp_lease_count,
            SeriesSource::DhcpBoundLeaseCount => &self.dhcp_bound_lease_count,
            SeriesSource::Identity => &self.identity,
            SeriesSource::Routerboard => &self.routerboard,
        }
    }
}

/// The per-scrape entry point.
pub struct MetricsCollector {
    fleet: Mutex<Fleet>,
}

impl MetricsCollector {
    pub fn new(fleet: Fleet) -> Self {
        Self {
            fleet: Mutex::new(fleet),
        }
    }

    /// Run one full collection cycle and return the ordered series list.
    ///
    /// Steps: gather per-facet records, build the catalog's series in
    /// fixed order, trigger the unconditional reconnect pass, return.
    pub async fn collect_cycle(&self) -> Vec<MetricSeries> {
        let mut fleet = self.fleet.lock().await;
        debug!("collection cycle started");

        let data = CycleData::gather(&mut fleet).await;
        let series = catalog::build_series(&data);

        fleet.reconnect_all().await;
        debug!(series = series.len(), "collection cycle finished");
        series
    }
}
