// Interface endpoints
//
// Listings for each interface class plus the monitor-traffic action used
// for point-in-time throughput sampling.

use serde_json::json;
use tracing::debug;

use crate::client::RosClient;
use crate::error::Error;
use crate::models::{InterfaceEntry, TrafficSample};

impl RosClient {
    /// List ethernet interfaces.
    ///
    /// `GET /rest/interface/ethernet`
    pub async fn list_ethernet(&self) -> Result<Vec<InterfaceEntry>, Error> {
        debug!("listing ethernet interfaces");
        self.get("interface/ethernet").await
    }

    /// List wireless interfaces.
    ///
    /// `GET /rest/interface/wireless`
    pub async fn list_wireless(&self) -> Result<Vec<InterfaceEntry>, Error> {
        debug!("listing wireless interfaces");
        self.get("interface/wireless").await
    }

    /// List CAPsMAN-managed interfaces.
    ///
    /// `GET /rest/caps-man/interface`
    pub async fn list_caps_man(&self) -> Result<Vec<InterfaceEntry>, Error> {
        debug!("listing caps-man interfaces");
        self.get("caps-man/interface").await
    }

    /// List GRE tunnel interfaces.
    ///
    /// `GET /rest/interface/gre`
    pub async fn list_gre(&self) -> Result<Vec<InterfaceEntry>, Error> {
        debug!("listing gre interfaces");
        self.get("interface/gre").await
    }

    /// List L2TP server interfaces (one per connected client).
    ///
    /// `GET /rest/interface/l2tp-server`
    pub async fn list_l2tp_server(&self) -> Result<Vec<InterfaceEntry>, Error> {
        debug!("listing l2tp-server interfaces");
        self.get("interface/l2tp-server").await
    }

    /// Take a single traffic sample for one interface.
    ///
    /// `POST /rest/interface/monitor-traffic` with `{interface, once}`.
    /// One blocking round trip per interface; the caller sequences these.
    pub async fn monitor_traffic(&self, interface: &str) -> Result<Vec<TrafficSample>, Error> {
        debug!(interface, "sampling traffic");
        self.call(
            "interface",
            "monitor-traffic",
            &json!({ "interface": interface, "once": true }),
        )
        .await
    }
}
