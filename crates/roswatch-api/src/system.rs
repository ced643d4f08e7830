// System endpoints
//
// Device-level state: resources, health sensors, identity, routerboard
// hardware info.

use tracing::debug;

use crate::client::RosClient;
use crate::error::Error;
use crate::models::{HealthStatus, Identity, Routerboard, SystemResource};

impl RosClient {
    /// Get memory/CPU/disk/uptime figures.
    ///
    /// `GET /rest/system/resource`
    pub async fn system_resource(&self) -> Result<Vec<SystemResource>, Error> {
        debug!("fetching system resource");
        self.get("system/resource").await
    }

    /// Get voltage and temperature sensor readings.
    ///
    /// `GET /rest/system/health`
    pub async fn system_health(&self) -> Result<Vec<HealthStatus>, Error> {
        debug!("fetching system health");
        self.get("system/health").await
    }

    /// Get the administrator-assigned device name.
    ///
    /// `GET /rest/system/identity`
    ///
    /// Also used as the cheap reachability probe for connect/reconnect.
    pub async fn system_identity(&self) -> Result<Vec<Identity>, Error> {
        debug!("fetching system identity");
        self.get("system/identity").await
    }

    /// Get hardware and firmware descriptors.
    ///
    /// `GET /rest/system/routerboard`
    pub async fn system_routerboard(&self) -> Result<Vec<Routerboard>, Error> {
        debug!("fetching routerboard info");
        self.get("system/routerboard").await
    }
}
