// DHCP server endpoints

use tracing::debug;

use crate::client::RosClient;
use crate::error::Error;
use crate::models::DhcpLease;

impl RosClient {
    /// List all DHCP server leases.
    ///
    /// `GET /rest/ip/dhcp-server/lease`
    pub async fn dhcp_leases(&self) -> Result<Vec<DhcpLease>, Error> {
        debug!("fetching DHCP leases");
        self.get("ip/dhcp-server/lease").await
    }
}
