use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A device could not be reached at session construction time.
    /// Fatal for startup: the process refuses to run with a device it
    /// has never seen.
    #[error("cannot connect to {device}: {reason}")]
    ConnectionFailed { device: String, reason: String },

    /// A device call failed mid-cycle. Absorbed by the fleet layer.
    #[error(transparent)]
    Api(#[from] roswatch_api::Error),
}

impl CoreError {
    /// Whether this failure means the device connection is gone, as
    /// opposed to the device rejecting one request. The fleet only
    /// marks a session disconnected for the former; a per-request
    /// rejection (e.g. a package missing on one board) should not blank
    /// out every other facet until the next reconnect.
    pub fn is_connection_lost(&self) -> bool {
        match self {
            Self::ConnectionFailed { .. } => true,
            Self::Api(err) => err.is_transient(),
        }
    }
}
