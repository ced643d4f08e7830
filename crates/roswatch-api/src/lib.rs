// roswatch-api: Async Rust client for the MikroTik RouterOS REST API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

mod dhcp;
mod interface;
mod system;

pub use client::RosClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
