// roswatch-core: the collection-and-exposition pipeline.
//
// One DeviceSession per configured routerboard, a Fleet that aggregates
// across them with per-device failure isolation, a shaper that turns
// normalized records into labeled series, and a collector that runs one
// full cycle per scrape.

mod catalog;

pub mod collector;
pub mod config;
pub mod convert;
pub mod error;
pub mod fleet;
pub mod session;
pub mod shape;

pub use collector::MetricsCollector;
pub use config::{DeviceConfig, FacetFlags, TlsVerification};
pub use convert::Record;
pub use error::CoreError;
pub use fleet::Fleet;
pub use session::{DeviceSession, Facet};
pub use shape::{GaugeSample, GaugeSeries, InfoSeries, MetricSeries};
