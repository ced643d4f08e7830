// ── Metric catalog ──
//
// The fixed set of emitted series as a declarative table: adding a metric
// is a data change here, not a control-flow change in the collector.
// Emission order is table order.

use crate::collector::CycleData;
use crate::shape::{MetricSeries, make_gauge, make_info};

/// Which gathered record list feeds a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SeriesSource {
    InterfaceTraffic,
    WifiTraffic,
    GreTraffic,
    L2tpServerTraffic,
    L2tpServerCount,
    Resources,
    Health,
    DhcpLeaseCount,
    DhcpBoundLeaseCount,
    Identity,
    Routerboard,
}

pub(crate) struct GaugeSpec {
    pub name: &'static str,
    pub help: &'static str,
    pub source: SeriesSource,
    pub value_field: &'static str,
    pub labels: &'static [&'static str],
}

pub(crate) struct InfoSpec {
    pub name: &'static str,
    pub help: &'static str,
    pub source: SeriesSource,
    pub labels: &'static [&'static str],
}

pub(crate) const GAUGES: &[GaugeSpec] = &[
    GaugeSpec {
        name: "rx_bits_per_second",
        help: "rx_bits_per_second from monitor_traffic",
        source: SeriesSource::InterfaceTraffic,
        value_field: "rx_bits_per_second",
        labels: &["name"],
    },
    GaugeSpec {
        name: "tx_bits_per_second",
        help: "tx_bits_per_second from monitor_traffic",
        source: SeriesSource::InterfaceTraffic,
        value_field: "tx_bits_per_second",
        labels: &["name"],
    },
    GaugeSpec {
        name: "wifi_rx_bits_per_second",
        help: "rx_bits_per_second from monitor_traffic",
        source: SeriesSource::WifiTraffic,
        value_field: "rx_bits_per_second",
        labels: &["name"],
    },
    GaugeSpec {
        name: "wifi_tx_bits_per_second",
        help: "tx_bits_per_second from monitor_traffic",
        source: SeriesSource::WifiTraffic,
        value_field: "tx_bits_per_second",
        labels: &["name"],
    },
    GaugeSpec {
        name: "gre_rx_bits_per_second",
        help: "rx_bits_per_second from monitor_traffic",
        source: SeriesSource::GreTraffic,
        value_field: "rx_bits_per_second",
        labels: &["name"],
    },
    GaugeSpec {
        name: "gre_tx_bits_per_second",
        help: "tx_bits_per_second from monitor_traffic",
        source: SeriesSource::GreTraffic,
        value_field: "tx_bits_per_second",
        labels: &["name"],
    },
    GaugeSpec {
        name: "l2tp_server_rx_bits_per_second",
        help: "rx_bits_per_second from monitor_traffic",
        source: SeriesSource::L2tpServerTraffic,
        value_field: "rx_bits_per_second",
        labels: &["name"],
    },
    GaugeSpec {
        name: "l2tp_server_tx_bits_per_second",
        help: "tx_bits_per_second from monitor_traffic",
        source: SeriesSource::L2tpServerTraffic,
        value_field: "tx_bits_per_second",
        labels: &["name"],
    },
    GaugeSpec {
        name: "l2tp_server_count",
        help: "client counter on the server",
        source: SeriesSource::L2tpServerCount,
        value_field: "count",
        labels: &[],
    },
    GaugeSpec {
        name: "free_memory",
        help: "free_memory",
        source: SeriesSource::Resources,
        value_field: "free_memory",
        labels: &[],
    },
    GaugeSpec {
        name: "total_memory",
        help: "total_memory",
        source: SeriesSource::Resources,
        value_field: "total_memory",
        labels: &[],
    },
    GaugeSpec {
        name: "cpu_load",
        help: "cpu_load",
        source: SeriesSource::Resources,
        value_field: "cpu_load",
        labels: &[],
    },
    GaugeSpec {
        name: "free_hdd_space",
        help: "free_hdd_space",
        source: SeriesSource::Resources,
        value_field: "free_hdd_space",
        labels: &[],
    },
    GaugeSpec {
        name: "uptime",
        help: "uptime(seconds)",
        source: SeriesSource::Resources,
        value_field: "uptime",
        labels: &[],
    },
    GaugeSpec {
        name: "routerboard_voltage",
        help: "routerboard_voltage",
        source: SeriesSource::Health,
        value_field: "voltage",
        labels: &[],
    },
    GaugeSpec {
        name: "routerboard_temperature",
        help: "routerboard_temperature",
        source: SeriesSource::Health,
        value_field: "temperature",
        labels: &[],
    },
    GaugeSpec {
        name: "dhcp_lease_count",
        help: "dhcp_lease_count",
        source: SeriesSource::DhcpLeaseCount,
        value_field: "count",
        labels: &[],
    },
    GaugeSpec {
        name: "dhcp_bound_lease_count",
        help: "dhcp_bound_lease_count",
        source: SeriesSource::DhcpBoundLeaseCount,
        value_field: "count",
        labels: &[],
    },
];

pub(crate) const INFOS: &[InfoSpec] = &[
    InfoSpec {
        name: "system_identity",
        help: "system_identity",
        source: SeriesSource::Identity,
        labels: &["name"],
    },
    InfoSpec {
        name: "routerboard",
        help: "routerboard_info",
        source: SeriesSource::Routerboard,
        labels: &[
            "routerboard",
            "board_name",
            "model",
            "serial_number",
            "firmware_type",
            "factory_firmware",
            "current_firmware",
            "upgrade_firmware",
        ],
    },
];

/// Build the full ordered series list for one cycle's gathered data.
pub(crate) fn build_series(data: &CycleData) -> Vec<MetricSeries> {
    let mut series = Vec::with_capacity(GAUGES.len() + INFOS.len());
    for spec in GAUGES {
        series.push(MetricSeries::Gauge(make_gauge(
            spec.name,
            spec.help,
            data.records(spec.source),
            spec.value_field,
            spec.labels,
        )));
    }
    for spec in INFOS {
        series.push(MetricSeries::Info(make_info(
            spec.name,
            spec.help,
            data.records(spec.source),
            spec.labels,
        )));
    }
    series
}
