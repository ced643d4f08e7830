#![allow(clippy::unwrap_used)]
// Integration tests for the collection pipeline, with wiremock standing in
// for RouterOS devices.

use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use roswatch_core::{
    DeviceConfig, DeviceSession, Facet, FacetFlags, Fleet, GaugeSeries, InfoSeries,
    MetricSeries, MetricsCollector, TlsVerification,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn device_config(name: &str, uri: &str, facets: FacetFlags) -> DeviceConfig {
    DeviceConfig {
        name: name.into(),
        url: uri.parse().unwrap(),
        username: "prometheus".into(),
        password: SecretString::from("secret".to_string()),
        tls: TlsVerification::SystemDefaults,
        timeout: Duration::from_secs(1),
        facets,
    }
}

async fn mock_get(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mock_traffic(server: &MockServer, interface: &str, rx: &str, tx: &str) {
    Mock::given(method("POST"))
        .and(path("/rest/interface/monitor-traffic"))
        .and(body_partial_json(json!({ "interface": interface })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "name": interface,
            "rx-bits-per-second": rx,
            "tx-bits-per-second": tx
        }])))
        .mount(server)
        .await;
}

/// Mount every endpoint an `interface`-only device needs for a full cycle.
async fn mount_router(server: &MockServer, identity: &str) {
    mock_get(server, "/rest/system/identity", json!({ "name": identity })).await;
    mock_get(
        server,
        "/rest/system/resource",
        json!({
            "uptime": "1w2d3h4m5s",
            "version": "7.14.2",
            "free-memory": "225443840",
            "total-memory": "268435456",
            "cpu-count": "4",
            "cpu-load": "7",
            "free-hdd-space": "4907008",
            "total-hdd-space": "16777216",
            "architecture-name": "arm64",
            "board-name": "RB5009UG+S+",
            "platform": "MikroTik"
        }),
    )
    .await;
    mock_get(
        server,
        "/rest/system/health",
        json!([{ "voltage": "24.1", "temperature": "41" }]),
    )
    .await;
    mock_get(
        server,
        "/rest/system/routerboard",
        json!({
            "routerboard": "true",
            "model": "RB5009UG+S+",
            "board-name": "RB5009UG+S+",
            "serial-number": "HCV08AAAAAA",
            "firmware-type": "al64",
            "factory-firmware": "7.4.1",
            "current-firmware": "7.14.2",
            "upgrade-firmware": "7.14.2"
        }),
    )
    .await;
    mock_get(
        server,
        "/rest/ip/dhcp-server/lease",
        json!([
            { "address": "192.168.88.10", "mac-address": "AA:BB:CC:00:00:01",
              "status": "bound", "host-name": "nas" },
            { "address": "192.168.88.11", "mac-address": "AA:BB:CC:00:00:02",
              "status": "waiting" }
        ]),
    )
    .await;
    mock_get(
        server,
        "/rest/interface/ethernet",
        json!([
            { "name": "ether1", "running": "true", "comment": "uplink" },
            { "name": "ether2", "running": "false" }
        ]),
    )
    .await;
    mock_traffic(server, "ether1", "1048576", "524288").await;
}

fn interface_only() -> FacetFlags {
    FacetFlags {
        interface: true,
        ..FacetFlags::default()
    }
}

fn find_gauge<'a>(series: &'a [MetricSeries], name: &str) -> &'a GaugeSeries {
    series
        .iter()
        .find_map(|s| match s {
            MetricSeries::Gauge(g) if g.name == name => Some(g),
            MetricSeries::Gauge(_) | MetricSeries::Info(_) => None,
        })
        .unwrap_or_else(|| panic!("missing gauge series {name}"))
}

fn find_info<'a>(series: &'a [MetricSeries], name: &str) -> &'a InfoSeries {
    series
        .iter()
        .find_map(|s| match s {
            MetricSeries::Info(i) if i.name == name => Some(i),
            MetricSeries::Gauge(_) | MetricSeries::Info(_) => None,
        })
        .unwrap_or_else(|| panic!("missing info series {name}"))
}

/// Every label value of every sample across all series.
fn all_label_values(series: &[MetricSeries]) -> Vec<String> {
    let mut values = Vec::new();
    for entry in series {
        match entry {
            MetricSeries::Gauge(g) => {
                for sample in &g.samples {
                    values.extend(sample.label_values.iter().cloned());
                }
            }
            MetricSeries::Info(i) => {
                for sample in &i.samples {
                    values.extend(sample.iter().cloned());
                }
            }
        }
    }
    values
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.unwrap().len()
}

// ── Single healthy device ───────────────────────────────────────────

#[tokio::test]
async fn cycle_shapes_the_full_catalog() {
    let server = MockServer::start().await;
    mount_router(&server, "gw-core").await;

    let session = DeviceSession::connect(device_config("routerA", &server.uri(), interface_only()))
        .await
        .unwrap();
    let collector = MetricsCollector::new(Fleet::new(vec![session]));

    let series = collector.collect_cycle().await;

    // catalog order is fixed: gauges first, infos last
    assert_eq!(series.len(), 20);
    assert_eq!(series[0].name(), "routeros_rx_bits_per_second");
    assert_eq!(series[19].name(), "routeros_routerboard");

    let rx = find_gauge(&series, "routeros_rx_bits_per_second");
    assert_eq!(rx.label_names, vec!["name", "routerboard_name"]);
    assert_eq!(rx.samples.len(), 1);
    assert_eq!(rx.samples[0].label_values, vec!["ether1(uplink)", "routerA"]);
    assert_eq!(rx.samples[0].value, 1_048_576.0);

    let tx = find_gauge(&series, "routeros_tx_bits_per_second");
    assert_eq!(tx.samples[0].value, 524_288.0);

    // uptime is parsed into seconds before shaping
    let uptime = find_gauge(&series, "routeros_uptime");
    assert_eq!(uptime.samples[0].value, 788_645.0);

    let free_memory = find_gauge(&series, "routeros_free_memory");
    assert_eq!(free_memory.samples[0].value, 225_443_840.0);

    let voltage = find_gauge(&series, "routeros_routerboard_voltage");
    assert_eq!(voltage.samples[0].value, 24.1);

    let leases = find_gauge(&series, "routeros_dhcp_lease_count");
    assert_eq!(leases.samples[0].value, 2.0);
    let bound = find_gauge(&series, "routeros_dhcp_bound_lease_count");
    assert_eq!(bound.samples[0].value, 1.0);

    // disabled facets shape to empty series, not missing ones
    let wifi = find_gauge(&series, "routeros_wifi_rx_bits_per_second");
    assert!(wifi.samples.is_empty());

    let identity = find_info(&series, "routeros_system_identity");
    assert_eq!(identity.samples, vec![vec!["gw-core", "routerA"]]);

    let board = find_info(&series, "routeros_routerboard");
    assert_eq!(
        board.samples,
        vec![vec![
            "true",
            "RB5009UG+S+",
            "RB5009UG+S+",
            "HCV08AAAAAA",
            "al64",
            "7.4.1",
            "7.14.2",
            "7.14.2",
            "routerA",
        ]]
    );
}

// ── Failure isolation ───────────────────────────────────────────────

#[tokio::test]
async fn scrape_survives_a_device_going_dark() {
    let server_a = MockServer::start().await;
    mount_router(&server_a, "gw-a").await;
    let server_b = MockServer::start().await;
    mount_router(&server_b, "gw-b").await;

    let a = DeviceSession::connect(device_config("routerA", &server_a.uri(), interface_only()))
        .await
        .unwrap();
    let b = DeviceSession::connect(device_config("routerB", &server_b.uri(), interface_only()))
        .await
        .unwrap();

    // routerB goes dark right after its initial connect
    server_b.reset().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server_b)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server_b)
        .await;

    let collector = MetricsCollector::new(Fleet::new(vec![a, b]));
    let first = collector.collect_cycle().await;

    // routerA's data is intact, routerB contributes nothing
    let rx = find_gauge(&first, "routeros_rx_bits_per_second");
    assert_eq!(rx.samples.len(), 1);
    assert_eq!(rx.samples[0].label_values, vec!["ether1(uplink)", "routerA"]);
    assert!(!all_label_values(&first).contains(&"routerB".to_string()));

    // the first failed call marked routerB disconnected: cycle one touched
    // it twice (the failing interface listing, then the reconnect probe)
    let after_first = request_count(&server_b).await;
    assert_eq!(after_first, 2);
    let probes = server_b.received_requests().await.unwrap();
    assert_eq!(probes.last().unwrap().url.path(), "/rest/system/identity");

    // second cycle: routerB is skipped entirely; only the reconnect probe
    // reaches it, and the output is unchanged
    let second = collector.collect_cycle().await;
    assert_eq!(first, second);
    assert_eq!(request_count(&server_b).await, after_first + 1);
}

#[tokio::test]
async fn reconnect_restores_a_recovered_device() {
    let server_a = MockServer::start().await;
    mount_router(&server_a, "gw-a").await;
    let server_b = MockServer::start().await;
    mount_router(&server_b, "gw-b").await;

    let a = DeviceSession::connect(device_config("routerA", &server_a.uri(), interface_only()))
        .await
        .unwrap();
    let b = DeviceSession::connect(device_config("routerB", &server_b.uri(), interface_only()))
        .await
        .unwrap();

    server_b.reset().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server_b)
        .await;

    let collector = MetricsCollector::new(Fleet::new(vec![a, b]));
    let dark = collector.collect_cycle().await;
    assert!(!all_label_values(&dark).contains(&"routerB".to_string()));

    // routerB comes back; the end-of-cycle reconnect pass picks it up
    server_b.reset().await;
    mount_router(&server_b, "gw-b").await;
    let transitional = collector.collect_cycle().await;
    assert!(!all_label_values(&transitional).contains(&"routerB".to_string()));

    let recovered = collector.collect_cycle().await;
    let rx = find_gauge(&recovered, "routeros_rx_bits_per_second");
    assert_eq!(rx.samples.len(), 2);
    // sample order follows session registration order
    assert_eq!(rx.samples[0].label_values, vec!["ether1(uplink)", "routerA"]);
    assert_eq!(rx.samples[1].label_values, vec!["ether1(uplink)", "routerB"]);
}

// ── Fleet-level aggregation ─────────────────────────────────────────

#[tokio::test]
async fn collect_concatenates_in_registration_order() {
    let server_a = MockServer::start().await;
    mount_router(&server_a, "gw-a").await;
    let server_b = MockServer::start().await;
    mount_router(&server_b, "gw-b").await;

    let a = DeviceSession::connect(device_config("routerA", &server_a.uri(), interface_only()))
        .await
        .unwrap();
    let b = DeviceSession::connect(device_config("routerB", &server_b.uri(), interface_only()))
        .await
        .unwrap();
    let mut fleet = Fleet::new(vec![a, b]);

    let identities = fleet.collect(Facet::Identity).await;

    assert_eq!(identities.len(), 2);
    assert_eq!(identities[0].get("routerboard_name").unwrap(), "routerA");
    assert_eq!(identities[0].get("name").unwrap(), "gw-a");
    assert_eq!(identities[1].get("routerboard_name").unwrap(), "routerB");

    // raw leases are available as a facet even though only the derived
    // counts appear in the catalog
    let leases = fleet.collect(Facet::DhcpLeases).await;
    assert_eq!(leases.len(), 4);
    assert_eq!(leases[0].get("mac_address").unwrap(), "AA:BB:CC:00:00:01");
}

// ── Facet gating ────────────────────────────────────────────────────

#[tokio::test]
async fn disabled_facet_is_empty_and_never_contacts_the_device() {
    let server = MockServer::start().await;
    mock_get(&server, "/rest/system/identity", json!({ "name": "gw" })).await;
    // the device would happily answer, were it asked
    mock_get(
        &server,
        "/rest/interface/wireless",
        json!([{ "name": "wlan1", "running": "true" }]),
    )
    .await;

    let session = DeviceSession::connect(device_config("gw", &server.uri(), FacetFlags::default()))
        .await
        .unwrap();

    let records = session.fetch(Facet::WirelessTraffic).await.unwrap();
    assert!(records.is_empty());
    let count = session.fetch(Facet::L2tpServerCount).await.unwrap();
    assert!(count.is_empty());

    let hits = server.received_requests().await.unwrap();
    assert!(
        hits.iter().all(|r| r.url.path() == "/rest/system/identity"),
        "gated facets must not touch the device"
    );
}

// ── Wifi merge ──────────────────────────────────────────────────────

#[tokio::test]
async fn wifi_series_concatenates_caps_man_then_wireless() {
    let server = MockServer::start().await;
    mount_router(&server, "gw").await;
    mock_get(
        &server,
        "/rest/caps-man/interface",
        json!([{ "name": "cap1", "running": "true" }]),
    )
    .await;
    mock_get(
        &server,
        "/rest/interface/wireless",
        json!([{ "name": "wlan1", "running": "true" }]),
    )
    .await;
    mock_traffic(&server, "cap1", "2000", "1000").await;
    mock_traffic(&server, "wlan1", "4000", "3000").await;

    let facets = FacetFlags {
        interface: true,
        wireless: true,
        caps_man: true,
        ..FacetFlags::default()
    };
    let session = DeviceSession::connect(device_config("routerA", &server.uri(), facets))
        .await
        .unwrap();
    let collector = MetricsCollector::new(Fleet::new(vec![session]));

    let series = collector.collect_cycle().await;
    let wifi = find_gauge(&series, "routeros_wifi_rx_bits_per_second");

    assert_eq!(wifi.samples.len(), 2);
    assert_eq!(wifi.samples[0].label_values, vec!["cap1", "routerA"]);
    assert_eq!(wifi.samples[0].value, 2000.0);
    assert_eq!(wifi.samples[1].label_values, vec!["wlan1", "routerA"]);
    assert_eq!(wifi.samples[1].value, 4000.0);
}

// ── Startup policy ──────────────────────────────────────────────────

#[tokio::test]
async fn initial_connect_failure_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result =
        DeviceSession::connect(device_config("gw", &server.uri(), FacetFlags::default())).await;

    match result {
        Err(err) => assert!(err.to_string().contains("cannot connect to gw")),
        Ok(_) => panic!("expected initial connect to fail"),
    }
}
