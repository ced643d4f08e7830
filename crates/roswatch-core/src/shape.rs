// ── Metric shaping ──
//
// Turns a list of normalized records plus a value field and label fields
// into one metric series. Two default policies, never to be swapped: a
// gauge whose record lacks the value field reads 0, an info sample whose
// record lacks a label field reads "".

use serde_json::Value;

use crate::convert::Record;

/// Namespace prefix applied to every emitted metric name.
pub const METRIC_PREFIX: &str = "routeros";

/// The device-name label attached to every sample.
pub const DEVICE_LABEL: &str = "routerboard_name";

/// One metric series produced per cycle: a numeric gauge or a
/// descriptive info series.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricSeries {
    Gauge(GaugeSeries),
    Info(InfoSeries),
}

impl MetricSeries {
    /// The fully-prefixed metric name.
    pub fn name(&self) -> &str {
        match self {
            Self::Gauge(g) => &g.name,
            Self::Info(i) => &i.name,
        }
    }
}

/// A sampled numeric series.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeSeries {
    pub name: String,
    pub help: String,
    pub label_names: Vec<String>,
    pub samples: Vec<GaugeSample>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GaugeSample {
    pub label_values: Vec<String>,
    pub value: f64,
}

/// A series whose "value" is a set of descriptive label-value pairs.
/// Rendered as a `{name}_info` gauge fixed at 1 by the exposition layer.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoSeries {
    pub name: String,
    pub help: String,
    pub label_names: Vec<String>,
    /// One entry per record, aligned with `label_names`.
    pub samples: Vec<Vec<String>>,
}

/// Shape records into a gauge series.
///
/// The label set is always `label_fields` + the device label, values read
/// in that fixed order. A missing label renders as `""`; a missing or
/// non-numeric value field reads 0.
pub fn make_gauge(
    name: &str,
    help: &str,
    records: &[Record],
    value_field: &str,
    label_fields: &[&str],
) -> GaugeSeries {
    let label_names = full_label_set(label_fields);
    let samples = records
        .iter()
        .map(|record| GaugeSample {
            label_values: label_names.iter().map(|l| label_value(record, l)).collect(),
            value: numeric_value(record, value_field),
        })
        .collect();

    GaugeSeries {
        name: format!("{METRIC_PREFIX}_{name}"),
        help: help.to_owned(),
        label_names,
        samples,
    }
}

/// Shape records into an info series.
///
/// Same label policy as gauges; each record becomes one sample whose
/// missing fields default to the empty string.
pub fn make_info(name: &str, help: &str, records: &[Record], label_fields: &[&str]) -> InfoSeries {
    let label_names = full_label_set(label_fields);
    let samples = records
        .iter()
        .map(|record| label_names.iter().map(|l| label_value(record, l)).collect())
        .collect();

    InfoSeries {
        name: format!("{METRIC_PREFIX}_{name}"),
        help: help.to_owned(),
        label_names,
        samples,
    }
}

fn full_label_set(label_fields: &[&str]) -> Vec<String> {
    label_fields
        .iter()
        .map(|l| (*l).to_owned())
        .chain(std::iter::once(DEVICE_LABEL.to_owned()))
        .collect()
}

fn label_value(record: &Record, field: &str) -> String {
    match record.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn numeric_value(record: &Record, field: &str) -> f64 {
    match record.get(field) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}
