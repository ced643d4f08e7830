// Wire-value conversions
//
// Typed API models become generic records here: field names normalized
// hyphen-to-underscore, every record tagged with its device name. The
// generic mapping only exists for pass-through label rendering in the
// shaper; everything upstream of this module is strongly typed.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// One normalized device record: an attribute mapping from underscored
/// field names to scalar values, always carrying `routerboard_name`.
pub type Record = serde_json::Map<String, Value>;

/// Normalize a RouterOS wire key to a metrics-model attribute name.
pub fn normalize_key(key: &str) -> String {
    key.replace('-', "_")
}

/// Build a record from a typed API model, tagged with the device name.
///
/// Null fields (absent optionals) are dropped so that downstream "missing
/// field" defaults apply, matching records the device never sent.
pub(crate) fn record_for<T: Serialize>(device: &str, value: &T) -> Record {
    let mut record = Record::new();
    record.insert("routerboard_name".into(), Value::String(device.to_owned()));
    if let Ok(Value::Object(fields)) = serde_json::to_value(value) {
        for (key, field) in fields {
            if !field.is_null() {
                record.insert(normalize_key(&key), field);
            }
        }
    }
    record
}

/// Build a single-record count result (lease counts, l2tp-server count).
pub(crate) fn count_record(device: &str, count: usize) -> Record {
    let mut record = Record::new();
    record.insert("routerboard_name".into(), Value::from(device));
    record.insert("count".into(), Value::from(count));
    record
}

/// Convert a RouterOS compound uptime string to seconds.
///
/// The device formats uptime as `[Nw][Nd][Nh][Nm][Ns]` with any component
/// absent (`1w2d3h4m5s`, `10s`, ...). Empty or malformed input yields 0.0
/// rather than failing the cycle.
pub fn uptime_seconds(raw: &str) -> f64 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0.0;
    }
    match humantime::parse_duration(raw) {
        Ok(duration) => duration.as_secs_f64(),
        Err(err) => {
            debug!(uptime = raw, error = %err, "unparseable uptime value");
            0.0
        }
    }
}
