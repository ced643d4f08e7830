// Prometheus exposition of the core's series model.
//
// A fresh registry per scrape: each collection cycle produces a complete
// series list, so nothing stays registered between scrapes and a vanished
// device simply stops appearing. Series with no samples are omitted
// entirely -- the text encoder rejects sample-less families.

use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};

use roswatch_core::{GaugeSeries, InfoSeries, MetricSeries};

/// Render a cycle's series list to the Prometheus text format.
pub fn encode(series: &[MetricSeries]) -> Result<String, prometheus::Error> {
    let registry = Registry::new();
    for entry in series {
        match entry {
            MetricSeries::Gauge(gauge) if !gauge.samples.is_empty() => {
                register_gauge(&registry, gauge)?;
            }
            MetricSeries::Info(info) if !info.samples.is_empty() => {
                register_info(&registry, info)?;
            }
            MetricSeries::Gauge(_) | MetricSeries::Info(_) => {}
        }
    }

    let mut buffer = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|err| prometheus::Error::Msg(err.to_string()))
}

fn register_gauge(registry: &Registry, series: &GaugeSeries) -> Result<(), prometheus::Error> {
    let label_names: Vec<&str> = series.label_names.iter().map(String::as_str).collect();
    let vec = GaugeVec::new(
        Opts::new(series.name.as_str(), series.help.as_str()),
        &label_names,
    )?;
    for sample in &series.samples {
        let values: Vec<&str> = sample.label_values.iter().map(String::as_str).collect();
        vec.with_label_values(&values).set(sample.value);
    }
    registry.register(Box::new(vec))
}

fn register_info(registry: &Registry, series: &InfoSeries) -> Result<(), prometheus::Error> {
    // Info metrics follow the Prometheus convention: a `{name}_info`
    // gauge fixed at 1 whose labels carry the descriptive values.
    let label_names: Vec<&str> = series.label_names.iter().map(String::as_str).collect();
    let vec = GaugeVec::new(
        Opts::new(format!("{}_info", series.name), series.help.as_str()),
        &label_names,
    )?;
    for sample in &series.samples {
        let values: Vec<&str> = sample.iter().map(String::as_str).collect();
        vec.with_label_values(&values).set(1.0);
    }
    registry.register(Box::new(vec))
}
