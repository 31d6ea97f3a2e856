//! Tracing setup: console logging plus optional OTLP trace export.
//!
//! Log verbosity follows `RUST_LOG` (default `info`). OTLP export is off unless
//! `enable_otel_export: true` is set in the config file, and is then configured by the standard
//! OpenTelemetry environment variables:
//!
//! - `OTEL_EXPORTER_OTLP_ENDPOINT` - collector URL (default `http://localhost:4318`)
//! - `OTEL_EXPORTER_OTLP_PROTOCOL` - `http/protobuf` (default) or `http/json`
//! - `OTEL_EXPORTER_OTLP_HEADERS` - comma-separated `key=value` pairs, `%20` decoded to a space
//! - `OTEL_SERVICE_NAME` - service name (default `sigtrack`)
//!
//! ```bash
//! export OTEL_EXPORTER_OTLP_ENDPOINT="https://otlp-gateway.example.com/otlp"
//! export OTEL_EXPORTER_OTLP_HEADERS="Authorization=Basic%20<token>"
//! ```
//!
//! The tracer provider is kept in a `OnceLock` so [`shutdown_telemetry`] can flush pending spans;
//! `tracing-opentelemetry` only holds the tracer.

use opentelemetry::KeyValue;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::{Protocol, WithExportConfig, WithHttpConfig};
use opentelemetry_sdk::trace::SdkTracerProvider;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static TRACER_PROVIDER: OnceLock<SdkTracerProvider> = OnceLock::new();

/// OTLP exporter settings read from the environment.
#[derive(Debug, Clone, PartialEq)]
struct OtlpSettings {
    service_name: String,
    endpoint: String,
    protocol: Protocol,
    headers: HashMap<String, String>,
}

impl OtlpSettings {
    fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            service_name: lookup("OTEL_SERVICE_NAME").unwrap_or_else(|| "sigtrack".to_string()),
            endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT").unwrap_or_else(|| "http://localhost:4318".to_string()),
            protocol: match lookup("OTEL_EXPORTER_OTLP_PROTOCOL").as_deref() {
                Some("http/json") => Protocol::HttpJson,
                _ => Protocol::HttpBinary,
            },
            headers: lookup("OTEL_EXPORTER_OTLP_HEADERS")
                .map(|raw| parse_headers(&raw))
                .unwrap_or_default(),
        }
    }
}

fn parse_headers(raw: &str) -> HashMap<String, String> {
    raw.replace("%20", " ")
        .split(',')
        .filter_map(|pair| pair.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

/// Install the global subscriber. Falls back to console-only logging if the exporter cannot be
/// built.
pub fn init_telemetry(enable_otel_export: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer());

    if !enable_otel_export {
        registry.try_init()?;
        info!("Telemetry initialized (OTLP export disabled)");
        return Ok(());
    }

    match create_otlp_tracer(OtlpSettings::from_env()) {
        Ok(tracer) => {
            registry.with(tracing_opentelemetry::layer().with_tracer(tracer)).try_init()?;
            info!("Telemetry initialized with OTLP export enabled");
        }
        Err(e) => {
            registry.try_init()?;
            info!("Telemetry initialized without OTLP export: {}", e);
        }
    }

    Ok(())
}

fn create_otlp_tracer(settings: OtlpSettings) -> anyhow::Result<opentelemetry_sdk::trace::Tracer> {
    // The subscriber is not installed yet
    eprintln!(
        "[OTLP] service={} endpoint={} custom headers={}",
        settings.service_name,
        settings.endpoint,
        settings.headers.len()
    );

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_http()
        .with_endpoint(&settings.endpoint)
        .with_protocol(settings.protocol)
        .with_headers(settings.headers)
        .build()?;

    let tracer_provider = SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(
            opentelemetry_sdk::Resource::builder()
                .with_attribute(KeyValue::new("service.name", settings.service_name.clone()))
                .build(),
        )
        .build();

    let tracer = tracer_provider.tracer(settings.service_name);
    let _ = TRACER_PROVIDER.set(tracer_provider);

    Ok(tracer)
}

/// Flush and stop the OTLP exporter, if one was started.
pub fn shutdown_telemetry() {
    if let Some(provider) = TRACER_PROVIDER.get()
        && let Err(e) = provider.shutdown()
    {
        tracing::error!("Failed to shutdown tracer provider: {}", e);
    }
}
