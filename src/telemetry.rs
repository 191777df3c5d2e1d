//! Tracing setup: console logging always, OTLP trace/log export when a
//! collector is configured and answering.

use opentelemetry::trace::TracerProvider;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use std::env;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_SERVICE_NAME: &str = "larder-server";

/// Resolve the configured OTLP endpoint, requiring the collector to accept
/// a TCP connection so a dead endpoint does not stall span batches.
fn reachable_otlp_endpoint() -> Result<String, String> {
    let endpoint = env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
        .map_err(|_| "OTEL_EXPORTER_OTLP_ENDPOINT not set".to_string())?;

    let host_port = endpoint
        .trim_start_matches("http://")
        .trim_start_matches("https://");

    let reachable = host_port
        .to_socket_addrs()
        .ok()
        .and_then(|mut addrs| addrs.next())
        .map(|addr| TcpStream::connect_timeout(&addr, Duration::from_millis(100)).is_ok())
        .unwrap_or(false);

    if reachable {
        Ok(endpoint)
    } else {
        Err(format!("collector at {} not reachable", endpoint))
    }
}

pub fn init() {
    let fmt_layer = tracing_subscriber::fmt::layer();
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();
    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer);

    let endpoint = match reachable_otlp_endpoint() {
        Ok(endpoint) => endpoint,
        Err(reason) => {
            registry.init();
            tracing::debug!("OTLP export disabled: {}", reason);
            return;
        }
    };

    let service_name =
        env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| DEFAULT_SERVICE_NAME.to_string());

    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(service_name.clone())
        .build();

    let trace_exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&endpoint)
        .build()
        .expect("Failed to create OTLP trace exporter");

    let trace_provider = SdkTracerProvider::builder()
        .with_batch_exporter(trace_exporter)
        .with_resource(resource.clone())
        .build();

    let tracer = trace_provider.tracer(DEFAULT_SERVICE_NAME);
    opentelemetry::global::set_tracer_provider(trace_provider);

    let log_exporter = opentelemetry_otlp::LogExporter::builder()
        .with_tonic()
        .with_endpoint(&endpoint)
        .build()
        .expect("Failed to create OTLP log exporter");

    let log_provider = SdkLoggerProvider::builder()
        .with_batch_exporter(log_exporter)
        .with_resource(resource)
        .build();

    registry
        .with(tracing_opentelemetry::layer().with_tracer(tracer))
        .with(OpenTelemetryTracingBridge::new(&log_provider))
        .init();

    tracing::info!(
        "OpenTelemetry enabled, exporting traces and logs to {} as {}",
        endpoint,
        service_name
    );
}
