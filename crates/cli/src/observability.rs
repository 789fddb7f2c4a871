//! Tracing subscriber and OpenTelemetry wiring.
//!
//! Events go to stdout as text or JSON, filtered by `RUST_LOG` (default
//! `info`). When `OTEL_EXPORTER_OTLP_ENDPOINT` is set, spans are also exported
//! over OTLP/gRPC. A broken exporter never costs the log output.

use anyhow::Context;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::trace::TracerProvider;
use opentelemetry_sdk::{runtime, Resource};
use tracing::warn;
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::config::LogFormat;

const SERVICE_NAME: &str = "ci-actions";
const OTLP_ENDPOINT_ENV: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";

type Filtered = Layered<EnvFilter, Registry>;
type BoxedLayer = Box<dyn Layer<Filtered> + Send + Sync>;
type Subscriber = Layered<Vec<BoxedLayer>, Filtered>;

/// Handle that flushes exported spans on shutdown.
#[derive(Debug, Default)]
pub struct Telemetry {
    provider: Option<TracerProvider>,
}

impl Telemetry {
    /// Flushes and stops the OTLP exporter, if one was installed.
    pub fn shutdown(self) {
        if let Some(provider) = self.provider {
            if let Err(err) = provider.shutdown() {
                eprintln!("Failed to shut down trace exporter: {err}");
            }
        }
    }
}

/// Installs the global subscriber.
///
/// Log output is always installed. When `OTEL_EXPORTER_OTLP_ENDPOINT` is set
/// but the exporter cannot be built, a warning is logged and spans are not
/// exported.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(format: LogFormat) -> anyhow::Result<Telemetry> {
    let endpoint = std::env::var(OTLP_ENDPOINT_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty());

    let (subscriber, telemetry, exporter_error) = build_subscriber(format, endpoint.as_deref());
    subscriber
        .try_init()
        .context("Failed to install tracing subscriber")?;

    if let Some(err) = exporter_error {
        warn!(error = %format!("{err:#}"), "Span export disabled");
    }

    Ok(telemetry)
}

/// Assembles the filter, the fmt layer and, for a usable `otlp_endpoint`, the
/// OpenTelemetry layer. An exporter failure is handed back instead of
/// aborting so the caller still gets log output.
fn build_subscriber(
    format: LogFormat,
    otlp_endpoint: Option<&str>,
) -> (Subscriber, Telemetry, Option<anyhow::Error>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let mut layers: Vec<BoxedLayer> = vec![match format {
        LogFormat::Text => tracing_subscriber::fmt::layer().with_target(false).boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .boxed(),
    }];

    let mut telemetry = Telemetry::default();
    let mut exporter_error = None;
    if let Some(endpoint) = otlp_endpoint {
        match otlp_provider(endpoint) {
            Ok(provider) => {
                let tracer = provider.tracer(SERVICE_NAME);
                layers.push(tracing_opentelemetry::layer().with_tracer(tracer).boxed());
                telemetry.provider = Some(provider);
            }
            Err(err) => exporter_error = Some(err),
        }
    }

    let subscriber = tracing_subscriber::registry().with(filter).with(layers);
    (subscriber, telemetry, exporter_error)
}

/// Builds a batch OTLP exporter sending to `endpoint`. The remaining `OTEL_*`
/// variables are honoured by the exporter itself.
fn otlp_provider(endpoint: &str) -> anyhow::Result<TracerProvider> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()
        .context("Failed to build OTLP span exporter")?;

    Ok(TracerProvider::builder()
        .with_batch_exporter(exporter, runtime::Tokio)
        .with_resource(Resource::new(vec![KeyValue::new(
            "service.name",
            SERVICE_NAME,
        )]))
        .build())
}
