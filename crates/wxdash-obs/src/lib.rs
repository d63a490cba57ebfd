use tracing::Span;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "info,wxdash=debug";

/// Filter directives from RUST_LOG, or the default when unset or blank
pub fn filter_directives(rust_log: Option<String>) -> String {
    rust_log
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Install the JSON subscriber and return the service's root span.
///
/// Events recorded inside the returned span carry `service` in their
/// `span`/`spans` fields, so callers should run their top-level future
/// under it.
pub fn init(service_name: &str) -> Span {
    let env_filter = filter_directives(std::env::var("RUST_LOG").ok());

    tracing_subscriber::registry()
        .with(EnvFilter::new(env_filter))
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true),
        )
        .init();

    let span = tracing::info_span!("service", service = %service_name);
    span.in_scope(|| tracing::info!("Observability initialized"));
    span
}
