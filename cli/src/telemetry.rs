use anyhow::{Context, Result};
use tracing::subscriber::set_global_default;
use tracing::Subscriber;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Registry with an `EnvFilter` and a fmt layer on stderr, so logs never mix
/// with the rendered views on stdout.
pub fn get_subscriber(env_filter: &str) -> impl Subscriber + Sync + Send {
    // RUST_LOG wins over the default filter when set.
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));

    let formatting_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    Registry::default().with(env_filter).with(formatting_layer)
}

pub fn init_subscriber(subscriber: impl Subscriber + Sync + Send) -> Result<()> {
    set_global_default(subscriber).context("Failed to set tracing subscriber")
}
