use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Installs the global stderr subscriber.
///
/// `filter` wins over `RUST_LOG`, which wins over the default. When
/// `enabled` is false everything is filtered out.
pub fn init(filter: Option<&str>, enabled: bool) {
    let (filter, rejected) = build_filter(filter, enabled);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    if let Some(directive) = rejected {
        tracing::warn!("ignoring invalid log filter `{directive}`, using `{DEFAULT_FILTER}`");
    }
}

fn build_filter(filter: Option<&str>, enabled: bool) -> (EnvFilter, Option<String>) {
    if !enabled {
        return (EnvFilter::new("off"), None);
    }

    match filter {
        Some(directive) => match EnvFilter::try_new(directive) {
            Ok(f) => (f, None),
            Err(_) => (EnvFilter::new(DEFAULT_FILTER), Some(directive.to_string())),
        },

        None => (
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
            None,
        ),
    }
}
