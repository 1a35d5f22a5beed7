use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_DIRECTIVE: &str = "warn";
const VERBOSE_DIRECTIVE: &str = "debug";

/// Install a stderr subscriber. `RUST_LOG` wins over `--verbose` when it is set.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        VERBOSE_DIRECTIVE
    } else {
        DEFAULT_DIRECTIVE
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    // A second init (tests, embedding) keeps the first subscriber
    if let Err(e) = Registry::default()
        .with(filter)
        .with(stderr_layer)
        .try_init()
    {
        tracing::debug!(error = %e, "tracing subscriber already installed");
    }
}
