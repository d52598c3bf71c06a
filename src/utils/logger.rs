use tracing::Subscriber;
use tracing_subscriber::fmt::format::{DefaultFields, Format};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Logs go to stderr; stdout carries the phase banners and the converted body.

type StderrLayer<S> = tracing_subscriber::fmt::Layer<S, DefaultFields, Format, fn() -> std::io::Stderr>;

fn default_filter(verbose: bool) -> EnvFilter {
    let default = if verbose {
        "ms_reader=debug,info"
    } else {
        "ms_reader=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

fn stderr_layer<S>() -> StderrLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr as fn() -> std::io::Stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(default_filter(verbose))
        .with(stderr_layer().compact())
        .init();
}

pub fn init_container_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(default_filter(verbose))
        .with(stderr_layer().json()) // container log collectors parse one JSON object per line
        .init();
}
