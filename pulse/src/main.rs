use envconfig::Envconfig;
use tokio::signal;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use pulse::config::Config;
use pulse::server::serve;
use pulse::state::AppContext;

async fn shutdown() {
    let mut term = signal::unix::signal(signal::unix::SignalKind::terminate())
        .expect("failed to register SIGTERM handler");

    let mut interrupt = signal::unix::signal(signal::unix::SignalKind::interrupt())
        .expect("failed to register SIGINT handler");

    tokio::select! {
        _ = term.recv() => {},
        _ = interrupt.recv() => {},
    };

    tracing::info!("Shutting down gracefully...");
}

#[tokio::main]
async fn main() {
    let config = Config::init_from_env().expect("Invalid configuration:");

    let fmt_layer = fmt::layer()
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .with_target(true)
        .with_thread_ids(true)
        .with_level(true)
        .with_filter(EnvFilter::from_default_env());
    tracing_subscriber::registry().with(fmt_layer).init();

    // Startup failures are fatal: log the cause and exit non-zero without
    // ever binding the port.
    let context = match AppContext::from_config(&config).await {
        Ok(context) => context,
        Err(error) => {
            tracing::error!(error = %error, "startup failed");
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(config.bind()).await {
        Ok(listener) => listener,
        Err(error) => {
            tracing::error!(error = %error, bind = %config.bind(), "could not bind port");
            std::process::exit(1);
        }
    };

    serve(context, listener, shutdown()).await;
    tracing::info!("exiting");
}
