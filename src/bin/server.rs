use std::{
    fs::OpenOptions,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
    time::Duration,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{
    EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt,
};

use pennywise::{
    AppState, Ledger, UserProfile, build_router, graceful_shutdown, local_today,
    logging_middleware,
};

/// The web server for pennywise.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The port to serve the app from.
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// The IP address to listen on.
    #[arg(short, long, env = "ADDRESS", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    address: IpAddr,

    /// The canonical name of the local timezone, e.g. "Pacific/Auckland".
    #[arg(long, env = "TIMEZONE", default_value = "Etc/UTC")]
    timezone: String,

    /// The account balance before any transactions are added.
    #[arg(long, env = "OPENING_BALANCE", conflicts_with = "demo_data")]
    opening_balance: Option<f64>,

    /// Start with a week of sample transactions.
    #[arg(long, env = "DEMO_DATA")]
    demo_data: bool,

    /// How long, in milliseconds, saving the profile or password takes.
    #[arg(long, env = "SIMULATED_LATENCY_MS", default_value_t = 0)]
    simulated_latency_ms: u64,

    /// Also write debug level logs to this file.
    #[arg(long, env = "LOG_FILE")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(error) = setup_logging(args.log_file.as_deref()) {
        eprintln!("Could not open log file {:?}: {error}", args.log_file);
        return ExitCode::FAILURE;
    }

    let ledger = if args.demo_data {
        match local_today(&args.timezone) {
            Ok(today) => Ledger::with_demo_data(today),
            Err(error) => {
                tracing::error!("Could not create demo data: {error}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        Ledger::new(args.opening_balance.unwrap_or_default())
    };

    let state = match AppState::new(
        ledger,
        UserProfile::default(),
        &args.timezone,
        Duration::from_millis(args.simulated_latency_ms),
    ) {
        Ok(state) => state,
        Err(error) => {
            tracing::error!("Could not start server: {error}");
            return ExitCode::FAILURE;
        }
    };

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(state).layer(middleware::from_fn(logging_middleware));
    let router = add_tracing_layer(router);

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    let addr = SocketAddr::from((args.address, args.port));
    tracing::info!("HTTP server listening on http://{addr}");

    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server error: {error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn setup_logging(log_file: Option<&Path>) -> std::io::Result<()> {
    let stdout_log = tracing_subscriber::fmt::layer().pretty().with_filter(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    );

    let debug_log = match log_file {
        Some(path) => {
            let log_file = OpenOptions::new().create(true).append(true).open(path)?;

            Some(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_ansi(false)
                    .with_writer(Arc::new(log_file))
                    .with_filter(filter::LevelFilter::DEBUG),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();

    Ok(())
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // Errors are logged by the handlers.
        .on_failure(());

    router.layer(tracing_layer)
}
