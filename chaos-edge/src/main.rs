#![cfg_attr(
    not(test),
    warn(clippy::print_stdout, clippy::dbg_macro),
    deny(clippy::unwrap_used, clippy::expect_used)
)]

use std::{path::PathBuf, time::Duration};

use rama::{
    error::{BoxError, ErrorContext},
    graceful,
    net::socket::Interface,
    telemetry::tracing::{self, Instrument as _},
};

use clap::Parser;

use chaos_edge_lib::{
    fault::{FaultInjector, StdRandomSource},
    http::service::ServiceInfo,
    utils,
};

pub mod config;
pub mod server;

#[cfg(target_family = "unix")]
#[global_allocator]
static ALLOC: jemallocator::Jemalloc = jemallocator::Jemalloc;

#[cfg(target_os = "windows")]
#[global_allocator]
static ALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[cfg(test)]
pub mod test;

/// CLI arguments for configuring chaos edge behavior.
#[derive(Debug, Clone, Parser)]
#[command(name = "chaos-edge")]
#[command(bin_name = "chaos-edge")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// network interface to bind the http server to,
    /// overrules `--port` when defined
    #[arg(long, short = 'b', value_name = "INTERFACE")]
    pub bind: Option<Interface>,

    /// port to listen on (all interfaces) when no `--bind` interface is defined
    #[arg(long, short = 'p', env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// fault injection scenario to start from,
    /// manually defined fault parameters overwrite scenario parameters
    #[arg(long, value_enum)]
    pub scenario: Option<config::Scenario>,

    #[command(flatten)]
    pub fault: config::FaultConfig,

    /// seed the random source for reproducible fault injection
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// debug logging as default instead of Info; use RUST_LOG env for more options
    #[arg(long, short = 'v', default_value_t = false)]
    pub verbose: bool,

    /// enable pretty logging (format for humans)
    #[arg(long, default_value_t = false)]
    pub pretty: bool,

    /// write the tracing output to the provided (log) file instead of stderr
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// directory in which data will be stored on the filesystem
    #[arg(long, short = 'D', default_value = ".chaos-edge")]
    pub data: PathBuf,

    #[arg(long, value_name = "SECONDS", default_value_t = 1.)]
    /// the graceful shutdown timeout (<= 0.0 = no timeout)
    pub graceful: f64,
}

impl Args {
    fn bind_interface(&self) -> Result<Interface, BoxError> {
        match self.bind.clone() {
            Some(interface) => Ok(interface),
            None => format!("0.0.0.0:{}", self.port)
                .parse::<Interface>()
                .context("create bind interface from port")
                .context_field("port", self.port),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let args = Args::parse();

    utils::telemetry::init_tracing(Some(utils::telemetry::TelemetryConfig {
        verbose: args.verbose,
        pretty: args.pretty,
        output: args.output.as_deref(),
    }))?;

    let base_shutdown_signal = graceful::default_signal();
    if let Err(err) = run_with_args(base_shutdown_signal, args).await {
        eprintln!("🚩 exit with error: {err}");
        std::process::exit(1);
    }

    Ok(())
}

/// Runs the chaos edge http server and blocks until
/// a critical error occurs or the (graceful) shutdown has been initiated.
///
/// This entry point is used by both the (binary) `main` function as well as
/// for the e2e test suite found in the test module.
async fn run_with_args<F>(base_shutdown_signal: F, args: Args) -> Result<(), BoxError>
where
    F: Future<Output: Send + 'static> + Send + 'static,
{
    let bind = args.bind_interface()?;

    let policy = config::merge_fault_config(args.scenario, args.fault.clone())
        .try_into_policy()
        .context("create fault policy")?;
    tracing::info!(
        "fault policy ready: latency = {}; failure rate = {}; failure status = {}",
        policy.latency.range,
        policy.failure.probability,
        policy.failure.status(),
    );

    let random = match args.seed {
        Some(seed) => {
            tracing::info!("seeded random source: {seed}");
            StdRandomSource::from_seed(seed)
        }
        None => StdRandomSource::from_entropy(),
    };
    let injector = FaultInjector::new(policy, random);
    let info = ServiceInfo::detect();

    tokio::fs::create_dir_all(&args.data)
        .await
        .context("create data directory")
        .with_context_debug_field("path", || args.data.clone())?;
    tracing::info!(path = ?args.data, "data directory ready to be used");

    let graceful_timeout = (args.graceful > 0.).then(|| Duration::from_secs_f64(args.graceful));

    let (error_tx, error_rx) = tokio::sync::mpsc::channel::<BoxError>(1);
    let graceful = graceful::Shutdown::new(new_shutdown_signal(error_rx, base_shutdown_signal));

    graceful.spawn_task_fn(move |guard| async move {
        tracing::info!("spawning http server...");
        if let Err(err) = server::run_http_server(guard, bind, &args.data, injector, info)
            .instrument(tracing::debug_span!(
                "http server lifetime",
                server.service.name = utils::env::project_name(),
                otel.kind = "server",
                network.protocol.name = "http",
            ))
            .await
        {
            tracing::error!("http server exited with an error: {err}");
            let _ = error_tx.send(err).await;
        }
    });

    let delay = match graceful_timeout {
        Some(duration) => graceful.shutdown_with_limit(duration).await?,
        None => graceful.shutdown().await,
    };

    tracing::info!("gracefully shutdown with a delay of: {delay:?}");
    Ok(())
}

fn new_shutdown_signal(
    error_rx: tokio::sync::mpsc::Receiver<BoxError>,
    base_shutdown_signal: impl Future<Output: Send + 'static> + Send + 'static,
) -> impl Future + Send + 'static {
    async move {
        let mut mut_error_rx = error_rx;
        let mut signal = Box::pin(base_shutdown_signal);

        tokio::select! {
            _ = signal.as_mut() => {
                tracing::debug!("default signal triggered: init graceful shutdown");
            }
            err = mut_error_rx.recv() => {
                if let Some(err) = err {
                    tracing::error!("fatal err received: {err}; abort");
                } else {
                    tracing::info!("wait for default signal, no error was received");
                    signal.await;
                    tracing::debug!("default signal triggered: init graceful shutdown");
                }
            }
        }
    }
}
