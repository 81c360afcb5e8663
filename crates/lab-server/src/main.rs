//! Status server entry point.

use std::io::IsTerminal;
use std::process::ExitCode;

use lab_server::memory::TrackingAllocator;
use lab_server::{AppState, Config, Server, runtime, shutdown_signal};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[global_allocator]
static GLOBAL: TrackingAllocator = TrackingAllocator;

#[tokio::main]
async fn main() -> ExitCode {
    // 1. Read configuration once
    let config = Config::from_env();

    // 2. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_ansi(std::io::stdout().is_terminal()))
        .init();

    // 3. Build the application
    let app = lab_server::create_app(AppState::new(config.clone()));

    // 4. Bind
    let server = match Server::bind(&config, app).await {
        Ok(server) => server,
        Err(err) => {
            tracing::error!(error = %err, "failed to start server");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        url = %format!("http://localhost:{}/", server.local_addr().port()),
        environment = %config.environment,
        rust_version = runtime::RUST_VERSION,
        "server running"
    );

    // 5. Serve until SIGINT/SIGTERM
    if let Err(err) = server.serve(shutdown_signal()).await {
        tracing::error!(error = %err, "server error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
