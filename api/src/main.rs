use api::auth::middleware::log_request;
use api::routes::routes;
use axum::{Router, middleware::from_fn};
use db::capabilities::DbCapabilities;
use migration::Migrator;
use sea_orm_migration::MigratorTrait;
use std::{net::SocketAddr, process::ExitCode, sync::Arc};
use tower_http::cors::CorsLayer;
use tracing_appender::rolling;
use util::{config, state::AppState};

#[tokio::main]
async fn main() -> ExitCode {
    let _log_guard = init_logging(&config::log_file(), &config::log_level());

    if config::jwt_secret().is_empty() {
        tracing::error!("JWT_SECRET is not set; refusing to start");
        eprintln!("JWT_SECRET must be set");
        return ExitCode::FAILURE;
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "Server stopped");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let db = db::connect().await?;
    Migrator::up(&db, None).await?;

    let app_state = AppState::new(db.clone(), Arc::new(DbCapabilities::new(db)));

    let app = Router::new()
        .nest("/api", routes())
        .with_state(app_state)
        .layer(from_fn(log_request))
        .layer(CorsLayer::very_permissive());

    let addr: SocketAddr = format!("{}:{}", config::host(), config::port()).parse()?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(env = %config::env(), %addr, "Starting {}", config::project_name());
    println!("Starting {} on http://{addr}", config::project_name());

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;
    Ok(())
}

fn init_logging(log_file: &str, log_level: &str) -> tracing_appender::non_blocking::WorkerGuard {
    use std::fs;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    fs::create_dir_all("logs").ok();

    let file_appender = rolling::daily("logs", log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    let stdout_layer = config::log_to_stdout().then(|| {
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_ansi(true)
            .with_target(true)
            .with_thread_ids(true)
    });

    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("api=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    guard
}
