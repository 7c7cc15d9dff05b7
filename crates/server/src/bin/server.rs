use std::{
    net::{IpAddr, SocketAddr},
    str::FromStr,
};

use clap::Parser;
use exercise_tracker::{cli::Cli, db, routes, AppState};
use shared::{configure_tracing, load_dotenv};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for ctrl-c: {e:?}");
        // Without a signal handler run until killed
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    load_dotenv()?;
    configure_tracing()?;

    let args = Cli::parse();
    debug!(?args);

    // Run the migrations synchronously before creating the pool or launching the server
    let ran = db::run_migrations(&args.sqlite_connection_string)?;
    info!("Ran {ran} db migrations");

    // Create a database pool to add into the app state
    let pool = db::create_pool(&args.sqlite_connection_string)?;

    let socket = SocketAddr::new(IpAddr::from_str(&args.bind_addr)?, args.port);

    let listener = TcpListener::bind(socket).await?;
    info!("listening on {}", listener.local_addr()?);

    let state = AppState::new(pool.clone());

    axum::serve(listener, routes::router(state, &args.assets_dir))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db::shutdown_pool(pool).await?;

    Ok(())
}
