use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use tokio::net::TcpListener;

use employment_views::config::Args;
use employment_views::server;
use employment_views::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    // The listener is only bound once the full dataset is in memory.
    let state = AppState::load(&args.data)
        .with_context(|| format!("loading dataset {}", args.data.display()))?;
    let state = Arc::new(state);

    #[cfg(unix)]
    server::spawn_reload_on_hangup(Arc::clone(&state))?;

    let listener = TcpListener::bind(args.listen)
        .await
        .with_context(|| format!("binding {}", args.listen))?;
    info!("Listening on http://{}", listener.local_addr()?);

    server::serve(listener, state, async {
        if let Err(e) = server::shutdown_signal().await {
            error!("{e:#}; shutdown signals unavailable");
            std::future::pending::<()>().await;
        }
    })
    .await
}
