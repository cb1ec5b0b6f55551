//! mysite server.
//!
//! - Loads and validates `mysite.yaml` (or `$MYSITE_CONFIG`)
//! - Builds AppState (fails fast on config errors)
//! - Serves the router with peer addresses for throttling
//! - Periodically sweeps expired throttle records

use std::net::SocketAddr;

use tokio::signal;
use tracing_subscriber::{fmt, EnvFilter};

use mysite_web::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::var(config::CONFIG_ENV).unwrap_or_else(|_| config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::load_from_file(&path).expect("config load failed");
    let listen = cfg.server.listen_addr().expect("server.listen validated");
    let sweep_every = cfg.throttle.sweep_interval();

    let state = app_state::AppState::new(cfg).expect("application state");

    if let Some(throttle) = state.throttle().cloned() {
        tokio::spawn(async move {
            let mut tick = tokio::time::interval(sweep_every);
            tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                tick.tick().await;
                let removed = throttle.sweep(std::time::Instant::now());
                if removed > 0 {
                    tracing::debug!(removed, tracked = throttle.tracked_clients(), "throttle sweep");
                }
            }
        });
    }

    let app = router::build_router(state);

    tracing::info!(%listen, config = %path, "mysite starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server failed");

    tracing::info!("mysite stopped");
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
