mod app;
mod args;
mod input;
mod routes;
mod store;

use std::net::SocketAddr;

use anyhow::{ensure, Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{AppState, GameService, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use args::Args;
use game_core::session::GameSession;
use store::BestScoreStore;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(args.log.clone()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    ensure!(
        (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&args.board_size),
        "board size {} is outside {}..={}",
        args.board_size,
        MIN_BOARD_SIZE,
        MAX_BOARD_SIZE
    );

    let store = BestScoreStore::open(&args.db)
        .with_context(|| format!("open best-score store at {}", args.db.display()))?;
    let best_score = store.best_score().context("read persisted best score")?;
    info!("best score loaded" = best_score);

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let session = GameSession::with_best_score(args.board_size, best_score, &mut rng)
        .with_context(|| format!("initialize a {0}x{0} board", args.board_size))?;
    let state = AppState::new(GameService::new(session, store, rng));

    let router = Router::new()
        .route("/", get(routes::index))
        .route("/api/state", get(routes::get_state))
        .route("/api/move", post(routes::post_move))
        .route("/api/restart", post(routes::post_restart))
        .route("/api/health", get(routes::health))
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .context("invalid host/port combination")?;
    info!("listening" = %addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };
    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
