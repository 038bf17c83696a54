use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use kanban_core::app::{BoardConfig, BoardLoader, DragController};
use kanban_core::domain::DragEvent;
use kanban_core::impls::{InMemoryGateway, JsonFileGateway};
use kanban_core::ports::BoardGateway;
use kanban_core::store::BoardStore;

/// Replay a drag script against a Kanban board and print the result.
#[derive(Parser, Debug)]
#[command(name = "kanban-cli")]
#[command(version)]
#[command(about = "Replay drag-and-drop events against a Kanban board")]
struct Cli {
    /// Board file ({ "columns": [...], "tasks": [...] }); a sample board when omitted
    #[arg(long)]
    board: Option<PathBuf>,

    /// JSON array of drag events to replay
    #[arg(long)]
    script: Option<PathBuf>,

    /// Config overrides (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
}

/// RUST_LOG wins; `info` when it is unset, empty or unparsable.
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    // (A) 設定を読む（なければデフォルト）
    let config = match &cli.config {
        Some(path) => BoardConfig::from_json_file(path)
            .await
            .with_context(|| format!("loading config {}", path.display()))?,
        None => BoardConfig::default(),
    };

    // (B) gateway からボードをロード
    let gateway: Arc<dyn BoardGateway> = match &cli.board {
        Some(path) => Arc::new(JsonFileGateway::new(path)),
        None => Arc::new(InMemoryGateway::sample()),
    };
    let store = BoardStore::default().with_invariant_checks(config.verify_invariants);
    let loader = BoardLoader::with_config(store.clone(), gateway, &config);
    let (columns, tasks) = loader.load_all().await;
    columns.context("loading columns")?;
    tasks.context("loading tasks")?;

    // (C) ドラッグイベントを再生
    if let Some(path) = &cli.script {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading script {}", path.display()))?;
        let events: Vec<DragEvent> =
            serde_json::from_str(&raw).with_context(|| format!("parsing script {}", path.display()))?;

        let mut controller = DragController::new(store.clone());
        for event in events {
            let outcome = controller.handle(event);
            info!(?outcome, "event replayed");
        }
        if controller.is_dragging() {
            warn!("script ended mid-drag; the live preview stays committed");
        }
    }

    // (D) 最終状態を出力
    let state = store.snapshot();
    if let Err(violation) = state.check_invariants() {
        warn!(%violation, "final board is inconsistent");
    }
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}
