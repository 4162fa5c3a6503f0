use anyhow::Result;
use axum::Router;
use chistes_core::SearchEngine;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};
use server::build_app;
use tokio::net::TcpListener;

#[derive(Parser)]
struct Args {
    /// Corpus file, one `id : category | text` record per line
    #[arg(long, default_value = "./corpusChistes.txt")]
    corpus: PathBuf,
    /// Directory with the web frontend
    #[arg(long, default_value = "./static")]
    static_dir: PathBuf,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    // Build once before serving; handlers only ever read it.
    let engine = Arc::new(SearchEngine::from_corpus_file(&args.corpus, true)?);
    let static_dir = if args.static_dir.is_dir() {
        Some(args.static_dir)
    } else {
        tracing::warn!(dir = %args.static_dir.display(), "static directory missing, frontend disabled");
        None
    };
    let app: Router = build_app(engine, static_dir);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
