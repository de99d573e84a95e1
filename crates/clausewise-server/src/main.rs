//! ClauseWise: single-binary legal document analysis server.

use std::path::Path;
use std::sync::Arc;

use clausewise_server::{build_router, cli, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    clausewise_analyze::init();

    let args: Vec<String> = std::env::args().collect();

    // Handle CLI subcommands
    if args.len() > 1 {
        match args[1].as_str() {
            "summarize" => {
                if args.len() < 3 {
                    eprintln!("Usage: clausewise summarize <file> [sentences]");
                    std::process::exit(1);
                }
                let summary = cli::summarize_file(Path::new(&args[2]), args.get(3).map(String::as_str))?;
                println!("{}", summary);
                return Ok(());
            }
            "clauses" => {
                if args.len() < 3 {
                    eprintln!("Usage: clausewise clauses <file>");
                    std::process::exit(1);
                }
                println!("{}", cli::clauses_file(Path::new(&args[2]))?);
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                cli::print_help();
                return Ok(());
            }
            _ => {
                eprintln!("Unknown command: {}. Use 'clausewise help' for usage.", args[1]);
                std::process::exit(1);
            }
        }
    }

    // Normal server startup
    let config = clausewise_core::ClauseWiseConfig::from_env()?;
    let port = config.port;
    info!("Upload limit: {} MB", config.max_upload_mb);

    let state = Arc::new(AppState::new(config)?);
    match state.llm_config.resolve_provider() {
        Some(endpoint) => info!("LLM provider: {} ({})", endpoint.provider, endpoint.model),
        None => info!("No LLM provider configured, using heuristic analysis only"),
    }

    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("ClauseWise server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
