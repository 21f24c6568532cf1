//! # Main Entry Point
//!
//! Serves the `get` geolocation tool and the `config://settings` resource
//! over MCP stdio. Configuration comes from `API_BASE_URL` / `API_BEARER_TOKEN`
//! or `~/.api/config.json`, re-read on every call.

use anyhow::{Context, Result};
use clap::Parser;
use rmcp::{ServiceExt, transport::stdio};
use std::path::PathBuf;
use std::sync::Arc;

use ip2location_mcp::application::logging;
use ip2location_mcp::application::lookup::LookupService;
use ip2location_mcp::domain::config::ApiConfig;
use ip2location_mcp::infrastructure::http::ReqwestFetcher;
use ip2location_mcp::interface::mcp::GeolocationServer;

#[derive(Parser, Debug)]
#[command(version, about = "MCP server for IP geolocation lookups")]
struct Args {
    /// Also write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the resolved settings (token masked) and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.print_config {
        let settings = ApiConfig::resolve()
            .settings_json()
            .context("Failed to render settings")?;
        println!("{settings}");
        return Ok(());
    }

    let _guard = logging::init(args.log_file.as_deref())?;

    let fetcher = ReqwestFetcher::new().context("Failed to create HTTP client")?;
    let server = GeolocationServer::new(LookupService::new(Arc::new(fetcher)));

    if !ApiConfig::resolve().is_complete() {
        tracing::warn!("API_BASE_URL / API_BEARER_TOKEN not set; lookups will fail until configured");
    }

    tracing::info!("Starting MCP server on stdio...");
    let service = server
        .serve(stdio())
        .await
        .context("Failed to start MCP server")?;

    let reason = service.waiting().await?;
    tracing::info!("MCP server stopped: {:?}", reason);

    Ok(())
}
