//! Serves the `get_geolocation` tool against api.ip2location.io over MCP stdio.
//! The optional `IP2LOCATION_API_KEY` is sent as the `key` query parameter.
//! Redirects are not followed; a 3xx reply counts as a failed lookup.

use anyhow::{Context, Result};
use clap::Parser;
use rmcp::{ServiceExt, transport::stdio};
use std::path::PathBuf;
use std::sync::Arc;

use ip2location_mcp::application::ip2location::Ip2LocationService;
use ip2location_mcp::application::logging;
use ip2location_mcp::infrastructure::http::ReqwestFetcher;
use ip2location_mcp::interface::mcp::Ip2LocationServer;

#[derive(Parser, Debug)]
#[command(version, about = "MCP server for ip2location.io geolocation lookups")]
struct Args {
    /// Also write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _guard = logging::init(args.log_file.as_deref())?;

    let fetcher = ReqwestFetcher::without_redirects().context("Failed to create HTTP client")?;
    let server = Ip2LocationServer::new(Ip2LocationService::new(Arc::new(fetcher)));

    tracing::info!("Starting ip2locationio MCP server on stdio...");
    let service = server
        .serve(stdio())
        .await
        .context("Failed to start MCP server")?;

    let reason = service.waiting().await?;
    tracing::info!("MCP server stopped: {:?}", reason);

    Ok(())
}
