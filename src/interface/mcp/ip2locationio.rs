//! # ip2location.io MCP Server
//!
//! Exposes the single `get_geolocation` tool.

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router,
};
use serde::Deserialize;

use crate::application::ip2location::Ip2LocationService;
use crate::domain::types::pretty_json;
use crate::strings::messages;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GeolocationParams {
    #[schemars(description = "IPv4 or IPv6 address to geolocate.")]
    pub ip: String,
}

#[derive(Clone)]
pub struct Ip2LocationServer {
    service: Ip2LocationService,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl Ip2LocationServer {
    pub fn new(service: Ip2LocationService) -> Self {
        Self {
            service,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Fetch geolocation for the given IP address.")]
    async fn get_geolocation(
        &self,
        Parameters(GeolocationParams { ip }): Parameters<GeolocationParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = match self.service.get_geolocation(&ip).await {
            Some(value) => CallToolResult::success(vec![Content::text(pretty_json(&value))]),
            None => CallToolResult::error(vec![Content::text(messages::unable_to_fetch(&ip))]),
        };
        Ok(result)
    }
}

#[tool_handler]
impl ServerHandler for Ip2LocationServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "ip2locationio".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(messages::IP2LOCATIONIO_INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }
}
