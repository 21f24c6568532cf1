//! # Geolocation MCP Server
//!
//! Exposes the `get` tool and the read-only `config://settings` resource.
//! Tool calls never fail at the protocol level; lookup failures come back as
//! text with `is_error` set.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    service::RequestContext,
    tool, tool_handler, tool_router,
};
use serde::Deserialize;
use serde_json::json;

use crate::application::lookup::LookupService;
use crate::domain::types::{LookupOutcome, LookupRequest};
use crate::strings::messages;

pub const SETTINGS_URI: &str = "config://settings";

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct GetParams {
    #[serde(default)]
    #[schemars(description = "API key.")]
    pub key: Option<String>,
    #[serde(default)]
    #[schemars(
        description = "IP address (IPv4 or IPv6) for reverse IP location lookup purposes. If not present, the server IP address will be used for the location lookup."
    )]
    pub ip: Option<String>,
    #[serde(default)]
    #[schemars(description = "Format of the response message.")]
    pub format: Option<String>,
    #[serde(default)]
    #[schemars(
        description = "Translation information. The translation only applicable for continent, country, region and city name. This parameter is only available for Plus and Security plan only."
    )]
    pub lang: Option<String>,
}

impl From<GetParams> for LookupRequest {
    fn from(params: GetParams) -> Self {
        Self {
            key: params.key,
            ip: params.ip,
            format: params.format,
            lang: params.lang,
        }
    }
}

#[derive(Clone)]
pub struct GeolocationServer {
    lookup: LookupService,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl GeolocationServer {
    pub fn new(lookup: LookupService) -> Self {
        Self {
            lookup,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(name = "get", description = "Geolocate user's location information via IP address")]
    async fn get(
        &self,
        Parameters(params): Parameters<GetParams>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = self.lookup.get(&params.into()).await;
        Ok(into_call_result(outcome))
    }
}

impl GeolocationServer {
    fn read_settings(&self, uri: &str) -> Result<ReadResourceResult, McpError> {
        if uri != SETTINGS_URI {
            return Err(McpError::resource_not_found(
                "resource_not_found",
                Some(json!({ "uri": uri })),
            ));
        }

        let settings = self
            .lookup
            .config()
            .settings_json()
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(settings, uri)],
        })
    }
}

fn into_call_result(outcome: LookupOutcome) -> CallToolResult {
    let content = vec![Content::text(outcome.render())];
    if outcome.is_error() {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    }
}

fn settings_resource() -> Resource {
    let mut resource = RawResource::new(SETTINGS_URI, "settings");
    resource.description = Some("Current configuration settings.".to_string());
    resource.mime_type = Some("application/json".to_string());
    resource.no_annotation()
}

#[tool_handler]
impl ServerHandler for GeolocationServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(messages::SERVER_INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult::with_all_items(vec![settings_resource()]))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        self.read_settings(&request.uri)
    }
}
