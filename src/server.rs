use std::future::Future;
use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::*,
    schemars,
    service::RequestContext,
    tool, tool_handler, tool_router,
};
use serde_json::json;

use crate::client::FatSecretClient;
use crate::report;

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SearchFoodsParams {
    pub query: String,
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    #[serde(default)]
    pub page_number: u32,
    /// `json` (default) or `text` for the console report
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_max_results() -> u32 {
    20
}

fn default_format() -> String {
    "json".to_string()
}

#[derive(Clone)]
pub struct FatSecretMcpServer {
    client: Arc<FatSecretClient>,
    tool_router: ToolRouter<FatSecretMcpServer>,
}

#[tool_router]
impl FatSecretMcpServer {
    pub fn new(client: Arc<FatSecretClient>) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Search the FatSecret food database and return foods with servings, nutrients, allergens and dietary flags")]
    pub async fn search_foods(
        &self,
        Parameters(params): Parameters<SearchFoodsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!("MCP tool call: search_foods '{}'", params.query);

        let page = match self
            .client
            .search_page(&params.query, params.max_results, params.page_number)
            .await
        {
            Ok(page) => page,
            Err(e) => {
                let error = json!({
                    "error": "Failed to search foods",
                    "kind": format!("{:?}", e.kind()),
                    "code": e.code(),
                    "details": e.to_string()
                });
                return Ok(CallToolResult::error(vec![Content::text(error.to_string())]));
            }
        };

        if params.format == "text" {
            return Ok(CallToolResult::success(vec![Content::text(
                report::render_foods(&page.foods),
            )]));
        }

        let result = json!({
            "foods": page.foods,
            "total_results": page.total_results,
            "page_number": page.page_number,
            "max_results": page.max_results,
            "query": params.query
        });

        match serde_json::to_string_pretty(&result) {
            Ok(body) => Ok(CallToolResult::success(vec![Content::text(body)])),
            Err(e) => {
                let error = json!({
                    "error": "Failed to encode search results",
                    "details": e.to_string()
                });
                Ok(CallToolResult::error(vec![Content::text(error.to_string())]))
            }
        }
    }
}

#[tool_handler]
impl ServerHandler for FatSecretMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some("This server searches the FatSecret nutrition database. The search_foods tool returns matching foods with their servings, calories, macro- and micronutrients, allergen flags and dietary preferences.".to_string()),
        }
    }

    async fn initialize(
        &self,
        _request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<InitializeResult, McpError> {
        Ok(self.get_info())
    }
}
