//! MCP (Model Context Protocol) server implementation.
//!
//! This module exposes text statistics over the MCP protocol, making them
//! available to AI assistants via stdio transport.
//!
//! # Architecture
//!
//! The MCP server is a presentation layer. It wraps the same core library
//! that the CLI commands use; each `#[tool]` method delegates to
//! `textstat_core` rather than computing anything itself.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use textstat_core::{READING_WPM, TextStats, check_input_size};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `text_stats` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct TextStatsParams {
    /// The text to measure.
    pub text: String,
    /// Reading rate in words per minute. Omit to use the server default.
    pub wpm: Option<u32>,
}

/// MCP server exposing text statistics to AI assistants.
#[derive(Clone)]
pub struct ProjectServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    reading_wpm: u32,
    max_input_bytes: Option<usize>,
}

impl Default for ProjectServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl ProjectServer {
    /// Create a server with the default reading rate and input limit.
    pub fn new() -> Self {
        Self::with_settings(READING_WPM, Some(textstat_core::DEFAULT_MAX_INPUT_BYTES))
    }

    /// Create a server with a configured reading rate and input limit.
    pub fn with_settings(reading_wpm: u32, max_input_bytes: Option<usize>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            reading_wpm,
            max_input_bytes,
        }
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "reading_wpm": self.reading_wpm,
        });

        let text = if params.format == "json" {
            serde_json::to_string_pretty(&info)
                .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Count words, characters, sentences, and paragraphs; estimate reading time.
    #[tool(
        description = "Count words, characters, sentences, and paragraphs in text, and estimate reading time in seconds."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn text_stats(
        &self,
        Parameters(params): Parameters<TextStatsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "text_stats", wpm = ?params.wpm, "executing MCP tool");

        check_input_size("text", params.text.len(), self.max_input_bytes)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        let wpm = params.wpm.unwrap_or(self.reading_wpm);
        let stats = TextStats::compute(&params.text, wpm);

        let json = serde_json::to_string_pretty(&stats)
            .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;

        tracing::info!(
            tool = "text_stats",
            words = stats.words,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for ProjectServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Use text_stats to count words, characters, sentences, and paragraphs.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
