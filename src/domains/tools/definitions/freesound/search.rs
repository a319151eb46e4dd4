//! Freesound sound search tool.
//!
//! Runs one text search against Freesound and returns a compact summary of
//! the first page: metadata, license and preview URLs for each sound.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Content, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use super::client::{FreesoundClient, SearchError};
use super::format::format_response;
use super::model::{ErrorResult, RawSearchResponse, SearchOutcome};
use crate::core::config::{Config, FreesoundConfig};
use crate::domains::tools::ToolError;

const MIN_RESULTS: i64 = 1;
const MAX_RESULTS: i64 = 30;

fn default_max_results() -> i64 {
    10
}

/// Parameters for the sound search tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchSoundsParams {
    /// Search terms (e.g., "thunderstorm", "piano music", "bird sounds").
    #[schemars(
        description = "Search terms (e.g., \"thunderstorm\", \"piano music\", \"bird sounds\")"
    )]
    pub query: String,

    /// Number of results to return (1-30, default 10).
    #[schemars(description = "Number of results to return (1-30, default 10)")]
    #[serde(default = "default_max_results")]
    pub max_results: i64,
}

/// Clamp a requested result count to the page sizes the tool allows.
pub fn clamp_max_results(max_results: i64) -> u32 {
    max_results.clamp(MIN_RESULTS, MAX_RESULTS) as u32
}

/// Freesound search tool implementation.
#[derive(Debug, Clone)]
pub struct SearchSoundsTool;

impl SearchSoundsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "search_sounds";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Search Freesound for audio files.\n\
         \n\
         Returns up to 30 sounds matching the search terms, in Freesound's relevance order. \
         Each sound includes its name, duration, description, tags, license, file type, \
         uploader, Freesound page and preview URLs. Full quality files must be downloaded \
         from the Freesound page.";

    /// Execute the search and format the outcome.
    ///
    /// Every failure is reported as an [`ErrorResult`]; this never errors.
    #[instrument(skip_all, fields(query = %params.query, max_results = params.max_results))]
    pub async fn execute(params: &SearchSoundsParams, config: &FreesoundConfig) -> SearchOutcome {
        let page_size = clamp_max_results(params.max_results);
        info!(page_size, "Searching Freesound");

        match Self::search(params.query.trim(), page_size, config).await {
            Ok(raw) => {
                let result = format_response(&params.query, raw);
                info!(
                    total_found = result.total_found,
                    results_returned = result.results_returned,
                    "Search completed"
                );
                SearchOutcome::Found(result)
            }
            Err(e) => {
                error!("Freesound search failed: {}", e);
                SearchOutcome::Failed(ErrorResult {
                    error: e.to_string(),
                })
            }
        }
    }

    async fn search(
        query: &str,
        page_size: u32,
        config: &FreesoundConfig,
    ) -> Result<RawSearchResponse, SearchError> {
        let client = FreesoundClient::new(config)?;
        client.search_text(query, page_size).await
    }

    /// Wrap an outcome as an MCP tool result.
    ///
    /// The JSON object is sent both as text and as structured content.
    pub fn to_call_result(outcome: &SearchOutcome) -> Result<CallToolResult, ToolError> {
        let structured =
            serde_json::to_value(outcome).map_err(|e| ToolError::internal(e.to_string()))?;
        let text = serde_json::to_string_pretty(&structured)
            .map_err(|e| ToolError::internal(e.to_string()))?;

        Ok(CallToolResult {
            content: vec![Content::text(text)],
            structured_content: Some(structured),
            is_error: Some(outcome.is_error()),
            meta: None,
        })
    }

    /// Parse raw tool-call arguments.
    pub fn parse_params(
        arguments: serde_json::Map<String, serde_json::Value>,
    ) -> Result<SearchSoundsParams, ToolError> {
        serde_json::from_value(serde_json::Value::Object(arguments)).map_err(|e| {
            warn!("Rejected search_sounds arguments: {}", e);
            ToolError::invalid_arguments(e.to_string())
        })
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SearchSoundsParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: Some("Search Freesound".into()),
        }
    }

    /// Create a ToolRoute for the STDIO transport.
    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let config = config.clone();
            async move {
                let params = Self::parse_params(args).map_err(McpError::from)?;
                let outcome = Self::execute(&params, &config.freesound).await;
                Self::to_call_result(&outcome).map_err(McpError::from)
            }
            .boxed()
        })
    }
}
