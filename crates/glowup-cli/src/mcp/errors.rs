//! Error handling utilities for MCP server

use glowup_core::RoadmapError;
use rmcp::ErrorData;

/// Helper to convert roadmap errors to MCP errors
///
/// Problems with the caller's input (unknown task, missing confirmation)
/// become `invalid_params`; storage and runtime failures become
/// `internal_error` and are safe to retry.
pub fn to_mcp_error(message: &str, error: &RoadmapError) -> ErrorData {
    let text = format!("{message}: {error}");
    if error.is_user_error() {
        ErrorData::invalid_params(text, None)
    } else {
        ErrorData::internal_error(text, None)
    }
}
