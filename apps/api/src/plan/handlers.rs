//! Axum route handlers for the legacy result-parsing API.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::plan::legacy::{parse_action_plan, parse_gap_analysis, ActionStep, GapAnalysis};

#[derive(Debug, Deserialize)]
pub struct ParseResultsRequest {
    pub gap_analysis_text: String,
    pub action_plan_text: String,
}

#[derive(Debug, Serialize)]
pub struct ParseResultsResponse {
    pub gap_analysis: GapAnalysis,
    pub steps: Vec<ActionStep>,
}

/// POST /api/v1/results/parse
///
/// Legacy path: extracts structured results from two free-form narrative
/// blocks. New clients should rely on the structured plan returned by
/// assessment completion instead; this stays only for results produced
/// before the schema migration.
pub async fn handle_parse_results(
    Json(request): Json<ParseResultsRequest>,
) -> Result<Json<ParseResultsResponse>, AppError> {
    if request.gap_analysis_text.trim().is_empty() && request.action_plan_text.trim().is_empty() {
        return Err(AppError::Validation(
            "at least one text block is required".to_string(),
        ));
    }

    Ok(Json(ParseResultsResponse {
        gap_analysis: parse_gap_analysis(&request.gap_analysis_text),
        steps: parse_action_plan(&request.action_plan_text),
    }))
}
