//! User registration statistics
//!
//! GET /userAggregate?type=total|by_domain|by_day|by_month&from=..&to=..

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::AppState;
use useragg_core::{aggregate_users, AggregateRow, AggregationKind, DateFilter};

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("invalid type")]
    InvalidType,
    #[error("{0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for AggregateError {
    fn into_response(self) -> Response {
        let status = match self {
            AggregateError::InvalidType => StatusCode::BAD_REQUEST,
            AggregateError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Aggregate user registrations
/// GET /userAggregate
pub async fn get_user_aggregate(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<AggregateRow>>, AggregateError> {
    let filter = DateFilter::build(
        params.get("from").map(String::as_str),
        params.get("to").map(String::as_str),
    );

    let kind = params
        .get("type")
        .and_then(|raw| raw.parse::<AggregationKind>().ok())
        .ok_or_else(|| {
            tracing::debug!("Rejected user aggregation type {:?}", params.get("type"));
            AggregateError::InvalidType
        })?;

    let rows = aggregate_users(state.db.as_ref(), kind, &filter)
        .await
        .map_err(|e| {
            tracing::error!("Failed to aggregate users by {}: {:?}", kind, e);
            AggregateError::from(e)
        })?;

    Ok(Json(rows))
}
