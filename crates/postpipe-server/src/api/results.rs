use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct ResultsQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(super) struct ResultItem {
    id: i64,
    original: String,
    analysis: String,
    sentiment: String,
    timestamp: String,
}

pub(super) async fn list_results(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ResultsQuery>,
) -> Result<Json<ApiResponse<Vec<ResultItem>>>, ApiError> {
    let rows = postpipe_db::list_results(&state.pool, normalize_limit(query.limit))
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows
        .into_iter()
        .map(|row| ResultItem {
            id: row.id,
            original: row.original,
            analysis: row.analysis,
            sentiment: row.sentiment,
            timestamp: row.timestamp,
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[cfg(test)]
mod tests {
    use super::ResultItem;

    #[test]
    fn result_item_is_serializable() {
        let item = ResultItem {
            id: 7,
            original: "I love pizza".to_string(),
            analysis: "a".to_string(),
            sentiment: "enthusiastic".to_string(),
            timestamp: "2026-10-19T08:30:00.000000Z".to_string(),
        };

        let json = serde_json::to_string(&item).expect("serialize result item");
        assert!(json.contains("\"id\":7"));
        assert!(json.contains("\"sentiment\":\"enthusiastic\""));
    }
}
