use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use tracing::info;

use crate::extraction::{ExtractError, ExtractRequest};
use crate::models::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/data", post(receive_file))
        .with_state(state)
}

/// POST /api/v1/data - Extract invoices, products and customers from a document
async fn receive_file(
    State(state): State<AppState>,
    payload: Result<Json<ExtractRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return ExtractError::MalformedRequest(rejection.body_text()).into_response();
        }
    };

    match state.extractor.extract(&request).await {
        Ok(value) => {
            info!(file_name = ?request.file_name, "File processed");
            (StatusCode::OK, Json(value)).into_response()
        }
        Err(e) => e.into_response(),
    }
}
