use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tracing::error;

use crate::error::ScrapeError;

/// A scrape failure tagged with the generic message shown for 500s on that route.
pub struct ApiError {
    pub err: ScrapeError,
    pub context: &'static str,
}

impl ApiError {
    pub fn new(context: &'static str) -> impl FnOnce(ScrapeError) -> ApiError {
        move |err| ApiError { err, context }
    }

    pub fn status(&self) -> StatusCode {
        match &self.err {
            e if e.is_bad_input() => StatusCode::BAD_REQUEST,
            ScrapeError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self.err {
            ScrapeError::InvalidQuery => "Search parameter (q) is required".to_string(),
            ScrapeError::InvalidPath(_) => "Invalid path".to_string(),
            ScrapeError::NotFound(_) => "Translation not found".to_string(),
            other => {
                error!(error = %other, "{}", self.context);
                self.context.to_string()
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
