use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Error: {0}")]
    Store(String),
}

impl ApiError {
    pub fn store<E: std::error::Error>(e: E) -> Self {
        log::error!("Database error: {e}");
        ApiError::Store(e.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::InternalServerError()
            .content_type("text/plain")
            .body(self.to_string())
    }
}
