use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Ошибки HTTP-слоя. Невалидные места внутри бронирования сюда не попадают:
/// они возвращаются как данные в `invalidBookings`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid booking data")]
    InvalidBookingData,

    #[error("No file uploaded")]
    NoFileUploaded,

    #[error("No valid booking data found")]
    NoBookingRows,

    #[error("Malformed file: {0}")]
    MalformedFile(String),

    #[error("Error processing file")]
    Io(#[from] std::io::Error),

    #[error("Error processing file")]
    Join(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBookingData
            | ApiError::NoFileUploaded
            | ApiError::NoBookingRows
            | ApiError::MalformedFile(_) => StatusCode::BAD_REQUEST,
            ApiError::Io(_) | ApiError::Join(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {:?}", self);
        } else {
            warn!("Rejected request: {}", self);
        }

        (
            status,
            Json(json!({
                "success": false,
                "error": self.to_string(),
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_bad_request() {
        assert_eq!(ApiError::InvalidBookingData.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NoFileUploaded.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::MalformedFile("not utf-8".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn io_failures_hide_details() {
        let err = ApiError::from(std::io::Error::other("disk full"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Error processing file");
    }
}
