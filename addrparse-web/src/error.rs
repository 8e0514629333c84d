use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

/// Erros devolvidos pela API HTTP como `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Texto vazio")]
    EmptyText,
    #[error("entrada com {size} bytes excede o limite de {limit}")]
    InputTooLarge { size: usize, limit: usize },
    #[error("lote com {size} textos excede o limite de {limit}")]
    BatchTooLarge { size: usize, limit: usize },
    #[error("falha interna na extração")]
    Worker,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::EmptyText => StatusCode::BAD_REQUEST,
            ApiError::InputTooLarge { .. } | ApiError::BatchTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Worker => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::EmptyText.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::InputTooLarge { size: 2, limit: 1 }.status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(ApiError::Worker.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_worker_error_response() {
        let resp = ApiError::Worker.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
