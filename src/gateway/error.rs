use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::pipeline::PipelineError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            GatewayError::Pipeline(PipelineError::Retrieval(_))
            | GatewayError::Pipeline(PipelineError::Generation(_)) => StatusCode::BAD_GATEWAY,
            GatewayError::Pipeline(PipelineError::Store(_)) | GatewayError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}
