use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tvl_domain::ConversionError;
use tvl_domain::value_objects::AssetId;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unknown asset: {0}")]
    UnknownAsset(AssetId),
    #[error("step size must be a positive number of hours")]
    InvalidStep,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::UnknownAsset(_) => (StatusCode::NOT_FOUND, self.to_string()).into_response(),
            ApiError::InvalidStep => (StatusCode::BAD_REQUEST, self.to_string()).into_response(),
            ApiError::Database(_) | ApiError::Conversion(_) => {
                // Detail goes to the log, not the client.
                tracing::error!(error = %self, "chart request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}
