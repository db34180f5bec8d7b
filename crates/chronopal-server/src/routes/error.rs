//! Domain error to HTTP status mapping

use axum::http::StatusCode;

use chronopal::DomainError;

/// Error half of every handler result
pub type ApiError = (StatusCode, String);

pub fn api_error(e: DomainError) -> ApiError {
    let status = match &e {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        DomainError::PreconditionFailed(_) => StatusCode::PRECONDITION_FAILED,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Storage(_) => StatusCode::SERVICE_UNAVAILABLE,
        DomainError::ExternalService(_) => StatusCode::BAD_GATEWAY,
    };

    if status.is_server_error() {
        tracing::error!("Request failed: {}", e);
    }

    (status, e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DomainError::not_found("Pet", Uuid::nil()), StatusCode::NOT_FOUND),
            (DomainError::InvalidArgument("x".into()), StatusCode::BAD_REQUEST),
            (
                DomainError::PreconditionFailed("x".into()),
                StatusCode::PRECONDITION_FAILED,
            ),
            (DomainError::Conflict("x".into()), StatusCode::CONFLICT),
            (DomainError::Storage("x".into()), StatusCode::SERVICE_UNAVAILABLE),
            (DomainError::ExternalService("x".into()), StatusCode::BAD_GATEWAY),
        ];

        for (error, expected) in cases {
            assert_eq!(api_error(error).0, expected);
        }
    }
}
