// Aggregate handlers (a001-a003)
pub mod a001_account;
pub mod a002_bi_report;
pub mod a003_favorite;

// Dashboard handlers
pub mod d400_report_catalog;

// UseCase handlers
pub mod usecases;

use axum::http::StatusCode;

use crate::shared::ports::PortError;
use crate::shared::services::{self, PortalServices};

/// Общие клиенты; до инициализации отвечаем 503
pub(crate) fn portal() -> Result<&'static PortalServices, StatusCode> {
    services::get().map_err(|e| {
        tracing::error!("{}", e);
        StatusCode::SERVICE_UNAVAILABLE
    })
}

/// Код ответа для ошибки внешнего сервиса
pub(crate) fn port_error_status(error: &PortError) -> StatusCode {
    match error {
        PortError::NotFound(_) => StatusCode::NOT_FOUND,
        PortError::Auth(_) | PortError::Http(_) | PortError::Status { .. } => {
            StatusCode::BAD_GATEWAY
        }
        PortError::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_status() {
        assert_eq!(
            port_error_status(&PortError::NotFound("r1".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            port_error_status(&PortError::Status {
                code: 500,
                body: String::new()
            }),
            StatusCode::BAD_GATEWAY
        );
    }
}
