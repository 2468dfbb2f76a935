// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::common::i18n::I18nStore;
use crate::middleware::i18n::Locale;

// Erro interno dos serviços. Nunca vai direto para o cliente:
// os handlers convertem com `to_api_error(&locale, &i18n_store)`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Token inválido ou ausente")]
    InvalidToken,

    #[error("Acesso negado ao restaurante")]
    AuthorizationDenied,

    #[error("restaurant_id é obrigatório")]
    MissingRestaurantId,

    #[error("ID de restaurante inválido: {0}")]
    InvalidRestaurantId(String),

    #[error("Data inválida: {0}")]
    InvalidDate(String),

    #[error("Restaurante não encontrado")]
    RestaurantNotFound,

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    /// Código estável, legível por máquina, enviado junto com a mensagem.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_failed",
            AppError::InvalidToken => "authentication_missing",
            AppError::AuthorizationDenied => "authorization_denied",
            AppError::MissingRestaurantId => "restaurant_id_required",
            AppError::InvalidRestaurantId(_) => "invalid_restaurant_id",
            AppError::InvalidDate(_) => "invalid_date",
            AppError::RestaurantNotFound => "restaurant_not_found",
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::MissingRestaurantId
            | AppError::InvalidRestaurantId(_)
            | AppError::InvalidDate(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationDenied => StatusCode::FORBIDDEN,
            AppError::RestaurantNotFound => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn to_api_error(self, locale: &Locale, i18n_store: &I18nStore) -> ApiError {
        let status = self.status();
        let code = self.code();
        let message = i18n_store.message(&locale.0, code);

        let details = match &self {
            // Devolve todos os detalhes da validação, campo a campo
            AppError::ValidationError(errors) => {
                let mut details = serde_json::Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| e.message.as_ref().map(|m| m.to_string()).unwrap_or_else(|| e.code.to_string()))
                        .collect();
                    details.insert(field.to_string(), json!(messages));
                }
                Some(Value::Object(details))
            }
            AppError::InvalidRestaurantId(raw) | AppError::InvalidDate(raw) => {
                Some(json!({ "value": raw }))
            }
            // 5xx: o detalhe fica só no log
            e if status.is_server_error() => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                None
            }
            _ => None,
        };

        ApiError { status, code, error: message, details }
    }
}

// O que de fato sai na resposta HTTP.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "code": self.code, "error": self.error, "details": details }),
            None => json!({ "code": self.code, "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt() -> Locale {
        Locale("pt".to_string())
    }

    #[test]
    fn denied_maps_to_forbidden_with_localized_message() {
        let api = AppError::AuthorizationDenied.to_api_error(&pt(), &I18nStore::new());
        assert_eq!(api.status, StatusCode::FORBIDDEN);
        assert_eq!(api.code, "authorization_denied");
        assert_eq!(api.error, "Você não tem acesso a este restaurante.");
        assert!(api.details.is_none());
    }

    #[test]
    fn malformed_input_is_bad_request_and_echoes_the_value() {
        let api = AppError::InvalidDate("2026-13-45".into())
            .to_api_error(&Locale("en".into()), &I18nStore::new());
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.details, Some(json!({ "value": "2026-13-45" })));
    }

    #[test]
    fn upstream_failures_hide_details_from_the_client() {
        let api = AppError::DatabaseError(sqlx::Error::PoolTimedOut)
            .to_api_error(&Locale("en".into()), &I18nStore::new());
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.code, "internal_error");
        assert_eq!(api.error, "An unexpected error occurred.");
        assert!(api.details.is_none());
    }
}
