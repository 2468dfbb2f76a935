// src/middleware/tenancy.rs

use axum::{
    extract::{FromRef, FromRequestParts, Query},
    http::{request::Parts, HeaderMap, Uri},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
};

// O nome do nosso cabeçalho HTTP customizado
pub const RESTAURANT_ID_HEADER: &str = "x-restaurant-id";

#[derive(Debug, Default, Deserialize)]
struct SelectionQuery {
    #[serde(rename = "restaurantId", alias = "restaurant_id")]
    restaurant_id: Option<String>,
}

/// Restaurante que o cliente pediu (query `restaurantId`/`restaurant_id` ou
/// cabeçalho `x-restaurant-id`). Ausente é válido: quem decide o escopo é o resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestaurantSelection(pub Option<Uuid>);

impl RestaurantSelection {
    /// A query tem prioridade sobre o cabeçalho. Valor vazio conta como ausente.
    pub fn parse(uri: &Uri, headers: &HeaderMap) -> Result<Self, AppError> {
        let Query(query) = Query::<SelectionQuery>::try_from_uri(uri)
            .map_err(|_| AppError::InvalidRestaurantId(uri.query().unwrap_or_default().to_string()))?;
        let from_query = query.restaurant_id;

        let raw = match from_query {
            Some(value) => Some(value),
            None => match headers.get(RESTAURANT_ID_HEADER) {
                Some(value) => Some(
                    value
                        .to_str()
                        .map_err(|_| AppError::InvalidRestaurantId(String::from_utf8_lossy(value.as_bytes()).into_owned()))?
                        .to_string(),
                ),
                None => None,
            },
        };

        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(RestaurantSelection(None)),
            Some(value) => Uuid::parse_str(value)
                .map(|id| RestaurantSelection(Some(id)))
                .map_err(|_| AppError::InvalidRestaurantId(value.to_string())),
        }
    }
}

impl<S> FromRequestParts<S> for RestaurantSelection
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        RestaurantSelection::parse(&parts.uri, &parts.headers).map_err(|e| {
            let app_state = AppState::from_ref(state);
            let locale = Locale::from_headers(&parts.headers, &app_state.i18n_store);
            e.to_api_error(&locale, &app_state.i18n_store)
        })
    }
}
