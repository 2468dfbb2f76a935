// src/handlers/restaurants.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        tenancy::RestaurantSelection,
    },
    models::{access::AccessDecision, restaurant::Restaurant},
};

// GET /api/restaurants
// Lista do seletor: o que o usuário pode escolher quando o escopo vem "none-selected"
#[utoipa::path(
    get,
    path = "/api/restaurants",
    tag = "Restaurants",
    responses(
        (status = 200, description = "Restaurantes que o usuário pode selecionar", body = Vec<Restaurant>),
        (status = 401, description = "Não autorizado"),
        (status = 403, description = "Conta sem organização/restaurante")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn list_selectable(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let restaurants = app_state.access_resolver
        .selectable_restaurants(&user.0)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(restaurants)))
}

// GET /api/restaurants/scope
// Devolve a decisão do resolver como valor; "denied" aqui não é erro
#[utoipa::path(
    get,
    path = "/api/restaurants/scope",
    tag = "Restaurants",
    responses(
        (status = 200, description = "Como o escopo do usuário foi resolvido", body = AccessDecision),
        (status = 400, description = "restaurantId malformado"),
        (status = 401, description = "Não autorizado")
    ),
    params(
        ("restaurantId" = Option<uuid::Uuid>, Query, description = "ID do restaurante")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_scope(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    selection: RestaurantSelection,
) -> Result<impl IntoResponse, ApiError> {
    let decision = app_state.access_resolver
        .resolve(&user.0, selection.0)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(decision)))
}
