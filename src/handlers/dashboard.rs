// src/handlers/dashboard.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        tenancy::RestaurantSelection,
    },
    models::dashboard::DashboardResponse,
};

// GET /api/dashboard/metrics
#[utoipa::path(
    get,
    path = "/api/dashboard/metrics",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Métricas do dia. Sem restaurante escolhido, tudo zerado (scope.outcome = none-selected)", body = DashboardResponse),
        (status = 400, description = "restaurantId malformado"),
        (status = 401, description = "Não autorizado"),
        (status = 403, description = "Sem acesso a nenhum restaurante")
    ),
    params(
        ("restaurantId" = Option<uuid::Uuid>, Query, description = "ID do restaurante"),
        ("x-restaurant-id" = Option<uuid::Uuid>, Header, description = "Alternativa ao parâmetro de query")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_metrics(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    selection: RestaurantSelection,
) -> Result<impl IntoResponse, ApiError> {

    let scope = app_state.access_resolver
        .resolve(&user.0, selection.0)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    if scope.is_denied() {
        return Err(AppError::AuthorizationDenied.to_api_error(&locale, &app_state.i18n_store));
    }

    // none-selected chega aqui com conjunto vazio: métricas zeradas, sem consultas
    let metrics = app_state.metrics_service
        .compute_daily_metrics(scope.restaurant_ids(), app_state.clock.now())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(DashboardResponse { scope, metrics })))
}
