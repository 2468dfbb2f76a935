// src/handlers/reports.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;
use validator::{Validate, ValidationError};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        tenancy::RestaurantSelection,
    },
    models::{principal::RoleScope, report::EndOfDayReport},
};

const DATE_FORMAT: &str = "%Y-%m-%d";

// ---
// 1. Query string (o restaurant_id vem pelo RestaurantSelection)
// ---
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    /// Dia civil no formato YYYY-MM-DD; padrão: hoje
    #[validate(custom(function = "validate_report_date", message = "A data deve usar o formato YYYY-MM-DD."))]
    #[param(example = "2026-03-10")]
    pub date: Option<String>,
}

fn validate_report_date(value: &str) -> Result<(), ValidationError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(|_| ())
        .map_err(|_| ValidationError::new("date_format"))
}

// ---
// 2. O Handler
// ---
// GET /api/reports/end-of-day
#[utoipa::path(
    get,
    path = "/api/reports/end-of-day",
    tag = "Reports",
    params(
        ("restaurant_id" = uuid::Uuid, Query, description = "Restaurante do fechamento (obrigatório)"),
        ReportQuery
    ),
    responses(
        (status = 200, description = "Fechamento do dia (Z-report) do restaurante", body = EndOfDayReport),
        (status = 400, description = "restaurant_id ausente/malformado ou data inválida"),
        (status = 401, description = "Não autorizado"),
        (status = 403, description = "Sem acesso a este restaurante"),
        (status = 404, description = "Restaurante não encontrado")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_end_of_day(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    selection: RestaurantSelection,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    let requested = selection.0.ok_or(AppError::MissingRestaurantId).map_err(to_api)?;

    query.validate().map_err(|e| to_api(AppError::ValidationError(e)))?;
    let date = match query.date.as_deref() {
        Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map_err(|_| to_api(AppError::InvalidDate(raw.to_string())))?,
        None => app_state.clock.local_date(app_state.clock.now()),
    };

    let scope = app_state.access_resolver
        .resolve(&user.0, Some(requested))
        .await
        .map_err(to_api)?;

    // O fechamento é sempre de um único restaurante: só match explícito serve
    let restaurant_id = match scope.explicit_restaurant() {
        Some(id) => id,
        None if user.0.role.scope() == RoleScope::Platform => {
            return Err(to_api(AppError::RestaurantNotFound));
        }
        None => return Err(to_api(AppError::AuthorizationDenied)),
    };

    let report = app_state.report_service
        .build_report(restaurant_id, date)
        .await
        .map_err(to_api)?;

    Ok((StatusCode::OK, Json(report)))
}
