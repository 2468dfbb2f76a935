// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Users ---
        handlers::auth::get_me,

        // --- Restaurants ---
        handlers::restaurants::list_selectable,
        handlers::restaurants::get_scope,

        // --- Dashboard ---
        handlers::dashboard::get_metrics,

        // --- Reports ---
        handlers::reports::get_end_of_day,
    ),
    components(
        schemas(
            // --- Identity ---
            models::principal::Role,
            models::principal::Principal,

            // --- Access ---
            models::access::AccessOutcome,
            models::access::AccessDecision,

            // --- Restaurants ---
            models::restaurant::Restaurant,

            // --- Orders ---
            models::order::OrderStatus,

            // --- Dashboard ---
            models::dashboard::DashboardResponse,
            models::dashboard::DashboardMetrics,
            models::dashboard::StatusCounts,
            models::dashboard::RecentOrderSummary,
            models::dashboard::HourlyRevenue,

            // --- Reports ---
            models::report::TaxBase,
            models::report::SalesTotal,
            models::report::PaymentBreakdown,
            models::report::EndOfDayReport,
        )
    ),
    tags(
        (name = "Users", description = "Dados do Usuário autenticado"),
        (name = "Restaurants", description = "Seletor de restaurantes e escopo de acesso"),
        (name = "Dashboard", description = "Indicadores operacionais do dia"),
        (name = "Reports", description = "Fechamento do dia (Z-report)")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
