// src/handlers/auth.rs

use axum::Json;

use crate::{middleware::auth::AuthenticatedUser, models::principal::Principal};

// Handler da rota protegida /me
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "O principal autenticado", body = Principal),
        (status = 401, description = "Não autorizado")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_me(AuthenticatedUser(principal): AuthenticatedUser) -> Json<Principal> {
    Json(principal)
}
