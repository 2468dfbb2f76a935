// src/services/access_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::store::RestaurantDirectory,
    models::{
        access::AccessDecision,
        principal::{Principal, RoleScope},
        restaurant::Restaurant,
    },
};

/// Decide sobre quais restaurantes um principal pode operar.
///
/// Toda combinação de (escopo do cargo, afiliação, restaurante pedido) cai em
/// exatamente um resultado. O único erro possível é a falha de uma consulta
/// ao diretório; política nunca vira erro. No máximo duas consultas, sem
/// segunda rodada depois de decidido.
#[derive(Clone)]
pub struct AccessScopeResolver {
    directory: Arc<dyn RestaurantDirectory>,
}

impl AccessScopeResolver {
    pub fn new(directory: Arc<dyn RestaurantDirectory>) -> Self {
        Self { directory }
    }

    pub async fn resolve(
        &self,
        principal: &Principal,
        requested_restaurant_id: Option<Uuid>,
    ) -> Result<AccessDecision, AppError> {
        let decision = match (
            principal.role.scope(),
            principal.organization_id,
            principal.restaurant_id,
            requested_restaurant_id,
        ) {
            // super_admin: limitado só pela existência do restaurante
            (RoleScope::Platform, _, _, None) => AccessDecision::none_selected(),
            (RoleScope::Platform, _, _, Some(requested)) => {
                match self.directory.find_restaurant(requested).await? {
                    Some(restaurant) => AccessDecision::explicit(restaurant.id),
                    None => AccessDecision::none_selected(),
                }
            }

            // org_admin sem organização é conta mal configurada
            (RoleScope::Organization, None, _, _) => AccessDecision::denied(),
            (RoleScope::Organization, Some(_), _, None) => AccessDecision::none_selected(),
            (RoleScope::Organization, Some(organization_id), _, Some(requested)) => {
                match self
                    .directory
                    .find_restaurant_in_organization(requested, organization_id)
                    .await?
                {
                    Some(restaurant) => AccessDecision::explicit(restaurant.id),
                    None => {
                        let own = self.directory.list_restaurants(organization_id).await?;
                        AccessDecision::fallback_organization_wide(own.into_iter().map(|r| r.id).collect())
                    }
                }
            }

            // Cargos de loja: nunca ampliados além do próprio restaurante
            (RoleScope::Restaurant, _, None, _) => AccessDecision::denied(),
            (RoleScope::Restaurant, _, Some(own), Some(requested)) if requested == own => {
                AccessDecision::explicit(own)
            }
            (RoleScope::Restaurant, _, Some(own), _) => AccessDecision::fallback_single(own),
        };

        tracing::debug!(
            principal_id = %principal.id,
            role = principal.role.as_str(),
            requested = ?requested_restaurant_id,
            outcome = ?decision.outcome(),
            restaurants = decision.restaurant_ids().len(),
            "Escopo de acesso resolvido"
        );

        Ok(decision)
    }

    /// Restaurantes que o principal pode escolher no seletor.
    pub async fn selectable_restaurants(&self, principal: &Principal) -> Result<Vec<Restaurant>, AppError> {
        match (principal.role.scope(), principal.organization_id, principal.restaurant_id) {
            (RoleScope::Platform, _, _) => self.directory.list_active_restaurants().await,
            (RoleScope::Organization, Some(organization_id), _) => {
                self.directory.list_restaurants(organization_id).await
            }
            (RoleScope::Restaurant, _, Some(own)) => {
                Ok(self.directory.find_restaurant(own).await?.into_iter().collect())
            }
            (RoleScope::Organization, None, _) | (RoleScope::Restaurant, _, None) => {
                Err(AppError::AuthorizationDenied)
            }
        }
    }
}
