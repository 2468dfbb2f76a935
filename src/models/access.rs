// src/models/access.rs

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

// Como o escopo foi decidido. Serializado em kebab-case para o front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AccessOutcome {
    Explicit,
    FallbackSingle,
    FallbackOrganizationWide,
    NoneSelected,
    Denied,
}

/// Resultado do resolvedor. Vive só durante a requisição e nunca é alterado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessDecision {
    outcome: AccessOutcome,
    restaurant_ids: Vec<Uuid>,
}

impl AccessDecision {
    pub fn explicit(restaurant_id: Uuid) -> Self {
        Self { outcome: AccessOutcome::Explicit, restaurant_ids: vec![restaurant_id] }
    }

    pub fn fallback_single(restaurant_id: Uuid) -> Self {
        Self { outcome: AccessOutcome::FallbackSingle, restaurant_ids: vec![restaurant_id] }
    }

    pub fn fallback_organization_wide(restaurant_ids: Vec<Uuid>) -> Self {
        Self { outcome: AccessOutcome::FallbackOrganizationWide, restaurant_ids }
    }

    pub fn none_selected() -> Self {
        Self { outcome: AccessOutcome::NoneSelected, restaurant_ids: Vec::new() }
    }

    pub fn denied() -> Self {
        Self { outcome: AccessOutcome::Denied, restaurant_ids: Vec::new() }
    }

    pub fn outcome(&self) -> AccessOutcome {
        self.outcome
    }

    pub fn restaurant_ids(&self) -> &[Uuid] {
        &self.restaurant_ids
    }

    pub fn is_denied(&self) -> bool {
        self.outcome == AccessOutcome::Denied
    }

    /// O único restaurante pedido explicitamente, se houve match.
    pub fn explicit_restaurant(&self) -> Option<Uuid> {
        match self.outcome {
            AccessOutcome::Explicit => self.restaurant_ids.first().copied(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_serializes_in_kebab_case() {
        let decision = AccessDecision::fallback_organization_wide(vec![]);
        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["outcome"], "fallback-organization-wide");
        assert_eq!(json["restaurantIds"], serde_json::json!([]));

        let json = serde_json::to_value(AccessDecision::none_selected()).unwrap();
        assert_eq!(json["outcome"], "none-selected");
    }

    #[test]
    fn explicit_restaurant_only_for_explicit_outcome() {
        let id = Uuid::new_v4();
        assert_eq!(AccessDecision::explicit(id).explicit_restaurant(), Some(id));
        assert_eq!(AccessDecision::fallback_single(id).explicit_restaurant(), None);
    }
}
