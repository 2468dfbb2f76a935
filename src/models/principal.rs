// src/models/principal.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// Conjunto fechado de cargos. Cada cargo pertence a exatamente um "escopo".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "staff_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    OrgAdmin,
    Manager,
    Server,
    Kitchen,
    Cashier,
}

/// De onde vem a autoridade de um cargo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleScope {
    Platform,
    Organization,
    Restaurant,
}

impl Role {
    pub const fn scope(self) -> RoleScope {
        match self {
            Role::SuperAdmin => RoleScope::Platform,
            Role::OrgAdmin => RoleScope::Organization,
            Role::Manager | Role::Server | Role::Kitchen | Role::Cashier => RoleScope::Restaurant,
        }
    }

    /// Cargos contados como equipe ativa no dashboard.
    pub const STAFF: [Role; 4] = [Role::Server, Role::Kitchen, Role::Cashier, Role::Manager];

    pub const fn as_str(self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::OrgAdmin => "org_admin",
            Role::Manager => "manager",
            Role::Server => "server",
            Role::Kitchen => "kitchen",
            Role::Cashier => "cashier",
        }
    }
}

// O ator autenticado. Vem dos claims do token, nunca do corpo da requisição.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub id: Uuid,
    pub role: Role,
    pub organization_id: Option<Uuid>,
    pub restaurant_id: Option<Uuid>,
}

impl Principal {
    pub fn super_admin(id: Uuid) -> Self {
        Self { id, role: Role::SuperAdmin, organization_id: None, restaurant_id: None }
    }

    pub fn org_admin(id: Uuid, organization_id: Option<Uuid>) -> Self {
        Self { id, role: Role::OrgAdmin, organization_id, restaurant_id: None }
    }

    pub fn restaurant_staff(id: Uuid, role: Role, restaurant_id: Option<Uuid>) -> Self {
        Self { id, role, organization_id: None, restaurant_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_maps_to_one_scope() {
        assert_eq!(Role::SuperAdmin.scope(), RoleScope::Platform);
        assert_eq!(Role::OrgAdmin.scope(), RoleScope::Organization);
        for role in Role::STAFF {
            assert_eq!(role.scope(), RoleScope::Restaurant);
        }
    }

    #[test]
    fn role_uses_snake_case_on_the_wire() {
        let json = serde_json::to_string(&Role::OrgAdmin).unwrap();
        assert_eq!(json, "\"org_admin\"");

        let role: Role = serde_json::from_str("\"super_admin\"").unwrap();
        assert_eq!(role, Role::SuperAdmin);
        assert_eq!(Role::Cashier.as_str(), "cashier");
    }
}
