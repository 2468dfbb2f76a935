// src/db/store.rs
//
// As "capacidades" de leitura que o núcleo recebe. Os serviços só conhecem
// estes traits; o Postgres entra pelos repositórios e os testes entram com
// implementações em memória.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::{clock::TimeWindow, error::AppError},
    models::{
        order::{Order, OrderStatus, OrderWithItems, PaymentStatus, Staff},
        principal::Role,
        restaurant::{Category, Restaurant},
    },
};

#[async_trait]
pub trait RestaurantDirectory: Send + Sync {
    async fn find_restaurant(&self, id: Uuid) -> Result<Option<Restaurant>, AppError>;

    /// Só encontra se o restaurante for da organização informada.
    async fn find_restaurant_in_organization(
        &self,
        id: Uuid,
        organization_id: Uuid,
    ) -> Result<Option<Restaurant>, AppError>;

    async fn list_restaurants(&self, organization_id: Uuid) -> Result<Vec<Restaurant>, AppError>;

    /// Restaurantes ativos da plataforma inteira (seletor do super_admin).
    async fn list_active_restaurants(&self) -> Result<Vec<Restaurant>, AppError>;
}

/// Qual timestamp do pedido a janela de tempo filtra.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderTimeField {
    CreatedAt,
    CompletedAt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderFilter {
    pub time_field: OrderTimeField,
    // Vazio = qualquer status
    pub statuses: Vec<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
}

impl OrderFilter {
    pub fn created_in_window() -> Self {
        Self { time_field: OrderTimeField::CreatedAt, statuses: Vec::new(), payment_status: None }
    }

    pub fn paid_created_in_window() -> Self {
        Self { payment_status: Some(PaymentStatus::Paid), ..Self::created_in_window() }
    }

    pub fn completed_in_window() -> Self {
        Self {
            time_field: OrderTimeField::CompletedAt,
            statuses: vec![OrderStatus::Completed],
            payment_status: None,
        }
    }
}

#[async_trait]
pub trait OrderSource: Send + Sync {
    async fn list_orders(
        &self,
        restaurant_ids: &[Uuid],
        window: TimeWindow,
        filter: &OrderFilter,
    ) -> Result<Vec<Order>, AppError>;

    /// Mesmo filtro, com itens e o item de cardápio de cada um.
    async fn list_orders_with_items(
        &self,
        restaurant_ids: &[Uuid],
        window: TimeWindow,
        filter: &OrderFilter,
    ) -> Result<Vec<OrderWithItems>, AppError>;

    /// Os `limit` pedidos mais recentes por `created_at`, com itens.
    async fn list_recent_orders(
        &self,
        restaurant_ids: &[Uuid],
        limit: i64,
    ) -> Result<Vec<OrderWithItems>, AppError>;
}

#[async_trait]
pub trait StaffSource: Send + Sync {
    async fn list_active_staff(
        &self,
        restaurant_ids: &[Uuid],
        roles: &[Role],
    ) -> Result<Vec<Staff>, AppError>;
}

#[async_trait]
pub trait MenuSource: Send + Sync {
    async fn list_categories(&self, restaurant_id: Uuid) -> Result<Vec<Category>, AppError>;
}
