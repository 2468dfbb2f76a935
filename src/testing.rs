// src/testing.rs
//
// Implementações em memória das capacidades de leitura, só para testes.

use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    common::{clock::TimeWindow, error::AppError},
    db::store::{MenuSource, OrderFilter, OrderSource, OrderTimeField, RestaurantDirectory, StaffSource},
    models::{
        order::{Order, OrderItem, OrderStatus, OrderWithItems, PaymentStatus, Staff},
        principal::Role,
        restaurant::{Category, MenuItemRef, Restaurant},
    },
};

pub fn money(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn at(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

pub fn restaurant(organization_id: Uuid, name: &str) -> Restaurant {
    restaurant_with_metadata(organization_id, name, json!({}))
}

pub fn restaurant_with_metadata(organization_id: Uuid, name: &str, metadata: Value) -> Restaurant {
    Restaurant { id: Uuid::new_v4(), organization_id, name: name.to_string(), metadata, is_active: true }
}

pub fn order(
    restaurant_id: Uuid,
    status: OrderStatus,
    payment_status: PaymentStatus,
    total: &str,
    created_at: DateTime<Utc>,
) -> Order {
    Order {
        id: Uuid::new_v4(),
        restaurant_id,
        status,
        payment_status,
        payment_method: None,
        total_amount: money(total),
        table_number: None,
        created_at,
        completed_at: None,
    }
}

pub fn item(order_id: Uuid, name: Option<&str>, category_id: Option<Uuid>, quantity: i32, unit_price: &str) -> OrderItem {
    let unit_price = money(unit_price);
    OrderItem {
        order_id,
        menu_item_id: Uuid::new_v4(),
        quantity,
        unit_price,
        total_price: Decimal::from(quantity) * unit_price,
        special_instructions: None,
        menu_item: name.map(|n| MenuItemRef { name: n.to_string(), category_id }),
    }
}

pub fn staff(restaurant_id: Uuid, role: Role, is_active: bool) -> Staff {
    Staff { id: Uuid::new_v4(), restaurant_id: Some(restaurant_id), organization_id: None, role, is_active }
}

#[derive(Default)]
pub struct InMemoryStore {
    pub restaurants: Vec<Restaurant>,
    pub orders: Vec<OrderWithItems>,
    pub staff: Vec<Staff>,
    pub categories: Vec<Category>,
    pub fail_orders: bool,
    pub fail_staff: bool,
    pub lookups: AtomicUsize,
}

impl InMemoryStore {
    /// Quantas chamadas de leitura (de qualquer tipo) foram feitas.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn add_order(&mut self, order: Order, items: Vec<OrderItem>) {
        self.orders.push(OrderWithItems { order, items });
    }

    fn touch(&self) {
        self.lookups.fetch_add(1, Ordering::SeqCst);
    }

    fn matching(&self, restaurant_ids: &[Uuid], window: TimeWindow, filter: &OrderFilter) -> Vec<OrderWithItems> {
        let mut found: Vec<OrderWithItems> = self
            .orders
            .iter()
            .filter(|o| restaurant_ids.contains(&o.order.restaurant_id))
            .filter(|o| {
                let instant = match filter.time_field {
                    OrderTimeField::CreatedAt => Some(o.order.created_at),
                    OrderTimeField::CompletedAt => o.order.completed_at,
                };
                instant.is_some_and(|t| window.contains(t))
            })
            .filter(|o| filter.statuses.is_empty() || filter.statuses.contains(&o.order.status))
            .filter(|o| filter.payment_status.is_none_or(|p| p == o.order.payment_status))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.order.created_at.cmp(&a.order.created_at));
        found
    }
}

fn upstream_failure() -> AppError {
    AppError::DatabaseError(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl RestaurantDirectory for InMemoryStore {
    async fn find_restaurant(&self, id: Uuid) -> Result<Option<Restaurant>, AppError> {
        self.touch();
        Ok(self.restaurants.iter().find(|r| r.id == id).cloned())
    }

    async fn find_restaurant_in_organization(
        &self,
        id: Uuid,
        organization_id: Uuid,
    ) -> Result<Option<Restaurant>, AppError> {
        self.touch();
        Ok(self
            .restaurants
            .iter()
            .find(|r| r.id == id && r.organization_id == organization_id)
            .cloned())
    }

    async fn list_restaurants(&self, organization_id: Uuid) -> Result<Vec<Restaurant>, AppError> {
        self.touch();
        Ok(self.restaurants.iter().filter(|r| r.organization_id == organization_id).cloned().collect())
    }

    async fn list_active_restaurants(&self) -> Result<Vec<Restaurant>, AppError> {
        self.touch();
        Ok(self.restaurants.iter().filter(|r| r.is_active).cloned().collect())
    }
}

#[async_trait]
impl OrderSource for InMemoryStore {
    async fn list_orders(
        &self,
        restaurant_ids: &[Uuid],
        window: TimeWindow,
        filter: &OrderFilter,
    ) -> Result<Vec<Order>, AppError> {
        self.touch();
        if self.fail_orders {
            return Err(upstream_failure());
        }
        Ok(self.matching(restaurant_ids, window, filter).into_iter().map(|o| o.order).collect())
    }

    async fn list_orders_with_items(
        &self,
        restaurant_ids: &[Uuid],
        window: TimeWindow,
        filter: &OrderFilter,
    ) -> Result<Vec<OrderWithItems>, AppError> {
        self.touch();
        if self.fail_orders {
            return Err(upstream_failure());
        }
        Ok(self.matching(restaurant_ids, window, filter))
    }

    async fn list_recent_orders(
        &self,
        restaurant_ids: &[Uuid],
        limit: i64,
    ) -> Result<Vec<OrderWithItems>, AppError> {
        self.touch();
        if self.fail_orders {
            return Err(upstream_failure());
        }
        let mut found: Vec<OrderWithItems> = self
            .orders
            .iter()
            .filter(|o| restaurant_ids.contains(&o.order.restaurant_id))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.order.created_at.cmp(&a.order.created_at));
        found.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(found)
    }
}

#[async_trait]
impl StaffSource for InMemoryStore {
    async fn list_active_staff(
        &self,
        restaurant_ids: &[Uuid],
        roles: &[Role],
    ) -> Result<Vec<Staff>, AppError> {
        self.touch();
        if self.fail_staff {
            return Err(upstream_failure());
        }
        Ok(self
            .staff
            .iter()
            .filter(|s| s.is_active && roles.contains(&s.role))
            .filter(|s| s.restaurant_id.is_some_and(|id| restaurant_ids.contains(&id)))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl MenuSource for InMemoryStore {
    async fn list_categories(&self, restaurant_id: Uuid) -> Result<Vec<Category>, AppError> {
        self.touch();
        Ok(self.categories.iter().filter(|c| c.restaurant_id == restaurant_id).cloned().collect())
    }
}
