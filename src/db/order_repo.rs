// src/db/order_repo.rs

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::{
    common::{clock::TimeWindow, error::AppError},
    db::store::{OrderFilter, OrderSource, OrderTimeField},
    models::{
        order::{Order, OrderItem, OrderWithItems},
        restaurant::MenuItemRef,
    },
};

// Linha do JOIN order_items + menu_items
#[derive(Debug, FromRow)]
struct OrderItemRow {
    order_id: Uuid,
    menu_item_id: Uuid,
    quantity: i32,
    unit_price: Decimal,
    total_price: Decimal,
    special_instructions: Option<String>,
    menu_item_name: Option<String>,
    category_id: Option<Uuid>,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        // LEFT JOIN: sem nome significa item removido do cardápio
        let menu_item = row.menu_item_name.map(|name| MenuItemRef {
            name,
            category_id: row.category_id,
        });

        OrderItem {
            order_id: row.order_id,
            menu_item_id: row.menu_item_id,
            quantity: row.quantity,
            unit_price: row.unit_price,
            total_price: row.total_price,
            special_instructions: row.special_instructions,
            menu_item,
        }
    }
}

#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn attach_items(&self, orders: Vec<Order>) -> Result<Vec<OrderWithItems>, AppError> {
        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();

        let rows = sqlx::query_as::<_, OrderItemRow>(
            r#"
            SELECT
                oi.order_id, oi.menu_item_id, oi.quantity,
                oi.unit_price, oi.total_price, oi.special_instructions,
                mi.name AS menu_item_name,
                mi.category_id
            FROM order_items oi
            LEFT JOIN menu_items mi ON mi.id = oi.menu_item_id
            WHERE oi.order_id = ANY($1)
            ORDER BY oi.order_id, oi.position ASC
            "#,
        )
            .bind(&order_ids)
            .fetch_all(&self.pool)
            .await?;

        let mut items_by_order: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
        for row in rows {
            items_by_order.entry(row.order_id).or_default().push(row.into());
        }

        Ok(orders
            .into_iter()
            .map(|order| {
                let items = items_by_order.remove(&order.id).unwrap_or_default();
                OrderWithItems { order, items }
            })
            .collect())
    }
}

#[async_trait]
impl OrderSource for OrderRepository {
    async fn list_orders(
        &self,
        restaurant_ids: &[Uuid],
        window: TimeWindow,
        filter: &OrderFilter,
    ) -> Result<Vec<Order>, AppError> {
        let time_column = match filter.time_field {
            OrderTimeField::CreatedAt => "created_at",
            OrderTimeField::CompletedAt => "completed_at",
        };

        let statuses: Vec<&str> = filter.statuses.iter().map(|s| s.as_str()).collect();
        let payment_status = filter.payment_status.map(|p| p.as_str());

        // Status são enums no Postgres; comparamos como texto para poder
        // passar a lista inteira num único parâmetro.
        let sql = format!(
            r#"
            SELECT
                id, restaurant_id, status, payment_status, payment_method,
                total_amount, table_number, created_at, completed_at
            FROM orders
            WHERE restaurant_id = ANY($1)
              AND {time_column} >= $2
              AND {time_column} < $3
              AND (cardinality($4::text[]) = 0 OR status::text = ANY($4))
              AND ($5::text IS NULL OR payment_status::text = $5)
            ORDER BY created_at DESC, id ASC
            "#
        );

        let orders = sqlx::query_as::<_, Order>(&sql)
            .bind(restaurant_ids)
            .bind(window.start)
            .bind(window.end)
            .bind(&statuses)
            .bind(payment_status)
            .fetch_all(&self.pool)
            .await?;

        Ok(orders)
    }

    async fn list_orders_with_items(
        &self,
        restaurant_ids: &[Uuid],
        window: TimeWindow,
        filter: &OrderFilter,
    ) -> Result<Vec<OrderWithItems>, AppError> {
        let orders = self.list_orders(restaurant_ids, window, filter).await?;
        self.attach_items(orders).await
    }

    async fn list_recent_orders(
        &self,
        restaurant_ids: &[Uuid],
        limit: i64,
    ) -> Result<Vec<OrderWithItems>, AppError> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT
                id, restaurant_id, status, payment_status, payment_method,
                total_amount, table_number, created_at, completed_at
            FROM orders
            WHERE restaurant_id = ANY($1)
            ORDER BY created_at DESC, id ASC
            LIMIT $2
            "#,
        )
            .bind(restaurant_ids)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        self.attach_items(orders).await
    }
}
