// src/models/order.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{principal::Role, restaurant::MenuItemRef};

// --- Enums (mapeando os tipos do Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "order_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Served,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Pedidos que ainda ocupam a cozinha/salão.
    pub const ACTIVE: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Served => "served",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
    Refunded,
}

impl PaymentStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Digital,
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    // Nem toda loja registra a forma de pagamento
    pub payment_method: Option<PaymentMethod>,
    #[schema(example = "42.50")]
    pub total_amount: Decimal,
    #[schema(example = 7)]
    pub table_number: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub order_id: Uuid,
    pub menu_item_id: Uuid,
    #[schema(example = 2)]
    pub quantity: i32,
    #[schema(example = "12.50")]
    pub unit_price: Decimal,
    #[schema(example = "25.00")]
    pub total_price: Decimal,
    pub special_instructions: Option<String>,
    // Preenchido pelo JOIN com menu_items; None se o item foi apagado do cardápio
    pub menu_item: Option<MenuItemRef>,
}

impl OrderItem {
    /// `quantity * unit_price`. O `total_price` gravado não é confiável por si só.
    pub fn line_total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }

    /// Total da linha já conferido. Se divergir do gravado, vale o recalculado.
    pub fn checked_total(&self) -> Decimal {
        let recomputed = self.line_total();
        if recomputed != self.total_price {
            tracing::warn!(
                order_id = %self.order_id,
                menu_item_id = %self.menu_item_id,
                stored = %self.total_price,
                %recomputed,
                "total_price divergente de quantity * unit_price; usando o recalculado"
            );
        }
        recomputed
    }
}

// Pedido + itens (mesmo padrão do flatten usado nos detalhes de pedido)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: Uuid,
    pub restaurant_id: Option<Uuid>,
    pub organization_id: Option<Uuid>,
    pub role: Role,
    pub is_active: bool,
}
