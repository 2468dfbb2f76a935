// src/models/dashboard.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{access::AccessDecision, order::OrderStatus};

// 1. Métricas do dia (os cards do topo + listas)
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    #[schema(example = "1530.75")]
    pub todays_revenue: Decimal,
    #[schema(example = "1200.00")]
    pub yesterdays_revenue: Decimal,
    // Percentual; zero quando ontem não teve receita
    #[schema(example = "27.56")]
    pub revenue_change: Decimal,
    pub orders_today: i64,
    pub active_orders: i64,
    pub pending_orders: i64,
    pub preparing_orders: i64,
    pub status_counts: StatusCounts,
    pub active_staff: i64,
    // Média real de created_at -> completed_at dos pedidos concluídos hoje
    #[schema(example = "18.5")]
    pub average_order_minutes: Option<Decimal>,
    pub recent_orders: Vec<RecentOrderSummary>,
    pub hourly_revenue: Vec<HourlyRevenue>,
}

// 2. Contagem por status (pedidos criados hoje)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub pending: i64,
    pub confirmed: i64,
    pub preparing: i64,
    pub ready: i64,
    pub served: i64,
    pub completed: i64,
    pub cancelled: i64,
}

impl StatusCounts {
    pub fn record(&mut self, status: OrderStatus) {
        *self.slot(status) += 1;
    }

    pub fn count(&self, status: OrderStatus) -> i64 {
        match status {
            OrderStatus::Pending => self.pending,
            OrderStatus::Confirmed => self.confirmed,
            OrderStatus::Preparing => self.preparing,
            OrderStatus::Ready => self.ready,
            OrderStatus::Served => self.served,
            OrderStatus::Completed => self.completed,
            OrderStatus::Cancelled => self.cancelled,
        }
    }

    /// Pedidos ainda em andamento (pending, confirmed, preparing, ready).
    pub fn active(&self) -> i64 {
        OrderStatus::ACTIVE.iter().map(|s| self.count(*s)).sum()
    }

    fn slot(&mut self, status: OrderStatus) -> &mut i64 {
        match status {
            OrderStatus::Pending => &mut self.pending,
            OrderStatus::Confirmed => &mut self.confirmed,
            OrderStatus::Preparing => &mut self.preparing,
            OrderStatus::Ready => &mut self.ready,
            OrderStatus::Served => &mut self.served,
            OrderStatus::Completed => &mut self.completed,
            OrderStatus::Cancelled => &mut self.cancelled,
        }
    }
}

// 3. Pedidos recentes
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentOrderSummary {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    #[schema(example = "#4821")]
    pub order_number: String,
    #[schema(example = "Table 7")]
    pub table_label: String,
    #[schema(example = "Margherita +2 more")]
    pub item_summary: String,
    #[schema(example = 4)]
    pub item_count: i64,
    #[schema(example = "64.90")]
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

// 4. Receita por hora (últimas horas até a hora atual)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HourlyRevenue {
    #[schema(example = 14)]
    pub hour: u32,
    #[schema(example = "14:00")]
    pub label: String,
    #[schema(example = "320.50")]
    pub revenue: Decimal,
}

// Resposta do endpoint: as métricas + como o escopo foi decidido
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub scope: AccessDecision,
    #[serde(flatten)]
    pub metrics: DashboardMetrics,
}
