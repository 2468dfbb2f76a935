// src/services/metrics_service.rs

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use crate::{
    common::{
        clock::{BusinessClock, TimeWindow},
        error::AppError,
        money::{percent_change, round_currency},
    },
    db::store::{OrderFilter, OrderSource, StaffSource},
    models::{
        dashboard::{DashboardMetrics, HourlyRevenue, RecentOrderSummary, StatusCounts},
        order::{Order, OrderStatus, OrderWithItems},
        principal::Role,
    },
};

const RECENT_ORDERS: i64 = 5;
const MAX_HOURLY_BUCKETS: u32 = 7;

#[derive(Clone)]
pub struct MetricsAggregator {
    orders: Arc<dyn OrderSource>,
    staff: Arc<dyn StaffSource>,
    clock: BusinessClock,
}

impl MetricsAggregator {
    pub fn new(orders: Arc<dyn OrderSource>, staff: Arc<dyn StaffSource>, clock: BusinessClock) -> Self {
        Self { orders, staff, clock }
    }

    /// Métricas operacionais do dia para o conjunto de restaurantes já resolvido.
    ///
    /// Conjunto vazio é resultado válido: tudo zerado, nenhuma consulta feita.
    pub async fn compute_daily_metrics(
        &self,
        restaurant_ids: &[Uuid],
        now: DateTime<Utc>,
    ) -> Result<DashboardMetrics, AppError> {
        if restaurant_ids.is_empty() {
            return Ok(DashboardMetrics::default());
        }

        let today = self.clock.today(now);
        let yesterday = today.previous();

        let today_filter = OrderFilter::created_in_window();
        let yesterday_filter = OrderFilter::paid_created_in_window();

        // As consultas não dependem umas das outras. Se uma falhar, as demais
        // são abandonadas e nenhum resultado parcial é montado.
        let (today_orders, yesterday_paid, recent, active_staff) = tokio::try_join!(
            self.orders.list_orders(restaurant_ids, today, &today_filter),
            self.orders.list_orders(restaurant_ids, yesterday, &yesterday_filter),
            self.orders.list_recent_orders(restaurant_ids, RECENT_ORDERS),
            self.active_staff_best_effort(restaurant_ids),
        )
        .inspect_err(|e| {
            tracing::error!(
                ?restaurant_ids,
                today_start = %today.start,
                today_end = %today.end,
                "Falha ao calcular métricas do dashboard: {}", e
            );
        })?;

        let todays_revenue = paid_revenue(&today_orders);
        let yesterdays_revenue = paid_revenue(&yesterday_paid);

        let mut status_counts = StatusCounts::default();
        for order in &today_orders {
            status_counts.record(order.status);
        }

        Ok(DashboardMetrics {
            todays_revenue: round_currency(todays_revenue),
            yesterdays_revenue: round_currency(yesterdays_revenue),
            revenue_change: round_currency(percent_change(todays_revenue, yesterdays_revenue)),
            orders_today: today_orders.len() as i64,
            active_orders: status_counts.active(),
            pending_orders: status_counts.pending,
            preparing_orders: status_counts.preparing,
            status_counts,
            active_staff,
            average_order_minutes: average_order_minutes(&today_orders),
            recent_orders: recent.iter().map(summarize_order).collect(),
            hourly_revenue: self.hourly_revenue(&today_orders, today, now),
        })
    }

    // Contagem de equipe é enriquecimento opcional: falha vira aviso e zero.
    async fn active_staff_best_effort(&self, restaurant_ids: &[Uuid]) -> Result<i64, AppError> {
        match self.staff.list_active_staff(restaurant_ids, &Role::STAFF).await {
            Ok(staff) => Ok(staff.len() as i64),
            Err(e) => {
                tracing::warn!(?restaurant_ids, "Contagem de equipe indisponível, reportando 0: {}", e);
                Ok(0)
            }
        }
    }

    /// `min(7, hora_atual + 1)` baldes terminando na hora local atual.
    fn hourly_revenue(&self, today_orders: &[Order], today: TimeWindow, now: DateTime<Utc>) -> Vec<HourlyRevenue> {
        let current_hour = self.clock.local_hour(now);
        let buckets = MAX_HOURLY_BUCKETS.min(current_hour + 1);
        let first_hour = current_hour + 1 - buckets;

        let mut sums = vec![Decimal::ZERO; buckets as usize];
        for order in today_orders.iter().filter(|o| o.is_paid() && today.contains(o.created_at)) {
            let elapsed_hours = (order.created_at - today.start).num_hours();
            let Ok(hour) = u32::try_from(elapsed_hours) else { continue };
            if (first_hour..=current_hour).contains(&hour) {
                sums[(hour - first_hour) as usize] += order.total_amount;
            }
        }

        sums.into_iter()
            .enumerate()
            .map(|(offset, revenue)| {
                let hour = first_hour + offset as u32;
                HourlyRevenue { hour, label: format!("{:02}:00", hour), revenue: round_currency(revenue) }
            })
            .collect()
    }
}

fn paid_revenue(orders: &[Order]) -> Decimal {
    orders.iter().filter(|o| o.is_paid()).map(|o| o.total_amount).sum()
}

fn average_order_minutes(orders: &[Order]) -> Option<Decimal> {
    let durations: Vec<i64> = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Completed)
        .filter_map(|o| o.completed_at.map(|done| (done - o.created_at).num_seconds()))
        .filter(|secs| *secs >= 0)
        .collect();

    if durations.is_empty() {
        return None;
    }

    let total_seconds: i64 = durations.iter().sum();
    let minutes = Decimal::from(total_seconds) / Decimal::from(60 * durations.len() as i64);
    Some(minutes.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
}

fn summarize_order(entry: &OrderWithItems) -> RecentOrderSummary {
    let order = &entry.order;

    RecentOrderSummary {
        id: order.id,
        restaurant_id: order.restaurant_id,
        order_number: order_number(order.id),
        table_label: match order.table_number {
            Some(table) => format!("Table {}", table),
            None => "Takeout".to_string(),
        },
        item_summary: item_summary(entry),
        item_count: entry.items.iter().map(|i| i64::from(i.quantity)).sum(),
        total_amount: round_currency(order.total_amount),
        status: order.status,
        created_at: order.created_at,
    }
}

/// Número curto de exibição: os últimos 4 dígitos decimais do id.
fn order_number(id: Uuid) -> String {
    let digits: Vec<char> = id.simple().to_string().chars().filter(|c| c.is_ascii_digit()).collect();
    let tail: String = digits[digits.len().saturating_sub(4)..].iter().collect();
    if tail.is_empty() {
        "#0000".to_string()
    } else {
        format!("#{}", tail)
    }
}

// "Primeiro item" ou "Primeiro item +K more" quando há mais de um item distinto
fn item_summary(entry: &OrderWithItems) -> String {
    let Some(first) = entry.items.first() else {
        return "No items".to_string();
    };

    let first_name = first
        .menu_item
        .as_ref()
        .map(|m| m.name.clone())
        .unwrap_or_else(|| "Unknown Item".to_string());

    let distinct: HashSet<Uuid> = entry.items.iter().map(|i| i.menu_item_id).collect();
    match distinct.len() {
        0 | 1 => first_name,
        n => format!("{} +{} more", first_name, n - 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::PaymentStatus;
    use crate::testing::{at, item, money, order, staff, InMemoryStore};

    const NOW: &str = "2026-03-10T14:20:00Z";

    fn aggregator(store: Arc<InMemoryStore>) -> MetricsAggregator {
        MetricsAggregator::new(store.clone(), store, BusinessClock::utc())
    }

    #[tokio::test]
    async fn empty_scope_is_all_zero_without_lookups() {
        let store = Arc::new(InMemoryStore::default());
        let metrics = aggregator(store.clone()).compute_daily_metrics(&[], at(NOW)).await.unwrap();

        assert_eq!(metrics, DashboardMetrics::default());
        assert_eq!(metrics.todays_revenue, Decimal::ZERO);
        assert!(metrics.recent_orders.is_empty());
        assert!(metrics.hourly_revenue.is_empty());
        assert_eq!(store.lookups(), 0);
    }

    #[tokio::test]
    async fn revenue_counts_only_paid_orders_in_window() {
        let r1 = Uuid::new_v4();
        let mut store = InMemoryStore::default();
        store.add_order(order(r1, OrderStatus::Completed, PaymentStatus::Paid, "100.10", at("2026-03-10T09:00:00Z")), vec![]);
        store.add_order(order(r1, OrderStatus::Served, PaymentStatus::Paid, "49.95", at("2026-03-10T13:59:00Z")), vec![]);
        store.add_order(order(r1, OrderStatus::Pending, PaymentStatus::Unpaid, "999.00", at("2026-03-10T14:00:00Z")), vec![]);
        store.add_order(order(r1, OrderStatus::Completed, PaymentStatus::Paid, "100.00", at("2026-03-09T20:00:00Z")), vec![]);
        // Outro restaurante, fora do escopo
        store.add_order(order(Uuid::new_v4(), OrderStatus::Completed, PaymentStatus::Paid, "500.00", at("2026-03-10T10:00:00Z")), vec![]);

        let metrics = aggregator(Arc::new(store)).compute_daily_metrics(&[r1], at(NOW)).await.unwrap();

        assert_eq!(metrics.todays_revenue, money("150.05"));
        assert_eq!(metrics.yesterdays_revenue, money("100.00"));
        assert_eq!(metrics.revenue_change, money("50.05"));
        assert_eq!(metrics.orders_today, 3);
    }

    #[tokio::test]
    async fn revenue_change_is_zero_when_yesterday_had_no_revenue() {
        let r1 = Uuid::new_v4();
        let mut store = InMemoryStore::default();
        store.add_order(order(r1, OrderStatus::Completed, PaymentStatus::Paid, "80.00", at("2026-03-10T08:00:00Z")), vec![]);
        let store = Arc::new(store);

        let metrics = aggregator(store.clone()).compute_daily_metrics(&[r1], at(NOW)).await.unwrap();
        assert_eq!(metrics.yesterdays_revenue, Decimal::ZERO);
        assert_eq!(metrics.revenue_change, Decimal::ZERO);

        let quiet = Uuid::new_v4();
        let metrics = aggregator(store).compute_daily_metrics(&[quiet], at(NOW)).await.unwrap();
        assert_eq!(metrics.todays_revenue, Decimal::ZERO);
        assert_eq!(metrics.revenue_change, Decimal::ZERO);
    }

    #[tokio::test]
    async fn counts_active_pending_and_preparing_orders() {
        let r1 = Uuid::new_v4();
        let mut store = InMemoryStore::default();
        for status in [
            OrderStatus::Pending,
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Served,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            store.add_order(order(r1, status, PaymentStatus::Unpaid, "10.00", at("2026-03-10T12:00:00Z")), vec![]);
        }

        let metrics = aggregator(Arc::new(store)).compute_daily_metrics(&[r1], at(NOW)).await.unwrap();
        assert_eq!(metrics.active_orders, 5);
        assert_eq!(metrics.pending_orders, 2);
        assert_eq!(metrics.preparing_orders, 1);
        assert_eq!(metrics.status_counts.cancelled, 1);
        assert_eq!(metrics.status_counts.served, 1);
    }

    #[tokio::test]
    async fn active_staff_counts_floor_roles_in_scope() {
        let r1 = Uuid::new_v4();
        let mut store = InMemoryStore::default();
        store.staff = vec![
            staff(r1, Role::Server, true),
            staff(r1, Role::Kitchen, true),
            staff(r1, Role::Manager, true),
            staff(r1, Role::Cashier, false),
            staff(r1, Role::OrgAdmin, true),
            staff(Uuid::new_v4(), Role::Server, true),
        ];

        let metrics = aggregator(Arc::new(store)).compute_daily_metrics(&[r1], at(NOW)).await.unwrap();
        assert_eq!(metrics.active_staff, 3);
    }

    #[tokio::test]
    async fn staff_failure_is_downgraded_but_order_failure_is_not() {
        let r1 = Uuid::new_v4();
        let mut store = InMemoryStore { fail_staff: true, ..Default::default() };
        store.add_order(order(r1, OrderStatus::Completed, PaymentStatus::Paid, "30.00", at("2026-03-10T10:00:00Z")), vec![]);

        let metrics = aggregator(Arc::new(store)).compute_daily_metrics(&[r1], at(NOW)).await.unwrap();
        assert_eq!(metrics.active_staff, 0);
        assert_eq!(metrics.todays_revenue, money("30.00"));

        let broken = Arc::new(InMemoryStore { fail_orders: true, ..Default::default() });
        let result = aggregator(broken).compute_daily_metrics(&[r1], at(NOW)).await;
        assert!(matches!(result, Err(AppError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn recent_orders_are_summarized_newest_first() {
        let r1 = Uuid::new_v4();
        let mut store = InMemoryStore::default();

        for minute in 0..7 {
            let created = at(&format!("2026-03-10T13:0{}:00Z", minute));
            store.add_order(order(r1, OrderStatus::Pending, PaymentStatus::Unpaid, "1.00", created), vec![]);
        }

        let mut dine_in = order(r1, OrderStatus::Preparing, PaymentStatus::Unpaid, "36.00", at("2026-03-10T14:10:00Z"));
        dine_in.table_number = Some(7);
        let pizza = item(dine_in.id, Some("Margherita"), None, 2, "12.00");
        let mut second_pizza = item(dine_in.id, Some("Margherita"), None, 1, "12.00");
        second_pizza.menu_item_id = pizza.menu_item_id;
        let soda = item(dine_in.id, Some("Soda"), None, 3, "0.00");
        let dine_in_id = dine_in.id;
        store.add_order(dine_in, vec![pizza, second_pizza, soda]);

        let metrics = aggregator(Arc::new(store)).compute_daily_metrics(&[r1], at(NOW)).await.unwrap();

        assert_eq!(metrics.recent_orders.len(), 5);
        let newest = &metrics.recent_orders[0];
        assert_eq!(newest.id, dine_in_id);
        assert_eq!(newest.table_label, "Table 7");
        assert_eq!(newest.item_summary, "Margherita +1 more");
        assert_eq!(newest.item_count, 6);
        assert!(newest.order_number.starts_with('#'));

        let takeout = &metrics.recent_orders[1];
        assert_eq!(takeout.table_label, "Takeout");
        assert_eq!(takeout.item_summary, "No items");
        assert!(metrics.recent_orders.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[tokio::test]
    async fn hourly_series_ends_at_the_current_hour() {
        let r1 = Uuid::new_v4();
        let mut store = InMemoryStore::default();
        store.add_order(order(r1, OrderStatus::Completed, PaymentStatus::Paid, "10.00", at("2026-03-10T14:05:00Z")), vec![]);
        store.add_order(order(r1, OrderStatus::Completed, PaymentStatus::Paid, "5.25", at("2026-03-10T14:15:00Z")), vec![]);
        store.add_order(order(r1, OrderStatus::Completed, PaymentStatus::Paid, "7.00", at("2026-03-10T08:30:00Z")), vec![]);
        // Antes da primeira hora exibida: não entra na série
        store.add_order(order(r1, OrderStatus::Completed, PaymentStatus::Paid, "99.00", at("2026-03-10T02:00:00Z")), vec![]);
        store.add_order(order(r1, OrderStatus::Pending, PaymentStatus::Unpaid, "50.00", at("2026-03-10T14:10:00Z")), vec![]);
        let store = Arc::new(store);

        let metrics = aggregator(store.clone()).compute_daily_metrics(&[r1], at(NOW)).await.unwrap();
        let hours: Vec<u32> = metrics.hourly_revenue.iter().map(|h| h.hour).collect();
        assert_eq!(hours, vec![8, 9, 10, 11, 12, 13, 14]);
        assert_eq!(metrics.hourly_revenue[0].revenue, money("7.00"));
        assert_eq!(metrics.hourly_revenue[6].revenue, money("15.25"));
        assert_eq!(metrics.hourly_revenue[6].label, "14:00");

        // Logo depois da meia-noite só existe um balde
        let early = aggregator(store).compute_daily_metrics(&[r1], at("2026-03-10T00:40:00Z")).await.unwrap();
        assert_eq!(early.hourly_revenue.len(), 1);
        assert_eq!(early.hourly_revenue[0].hour, 0);
    }

    #[tokio::test]
    async fn average_order_time_uses_real_completion_timestamps() {
        let r1 = Uuid::new_v4();
        let mut store = InMemoryStore::default();

        let mut fast = order(r1, OrderStatus::Completed, PaymentStatus::Paid, "10.00", at("2026-03-10T12:00:00Z"));
        fast.completed_at = Some(at("2026-03-10T12:10:00Z"));
        let mut slow = order(r1, OrderStatus::Completed, PaymentStatus::Paid, "10.00", at("2026-03-10T12:00:00Z"));
        slow.completed_at = Some(at("2026-03-10T12:25:00Z"));
        store.add_order(fast, vec![]);
        store.add_order(slow, vec![]);
        store.add_order(order(r1, OrderStatus::Pending, PaymentStatus::Unpaid, "10.00", at("2026-03-10T12:00:00Z")), vec![]);

        let metrics = aggregator(Arc::new(store)).compute_daily_metrics(&[r1], at(NOW)).await.unwrap();
        assert_eq!(metrics.average_order_minutes, Some(money("17.5")));
    }

    #[test]
    fn order_number_uses_trailing_digits() {
        let id = Uuid::parse_str("a1b2c3d4-0000-4000-8000-00000000a123").unwrap();
        assert_eq!(order_number(id), "#0123");

        let no_digits = Uuid::parse_str("aaaaaaaa-aaaa-aaaa-aaaa-aaaaaaaaaaaa").unwrap();
        assert_eq!(order_number(no_digits), "#0000");
    }
}
