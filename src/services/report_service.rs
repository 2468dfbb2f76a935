// src/services/report_service.rs

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::{
        clock::BusinessClock,
        error::AppError,
        money::{percent_of, round_currency},
    },
    db::store::{MenuSource, OrderFilter, OrderSource, RestaurantDirectory},
    models::{
        order::{OrderWithItems, PaymentMethod},
        report::{EndOfDayReport, PaymentBreakdown, SalesTotal, TaxBase, UNCATEGORIZED, UNKNOWN_ITEM},
        restaurant::{Category, TaxConfig},
    },
};

#[derive(Clone)]
pub struct EndOfDayReportBuilder {
    restaurants: Arc<dyn RestaurantDirectory>,
    orders: Arc<dyn OrderSource>,
    menu: Arc<dyn MenuSource>,
    clock: BusinessClock,
    tax_base: TaxBase,
}

impl EndOfDayReportBuilder {
    pub fn new(
        restaurants: Arc<dyn RestaurantDirectory>,
        orders: Arc<dyn OrderSource>,
        menu: Arc<dyn MenuSource>,
        clock: BusinessClock,
        tax_base: TaxBase,
    ) -> Self {
        Self { restaurants, orders, menu, clock, tax_base }
    }

    /// Fechamento de um restaurante num dia civil (relógio do negócio).
    /// Somente leitura; o restaurante já deve ter passado pelo resolver.
    pub async fn build_report(&self, restaurant_id: Uuid, date: NaiveDate) -> Result<EndOfDayReport, AppError> {
        let restaurant = self
            .restaurants
            .find_restaurant(restaurant_id)
            .await?
            .ok_or(AppError::RestaurantNotFound)?;

        let window = self.clock.day_window(date);
        let filter = OrderFilter::completed_in_window();
        let scope = [restaurant_id];

        let (categories, orders) = tokio::try_join!(
            self.menu.list_categories(restaurant_id),
            self.orders.list_orders_with_items(&scope, window, &filter),
        )
        .inspect_err(|e| {
            tracing::error!(
                %restaurant_id,
                %date,
                window_start = %window.start,
                window_end = %window.end,
                "Falha ao montar o fechamento do dia: {}", e
            );
        })?;

        let tax = restaurant.tax_config();
        let totals = Totals::compute(&orders, tax, self.tax_base);
        let (category_totals, item_totals) = rollups(&orders, &categories);

        tracing::info!(
            %restaurant_id,
            %date,
            orders = orders.len(),
            grand_total = %round_currency(totals.grand_total),
            "Fechamento do dia gerado"
        );

        Ok(EndOfDayReport {
            restaurant_id,
            restaurant_name: restaurant.name,
            date,
            order_count: orders.len() as i64,
            subtotal: round_currency(totals.subtotal),
            service_charge_rate: tax.service_charge_rate,
            service_charge: round_currency(totals.service_charge),
            gst_rate: tax.gst_rate,
            tax_base: self.tax_base,
            gst_amount: round_currency(totals.gst_amount),
            grand_total: round_currency(totals.grand_total),
            average_order_value: round_currency(totals.average_order_value),
            category_totals,
            item_totals,
            payment_breakdown: payment_breakdown(&orders, totals.subtotal, totals.grand_total),
        })
    }
}

// Valores em precisão cheia; arredondamento só na montagem do relatório.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Totals {
    subtotal: Decimal,
    service_charge: Decimal,
    gst_amount: Decimal,
    grand_total: Decimal,
    average_order_value: Decimal,
}

impl Totals {
    fn compute(orders: &[OrderWithItems], tax: TaxConfig, tax_base: TaxBase) -> Self {
        let subtotal: Decimal = orders.iter().map(|o| o.order.total_amount).sum();
        let service_charge = percent_of(subtotal, tax.service_charge_rate);

        let taxable = match tax_base {
            TaxBase::SubtotalPlusService => subtotal + service_charge,
            TaxBase::Subtotal => subtotal,
        };
        let gst_amount = percent_of(taxable, tax.gst_rate);
        let grand_total = subtotal + service_charge + gst_amount;

        let average_order_value = if orders.is_empty() {
            Decimal::ZERO
        } else {
            grand_total / Decimal::from(orders.len() as i64)
        };

        Self { subtotal, service_charge, gst_amount, grand_total, average_order_value }
    }
}

/// Totais por categoria e por item. Nada é descartado: nomes que não resolvem
/// caem nos rótulos reservados, então as duas somas fecham com o subtotal.
fn rollups(
    orders: &[OrderWithItems],
    categories: &[Category],
) -> (BTreeMap<String, SalesTotal>, BTreeMap<String, SalesTotal>) {
    let names: HashMap<Uuid, &str> = categories.iter().map(|c| (c.id, c.name.as_str())).collect();

    let mut by_category: BTreeMap<String, SalesTotal> = BTreeMap::new();
    let mut by_item: BTreeMap<String, SalesTotal> = BTreeMap::new();

    for item in orders.iter().flat_map(|o| o.items.iter()) {
        let line_total = item.checked_total();
        let quantity = i64::from(item.quantity);

        let category = item
            .menu_item
            .as_ref()
            .and_then(|m| m.category_id)
            .and_then(|id| names.get(&id).copied())
            .unwrap_or(UNCATEGORIZED);
        let name = item.menu_item.as_ref().map(|m| m.name.as_str()).unwrap_or(UNKNOWN_ITEM);

        for (map, key) in [(&mut by_category, category), (&mut by_item, name)] {
            let entry = map.entry(key.to_string()).or_default();
            entry.total += line_total;
            entry.count += quantity;
        }
    }

    for entry in by_category.values_mut().chain(by_item.values_mut()) {
        entry.total = round_currency(entry.total);
    }

    (by_category, by_item)
}

/// Cartão e digital recebem a fração do total geral proporcional ao subtotal
/// dos seus pedidos. Dinheiro fica com o resto, inclusive pedidos sem forma
/// de pagamento registrada, então as três parcelas somam o total geral.
/// Sem pedido em dinheiro, o centavo do arredondamento vai para o digital.
fn payment_breakdown(orders: &[OrderWithItems], subtotal: Decimal, grand_total: Decimal) -> PaymentBreakdown {
    let grand_total = round_currency(grand_total);
    if subtotal.is_zero() {
        return PaymentBreakdown { cash: grand_total, ..Default::default() };
    }

    let method_subtotal = |method: PaymentMethod| -> Decimal {
        orders
            .iter()
            .filter(|o| o.order.payment_method == Some(method))
            .map(|o| o.order.total_amount)
            .sum()
    };
    let card_subtotal = method_subtotal(PaymentMethod::Card);
    let digital_subtotal = method_subtotal(PaymentMethod::Digital);

    let card = round_currency(grand_total * card_subtotal / subtotal).min(grand_total);
    let remaining = grand_total - card;
    let digital = if (subtotal - card_subtotal - digital_subtotal).is_zero() {
        remaining
    } else {
        round_currency(grand_total * digital_subtotal / subtotal).min(remaining)
    };

    PaymentBreakdown { cash: remaining - digital, card, digital }
}
