// src/models/report.rs

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Rótulo reservado para itens sem categoria resolvível.
pub const UNCATEGORIZED: &str = "Uncategorized";
/// Rótulo reservado para itens cujo item de cardápio sumiu.
pub const UNKNOWN_ITEM: &str = "Unknown Item";

/// Sobre qual base o GST incide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaxBase {
    #[default]
    SubtotalPlusService,
    Subtotal,
}

impl TaxBase {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "subtotal_plus_service" => Some(TaxBase::SubtotalPlusService),
            "subtotal" => Some(TaxBase::Subtotal),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesTotal {
    #[schema(example = "120.00")]
    pub total: Decimal,
    #[schema(example = 8)]
    pub count: i64,
}

// Formato fixo, mesmo quando só "cash" recebe valor
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentBreakdown {
    pub cash: Decimal,
    pub card: Decimal,
    pub digital: Decimal,
}

/// Fechamento do dia (Z-report) de um restaurante.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EndOfDayReport {
    pub restaurant_id: Uuid,
    #[schema(example = "Cantina Centro")]
    pub restaurant_name: String,
    #[schema(value_type = String, example = "2026-03-10")]
    pub date: NaiveDate,

    #[schema(example = 3)]
    pub order_count: i64,
    #[schema(example = "35.50")]
    pub subtotal: Decimal,
    #[schema(example = "10")]
    pub service_charge_rate: Decimal,
    #[schema(example = "3.55")]
    pub service_charge: Decimal,
    #[schema(example = "8")]
    pub gst_rate: Decimal,
    pub tax_base: TaxBase,
    #[schema(example = "3.12")]
    pub gst_amount: Decimal,
    #[schema(example = "42.17")]
    pub grand_total: Decimal,
    #[schema(example = "14.06")]
    pub average_order_value: Decimal,

    pub category_totals: BTreeMap<String, SalesTotal>,
    pub item_totals: BTreeMap<String, SalesTotal>,
    pub payment_breakdown: PaymentBreakdown,
}
