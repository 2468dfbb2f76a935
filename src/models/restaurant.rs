// src/models/restaurant.rs

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// ---
// 1. Restaurant (a "Loja")
// ---
// Pertence a exatamente uma organização. O `metadata` é livre, mas carrega
// a configuração fiscal (gstRate, serviceChargeRate) em percentual.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: Uuid,
    pub organization_id: Uuid,
    #[schema(example = "Cantina Centro")]
    pub name: String,
    #[schema(value_type = Object, example = json!({"gstRate": "8", "serviceChargeRate": "10"}))]
    pub metadata: Value,
    #[schema(example = true)]
    pub is_active: bool,
}

impl Restaurant {
    pub fn tax_config(&self) -> TaxConfig {
        TaxConfig::from_metadata(&self.metadata)
    }
}

/// Taxas percentuais lidas do metadata. Ausente ou inválida vira zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaxConfig {
    pub gst_rate: Decimal,
    pub service_charge_rate: Decimal,
}

impl TaxConfig {
    pub fn from_metadata(metadata: &Value) -> Self {
        Self {
            gst_rate: read_rate(metadata, "gstRate"),
            service_charge_rate: read_rate(metadata, "serviceChargeRate"),
        }
    }
}

// Aceita "10", "10.5", 10 ou 10.5. Qualquer outra coisa conta como ausente.
fn read_rate(metadata: &Value, key: &str) -> Decimal {
    let parsed = match metadata.get(key) {
        None | Some(Value::Null) => return Decimal::ZERO,
        Some(Value::String(s)) => Decimal::from_str(s.trim()).ok(),
        Some(Value::Number(n)) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .ok(),
        Some(_) => None,
    };

    match parsed {
        Some(rate) if !rate.is_sign_negative() => rate,
        _ => {
            tracing::warn!(key, value = %metadata[key], "Taxa inválida no metadata do restaurante; usando 0");
            Decimal::ZERO
        }
    }
}

// ---
// 2. Cardápio (apenas o que os relatórios leem)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    #[schema(example = "Bebidas")]
    pub name: String,
}

/// Projeção do item de cardápio anexada a cada item de pedido.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemRef {
    pub name: String,
    pub category_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rates_are_read_from_strings_and_numbers() {
        let cfg = TaxConfig::from_metadata(&json!({ "gstRate": "8", "serviceChargeRate": 10 }));
        assert_eq!(cfg.gst_rate, Decimal::from(8));
        assert_eq!(cfg.service_charge_rate, Decimal::from(10));

        let cfg = TaxConfig::from_metadata(&json!({ "gstRate": 12.5 }));
        assert_eq!(cfg.gst_rate, Decimal::from_str("12.5").unwrap());
        assert_eq!(cfg.service_charge_rate, Decimal::ZERO);
    }

    #[test]
    fn missing_or_garbage_rates_default_to_zero() {
        assert_eq!(TaxConfig::from_metadata(&json!({})), TaxConfig::default());
        assert_eq!(TaxConfig::from_metadata(&Value::Null), TaxConfig::default());

        let cfg = TaxConfig::from_metadata(&json!({ "gstRate": "dez", "serviceChargeRate": "-5" }));
        assert_eq!(cfg, TaxConfig::default());
    }
}
