// src/common/money.rs

use rust_decimal::{Decimal, RoundingStrategy};

// Somas intermediárias ficam em precisão cheia; só a saída é arredondada.
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `amount * rate / 100`, com `rate` em percentual ("10" = 10%).
pub fn percent_of(amount: Decimal, rate: Decimal) -> Decimal {
    amount * rate / Decimal::ONE_HUNDRED
}

/// Variação percentual. Base zero dá exatamente zero, nunca divide.
pub fn percent_change(current: Decimal, previous: Decimal) -> Decimal {
    if previous.is_zero() {
        return Decimal::ZERO;
    }
    (current - previous) / previous * Decimal::ONE_HUNDRED
}
