//! Price formatting helpers
//!
//! Pure functions producing the fixed ru-RU renderings the screens show:
//! thousands grouped with spaces, decimal comma, ruble suffix.

use crate::model::RentType;

/// Format a ruble amount with thousands grouping: `1500000` → `"1 500 000 ₽"`
pub fn format_price(price: i64) -> String {
    format!("{} ₽", group_thousands(price))
}

/// Format a sale price in millions with one decimal: `4.5` → `"4,5 млн ₽"`
pub fn format_price_buy(price_millions: f64) -> String {
    let rounded = (price_millions * 10.0).round() / 10.0;
    let whole = rounded.trunc() as i64;
    let tenths = ((rounded - rounded.trunc()).abs() * 10.0).round() as i64;
    format!("{},{} млн ₽", group_thousands(whole), tenths)
}

/// Subtract a percentage discount, then format
pub fn format_price_with_discount(price: i64, discount_percent: f64) -> String {
    let discounted = price as f64 - (price as f64 * discount_percent / 100.0);
    format_price(discounted.round() as i64)
}

/// Per-period suffix for rental listings: `/мес` or `/сутки`
pub fn period_suffix(rent_type: RentType) -> &'static str {
    match rent_type {
        RentType::Monthly => "/мес",
        RentType::Daily => "/сутки",
    }
}

fn group_thousands(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}
