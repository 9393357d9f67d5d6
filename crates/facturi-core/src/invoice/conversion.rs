//! Price conversion applied to parsed product rows.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::product::{Currency, ProductRow};

/// Rate used when no live USD rate can be obtained.
pub const DEFAULT_RUB_RATE: Decimal = Decimal::from_parts(161, 0, 0, false, 1);

/// Decimal places written for converted prices.
const RUB_PRICE_SCALE: u32 = 4;

/// How price fields are rewritten after parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "currency", rename_all = "lowercase")]
pub enum Conversion {
    /// Keep prices as parsed (preview).
    #[default]
    None,
    /// Keep values, mark them with `$`.
    Usd,
    /// Multiply by `rate`, mark with `₽`.
    Rub { rate: Decimal },
}

impl Conversion {
    /// Selected currency, if any.
    pub fn currency(&self) -> Option<Currency> {
        match self {
            Conversion::None => None,
            Conversion::Usd => Some(Currency::Usd),
            Conversion::Rub { .. } => Some(Currency::Rub),
        }
    }

    /// Rewrite the order price and total of a row.
    ///
    /// For RUB both fields must parse; otherwise the row is left as is.
    pub fn apply(&self, row: &mut ProductRow) {
        match self {
            Conversion::None => {}
            Conversion::Usd => {
                row.order_price = format!("{}{}", Currency::Usd.symbol(), row.order_price);
                row.total = format!("{}{}", Currency::Usd.symbol(), row.total);
            }
            Conversion::Rub { rate } => {
                match (convert_price(&row.order_price, *rate), convert_price(&row.total, *rate)) {
                    (Some(price), Some(total)) => {
                        row.order_price = price;
                        row.total = total;
                    }
                    _ => warn!(
                        "Cannot convert prices '{}' / '{}' for barcode {}",
                        row.order_price, row.total, row.barcode
                    ),
                }
            }
        }
    }

    /// Apply to every row.
    pub fn apply_all(&self, rows: &mut [ProductRow]) {
        for row in rows {
            self.apply(row);
        }
    }
}

fn convert_price(value: &str, rate: Decimal) -> Option<String> {
    let amount = Decimal::from_str(value.trim()).ok()?;
    let converted = amount
        .checked_mul(rate)?
        .round_dp_with_strategy(RUB_PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    Some(format!(
        "{}{:.4}",
        Currency::Rub.symbol(),
        converted
    ))
}
