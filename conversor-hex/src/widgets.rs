//! View-model builders for the converter widgets.

use std::fmt;

use chrono::TimeZone;

use conversor_types::{
    ConversionTable, CurrencyCode, CurrencyPair, ExchangeRateLine, PopularRate, RateSnapshot,
    TableRow,
};
use exchange_rates::format_amount;

/// Amounts listed in the conversion table.
pub const COMMON_VALUES: [f64; 8] = [1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 500.0, 1000.0];

/// Currencies shown in the popular rates panel with their display precision.
pub const POPULAR_CURRENCIES: [(CurrencyCode, usize); 4] = [
    (CurrencyCode::USD, 2),
    (CurrencyCode::EUR, 2),
    (CurrencyCode::GBP, 2),
    (CurrencyCode::JPY, 4),
];

pub const UNAVAILABLE: &str = "--";
pub const OFFLINE_LABEL: &str = "Dados offline";

const RATE_DECIMALS: usize = 4;
const AMOUNT_DECIMALS: usize = 2;

/// "1 USD = 5,4200 BRL", or `--` when the pair cannot be converted.
pub fn exchange_rate_line(snapshot: &RateSnapshot, pair: CurrencyPair) -> ExchangeRateLine {
    let rate = snapshot.conversion_rate(pair.from, pair.to);
    if rate > 0.0 && rate.is_finite() {
        ExchangeRateLine {
            pair,
            rate: Some(rate),
            text: format!(
                "1 {} = {} {}",
                pair.from,
                format_amount(rate, RATE_DECIMALS),
                pair.to
            ),
        }
    } else {
        ExchangeRateLine {
            pair,
            rate: None,
            text: UNAVAILABLE.to_string(),
        }
    }
}

/// Common amounts of `pair.from` and their value in `pair.to`.
pub fn conversion_table(snapshot: &RateSnapshot, pair: CurrencyPair) -> ConversionTable {
    let rate = snapshot.conversion_rate(pair.from, pair.to);
    let rows = COMMON_VALUES
        .iter()
        .map(|&amount| {
            let converted = amount * rate;
            TableRow {
                amount,
                converted,
                from_label: money_label(pair.from, amount),
                to_label: money_label(pair.to, converted),
            }
        })
        .collect();
    ConversionTable { pair, rows }
}

fn money_label(currency: CurrencyCode, amount: f64) -> String {
    format!(
        "{} {}",
        currency.symbol(),
        format_amount(amount, AMOUNT_DECIMALS)
    )
}

/// Popular currencies priced in reais. Unknown rates are left out.
pub fn popular_rates(snapshot: &RateSnapshot) -> Vec<PopularRate> {
    POPULAR_CURRENCIES
        .iter()
        .filter_map(|&(currency, decimals)| {
            let rate = snapshot.rate(currency)?;
            Some(PopularRate {
                currency,
                name: currency.display_name().to_string(),
                rate,
                text: format!("R$ {}", format_amount(rate, decimals)),
            })
        })
        .collect()
}

/// `dd/mm/yyyy HH:MM` in `tz`, or "Dados offline" for the static table.
pub fn last_update_label<Tz>(snapshot: &RateSnapshot, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    if snapshot.is_fallback() {
        return OFFLINE_LABEL.to_string();
    }
    snapshot
        .timestamp()
        .with_timezone(tz)
        .format("%d/%m/%Y %H:%M")
        .to_string()
}
