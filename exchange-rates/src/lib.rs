//! BRL-Based Exchange Rates with Macro-Generated Currency Catalogue
//!
//! This library holds the pure part of the converter: the supported currency
//! set, the normalized [`RateSnapshot`], the conversion engine and the
//! Brazilian Portuguese number formatting used for display and input.
//! Nothing in here performs IO.
//!
//! # Adding a New Currency
//! Add a line to the `define_currencies!` invocation below. The last column is
//! the offline fallback rate, in BRL per unit:
//! ```ignore
//! define_currencies! {
//!     // ... existing currencies ...
//!     MXN => ("MXN", "Mex$", "Peso Mexicano", 0.29),
//! }
//! ```
//!
//! # Example
//! ```
//! use chrono::Utc;
//! use exchange_rates::{CurrencyCode, RateSnapshot, format_amount};
//!
//! let snapshot = RateSnapshot::fallback(Utc::now());
//! let reais = snapshot.convert(100.0, CurrencyCode::USD, CurrencyCode::BRL);
//! assert_eq!(format_amount(reais, 2), "542,00");
//! ```

mod format;
mod snapshot;

pub use format::{format_amount, parse_amount, sanitize_live_input};
pub use snapshot::{ConversionError, RateSnapshot, SnapshotSource};

/// The currency every stored rate is expressed against.
pub const BASE_CURRENCY: CurrencyCode = CurrencyCode::BRL;

// ─────────────────────────────────────────────────────────────────────────────
// THE MACRO: Defines the CurrencyCode enum and its metadata lookups
// ─────────────────────────────────────────────────────────────────────────────

/// Macro to define the supported currencies with their metadata.
///
/// # Syntax
/// ```ignore
/// define_currencies! {
///     Name => ("CODE", "SYMBOL", "display name", fallback_rate_in_brl),
/// }
/// ```
#[macro_export]
macro_rules! define_currencies {
    (
        $(
            $name:ident => ($code:literal, $symbol:literal, $display:literal, $fallback:expr)
        ),* $(,)?
    ) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(rename_all = "UPPERCASE")]
        pub enum CurrencyCode {
            $($name),*
        }

        impl CurrencyCode {
            pub fn code(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $code),*
                }
            }

            pub fn symbol(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $symbol),*
                }
            }

            /// Portuguese display name, as shown in the currency pickers.
            pub fn display_name(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $display),*
                }
            }

            /// Offline rate in BRL per unit, used when every provider fails.
            pub fn fallback_rate(&self) -> f64 {
                match self {
                    $(CurrencyCode::$name => $fallback),*
                }
            }

            pub fn all() -> &'static [CurrencyCode] {
                &[$(CurrencyCode::$name),*]
            }
        }

        impl std::fmt::Display for CurrencyCode {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.code())
            }
        }

        impl std::str::FromStr for CurrencyCode {
            type Err = String;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_uppercase().as_str() {
                    $($code => Ok(CurrencyCode::$name),)*
                    _ => Err(format!("Unknown currency: {}", s)),
                }
            }
        }
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// CURRENCY DEFINITIONS
// ─────────────────────────────────────────────────────────────────────────────

define_currencies! {
    BRL => ("BRL", "R$", "Real Brasileiro", 1.0),
    USD => ("USD", "$", "Dólar Americano", 5.42),
    EUR => ("EUR", "€", "Euro", 5.70),
    GBP => ("GBP", "£", "Libra Esterlina", 6.90),
    JPY => ("JPY", "¥", "Iene Japonês", 0.036),
    CAD => ("CAD", "C$", "Dólar Canadense", 3.85),
    AUD => ("AUD", "A$", "Dólar Australiano", 3.45),
    CHF => ("CHF", "Fr", "Franco Suíço", 6.10),
    CNY => ("CNY", "¥", "Yuan Chinês", 0.75),
    ARS => ("ARS", "$", "Peso Argentino", 0.005),
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
