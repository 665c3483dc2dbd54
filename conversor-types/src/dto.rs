//! View models handed to the presentation layer.
//!
//! Everything here is plain data: the renderer (terminal, browser, ...) only
//! has to print the strings.

use serde::{Deserialize, Serialize};

use exchange_rates::CurrencyCode;

// ─────────────────────────────────────────────────────────────────────────────
// Converter Panel
// ─────────────────────────────────────────────────────────────────────────────

/// Selected pair in the converter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
}

impl CurrencyPair {
    pub fn new(from: CurrencyCode, to: CurrencyCode) -> Self {
        Self { from, to }
    }

    pub fn swapped(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }
}

impl Default for CurrencyPair {
    fn default() -> Self {
        Self::new(CurrencyCode::USD, CurrencyCode::BRL)
    }
}

/// Which amount field the user edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionDirection {
    /// The source amount changed; recompute the target.
    Forward,
    /// The target amount changed; solve for the source.
    Inverse,
}

/// Text content of the two amount fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AmountFields {
    pub from_amount: String,
    pub to_amount: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Widgets
// ─────────────────────────────────────────────────────────────────────────────

/// "1 USD = 5,4200 BRL" line under the converter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRateLine {
    pub pair: CurrencyPair,
    /// `None` when the pair cannot be converted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    pub text: String,
}

/// One row of the common-values table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub amount: f64,
    pub converted: f64,
    pub from_label: String,
    pub to_label: String,
}

/// Conversion table for the selected pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionTable {
    pub pair: CurrencyPair,
    pub rows: Vec<TableRow>,
}

/// Entry of the popular rates panel, priced in reais.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularRate {
    pub currency: CurrencyCode,
    pub name: String,
    pub rate: f64,
    pub text: String,
}

/// Entry of the supported currency catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyInfo {
    pub code: CurrencyCode,
    pub symbol: String,
    pub name: String,
}

impl From<CurrencyCode> for CurrencyInfo {
    fn from(code: CurrencyCode) -> Self {
        Self {
            code,
            symbol: code.symbol().to_string(),
            name: code.display_name().to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Refresh
// ─────────────────────────────────────────────────────────────────────────────

/// Result of a rate refresh, as reported to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RefreshOutcome {
    /// A provider answered; its snapshot replaced the current one.
    Updated { provider: String, usd_rate: f64 },
    /// Every provider failed and nothing was loaded: the offline table is in use.
    Offline { reason: String },
    /// Every provider failed; the previously loaded snapshot was kept.
    Stale { reason: String },
}

impl RefreshOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, RefreshOutcome::Updated { .. })
    }

    /// Notification text shown after a refresh.
    pub fn notice(&self) -> String {
        match self {
            RefreshOutcome::Updated { usd_rate, .. } => {
                format!("Cotações atualizadas! USD: R$ {:.2}", usd_rate)
            }
            RefreshOutcome::Offline { .. } | RefreshOutcome::Stale { .. } => {
                "Erro ao atualizar cotações.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_swap() {
        let pair = CurrencyPair::new(CurrencyCode::EUR, CurrencyCode::JPY);
        assert_eq!(pair.swapped(), CurrencyPair::new(CurrencyCode::JPY, CurrencyCode::EUR));
    }

    #[test]
    fn test_refresh_notice() {
        let updated = RefreshOutcome::Updated {
            provider: "AwesomeAPI".into(),
            usd_rate: 5.4167,
        };
        assert_eq!(updated.notice(), "Cotações atualizadas! USD: R$ 5.42");

        let stale = RefreshOutcome::Stale {
            reason: "down".into(),
        };
        assert_eq!(stale.notice(), "Erro ao atualizar cotações.");
        assert!(!stale.is_updated());
    }

    #[test]
    fn test_currency_info() {
        let info = CurrencyInfo::from(CurrencyCode::CAD);
        assert_eq!(info.symbol, "C$");
        assert_eq!(info.name, "Dólar Canadense");
    }
}
