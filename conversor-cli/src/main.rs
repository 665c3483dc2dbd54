//! Conversor CLI
//!
//! Command-line front end for the currency converter:
//! - Load configuration from environment
//! - Initialize logging
//! - Acquire rates (or install the offline table)
//! - Render the requested widget as text or JSON

mod config;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use config::{Config, LogFormat};
use conversor_client::{HttpFetcher, SystemClock};
use conversor_hex::{ConverterApp, RateService};
use conversor_types::{
    AmountFields, ConversionDirection, CurrencyCode, CurrencyInfo, CurrencyPair, RefreshOutcome,
    SnapshotSource,
};
use exchange_rates::{format_amount, parse_amount};

#[derive(Parser)]
#[command(name = "conversor")]
#[command(
    author,
    version,
    about = "Live currency conversion against the Brazilian real",
    long_about = None
)]
struct Cli {
    /// Skip the rate providers and use the offline table
    #[arg(long, global = true, env = "CONVERSOR_OFFLINE")]
    offline: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Refresh rates and show the popular rates panel
    Rates,
    /// Convert an amount between two currencies
    Convert {
        /// Amount in pt-BR notation, e.g. 1.234,56 or 1234,56
        amount: String,
        #[arg(long, default_value = "USD")]
        from: String,
        #[arg(long, default_value = "BRL")]
        to: String,
        /// Treat the amount as the target and solve for the source
        #[arg(long)]
        inverse: bool,
    },
    /// Show the common-values conversion table
    Table {
        #[arg(long, default_value = "USD")]
        from: String,
        #[arg(long, default_value = "BRL")]
        to: String,
    },
    /// List supported currencies
    Currencies,
}

type App = ConverterApp<HttpFetcher, SystemClock>;

fn parse_currency(s: &str) -> Result<CurrencyCode> {
    s.parse().map_err(|_| {
        let supported: Vec<&str> = CurrencyCode::all().iter().map(|c| c.code()).collect();
        anyhow::anyhow!("Unknown currency: {}. Supported: {}", s, supported.join(", "))
    })
}

fn parse_pair(from: &str, to: &str) -> Result<CurrencyPair> {
    Ok(CurrencyPair::new(parse_currency(from)?, parse_currency(to)?))
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn,conversor_cli=info,conversor_hex=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so stdout stays clean for --json.
    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    match cli.command {
        Commands::Currencies => print_currencies(cli.json)?,
        Commands::Rates => {
            let (app, outcome) = load_rates(&config, cli.offline).await?;
            print_rates(&app, outcome.as_ref(), cli.json)?;
        }
        Commands::Convert {
            amount,
            from,
            to,
            inverse,
        } => {
            let pair = parse_pair(&from, &to)?;
            let (app, _) = load_rates(&config, cli.offline).await?;
            print_conversion(&app, pair, &amount, inverse, cli.json)?;
        }
        Commands::Table { from, to } => {
            let pair = parse_pair(&from, &to)?;
            let (app, _) = load_rates(&config, cli.offline).await?;
            print_table(&app, pair, cli.json)?;
        }
    }

    Ok(())
}

/// Builds the converter and fills it with live or offline rates.
async fn load_rates(config: &Config, offline: bool) -> Result<(App, Option<RefreshOutcome>)> {
    let fetcher = HttpFetcher::new(config.http_timeout)?;
    let app = ConverterApp::new(RateService::new(fetcher, SystemClock));

    if offline {
        tracing::info!("Offline mode, using the static rate table");
        app.use_fallback_rates();
        return Ok((app, None));
    }

    let outcome = app.refresh().await?;
    tracing::info!("{}", outcome.notice());
    Ok((app, Some(outcome)))
}

fn print_currencies(json: bool) -> Result<()> {
    let currencies: Vec<CurrencyInfo> = CurrencyCode::all()
        .iter()
        .copied()
        .map(CurrencyInfo::from)
        .collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&currencies)?);
        return Ok(());
    }
    for c in &currencies {
        println!("{:<4} {:<3} {}", c.code.code(), c.symbol, c.name);
    }
    Ok(())
}

fn print_table(app: &App, pair: CurrencyPair, json: bool) -> Result<()> {
    let Some(table) = app.conversion_table(pair) else {
        anyhow::bail!("No rates loaded");
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }
    println!("{:>16} | {}", pair.from.code(), pair.to.code());
    for row in &table.rows {
        println!("{:>16} | {}", row.from_label, row.to_label);
    }
    Ok(())
}

fn print_rates(app: &App, outcome: Option<&RefreshOutcome>, json: bool) -> Result<()> {
    let Some(snapshot) = app.snapshot() else {
        anyhow::bail!("No rates loaded");
    };
    let popular = app.popular_rates();
    let updated = app.last_update_label(&Local).unwrap_or_default();

    if json {
        let out = serde_json::json!({
            "refresh": outcome,
            "snapshot": snapshot,
            "popular": popular,
            "last_update": updated,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if let Some(outcome) = outcome {
        println!("{}", outcome.notice());
    }
    for rate in &popular {
        println!("{:<3} {:<18} {}", rate.currency.code(), rate.name, rate.text);
    }
    let source = match snapshot.source() {
        SnapshotSource::Provider { name } => name.as_str(),
        SnapshotSource::Fallback => "offline",
    };
    println!("Atualizado: {} ({})", updated, source);
    Ok(())
}

/// Normalizes a complete amount argument to two-decimal pt-BR text.
///
/// `.` groups thousands and `,` separates decimals. Anything else is dropped.
fn typed_amount(arg: &str) -> String {
    let kept: String = arg
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    let value = parse_amount(&kept);
    if value > 0.0 {
        format_amount(value, 2)
    } else {
        String::new()
    }
}

/// Fills both amount fields from the argument, in the requested direction.
fn conversion_fields(
    app: &App,
    pair: CurrencyPair,
    amount: &str,
    inverse: bool,
) -> (ConversionDirection, AmountFields) {
    let typed = typed_amount(amount);
    if inverse {
        let from_amount = app.convert_field(ConversionDirection::Inverse, &typed, pair);
        (
            ConversionDirection::Inverse,
            AmountFields {
                from_amount,
                to_amount: typed,
            },
        )
    } else {
        let to_amount = app.convert_field(ConversionDirection::Forward, &typed, pair);
        (
            ConversionDirection::Forward,
            AmountFields {
                from_amount: typed,
                to_amount,
            },
        )
    }
}

fn print_conversion(
    app: &App,
    pair: CurrencyPair,
    amount: &str,
    inverse: bool,
    json: bool,
) -> Result<()> {
    let (direction, fields) = conversion_fields(app, pair, amount, inverse);
    let line = app.exchange_rate_line(pair);

    if json {
        let out = serde_json::json!({
            "pair": pair,
            "direction": direction,
            "amounts": fields,
            "rate": line,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let show = |s: &str| if s.is_empty() { "--".to_string() } else { s.to_string() };
    println!(
        "{} {} = {} {}",
        pair.from.symbol(),
        show(&fields.from_amount),
        pair.to.symbol(),
        show(&fields.to_amount)
    );
    if let Some(line) = line {
        println!("{}", line.text);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use conversor_types::CurrencyCode::*;
    use std::time::Duration;

    fn offline_app() -> App {
        let fetcher = HttpFetcher::new(Duration::from_secs(1)).unwrap();
        let app = ConverterApp::new(RateService::new(fetcher, SystemClock));
        app.use_fallback_rates();
        app
    }

    #[test]
    fn test_typed_amount() {
        assert_eq!(typed_amount("1.234,56"), "1.234,56");
        assert_eq!(typed_amount("1234,5"), "1.234,50");
        assert_eq!(typed_amount("R$ 10"), "10,00");
        assert_eq!(typed_amount("abc"), "");
        assert_eq!(typed_amount("0"), "");
    }

    #[test]
    fn test_convert_grouped_amount() {
        let app = offline_app();
        let (direction, fields) =
            conversion_fields(&app, CurrencyPair::new(USD, BRL), "1.234,56", false);
        assert_eq!(direction, ConversionDirection::Forward);
        assert_eq!(fields.from_amount, "1.234,56");
        assert_eq!(fields.to_amount, "6.691,32");
    }

    #[test]
    fn test_convert_inverse_amount() {
        let app = offline_app();
        let (direction, fields) =
            conversion_fields(&app, CurrencyPair::new(USD, BRL), "6.691,32", true);
        assert_eq!(direction, ConversionDirection::Inverse);
        assert_eq!(fields.to_amount, "6.691,32");
        assert_eq!(fields.from_amount, "1.234,56");
    }

    #[test]
    fn test_parse_currency_lists_supported() {
        let err = parse_currency("XYZ").unwrap_err().to_string();
        assert!(err.contains("Unknown currency: XYZ"));
        assert!(err.contains("BRL"));
        assert!(parse_currency(" usd ").is_ok());
    }
}
