use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use earnings_cli::csv_loader;
use earnings_cli::form::{EarningsForm, Field, FormError};
use earnings_cli::report::{self, RATE_LOOKUP_URL};
use earnings_core::{Currency, EarningsConverter};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Freelance earnings calculator.
///
/// Converts gross freelance income in the source currency into the net
/// amount deposited in the destination currency, after deducting the
/// platform service fee, GST on that fee, withholding tax, and a flat
/// withdrawal fee.
#[derive(Debug, Parser)]
#[command(name = "earnings-calculator", version)]
struct Cli {
    /// Gross earnings in the source currency.
    #[arg(long, default_value = "750")]
    earnings: String,

    /// Platform service fee, percent of gross earnings.
    #[arg(long, default_value = "10")]
    service_fee: String,

    /// GST charged on the service fee, percent.
    #[arg(long, default_value = "18")]
    gst: String,

    /// Withholding tax, percent of gross earnings.
    #[arg(long, default_value = "1")]
    withholding_tax: String,

    /// Flat withdrawal fee in the source currency.
    #[arg(long, default_value = "1")]
    withdrawal_fee: String,

    /// Exchange rate: destination units per source unit.
    /// No calculation runs without one.
    #[arg(long)]
    rate: Option<String>,

    /// Source currency code.
    #[arg(long, default_value = "USD")]
    from: Currency,

    /// Destination currency code.
    #[arg(long, default_value = "INR")]
    to: Currency,

    /// Show the full deduction breakdown, not just the net amount.
    #[arg(long, default_value_t = false)]
    details: bool,

    /// Compute one result per row of a scenarios CSV file instead of
    /// reading the value flags.
    #[arg(long)]
    file: Option<PathBuf>,
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match &cli.file {
        Some(path) => run_batch(path, cli.details),
        None => run_single(&cli),
    }
}

fn run_single(cli: &Cli) -> Result<()> {
    let mut form = EarningsForm::new();
    form.set_currencies(cli.from, cli.to);

    apply(&mut form, Field::TotalEarnings, &cli.earnings)?;
    apply(&mut form, Field::ServiceFeePercentage, &cli.service_fee)?;
    apply(&mut form, Field::GstPercentage, &cli.gst)?;
    apply(&mut form, Field::WithholdingTaxPercentage, &cli.withholding_tax)?;
    apply(&mut form, Field::WithdrawalFee, &cli.withdrawal_fee)?;
    if let Some(rate) = &cli.rate {
        apply(&mut form, Field::ExchangeRate, rate)?;
    }

    let input = match form.snapshot() {
        Ok(input) => input,
        Err(FormError::MissingExchangeRate) => bail!(
            "no exchange rate entered; look up the current {}/{} rate at {} and pass it with --rate",
            cli.from,
            cli.to,
            RATE_LOOKUP_URL
        ),
        Err(err) => return Err(err).context("form input rejected"),
    };

    debug!(?input, "computing single scenario");

    let converter = EarningsConverter::new(form.source_currency(), form.destination_currency());
    let breakdown = converter.compute(&input)?;

    if cli.details {
        println!("{}", report::render_breakdown(&breakdown));
    }
    println!("{}", report::render_summary(&breakdown));

    Ok(())
}

fn run_batch(
    path: &Path,
    details: bool,
) -> Result<()> {
    let scenarios = csv_loader::load_from_file(path)
        .map_err(anyhow::Error::from_boxed)
        .with_context(|| format!("failed to load scenarios from: {}", path.display()))?;

    debug!(count = scenarios.len(), "computing batch scenarios");

    for (idx, scenario) in scenarios.iter().enumerate() {
        let row_number = idx + 1;
        let converter =
            EarningsConverter::new(scenario.source_currency, scenario.destination_currency);
        let breakdown = converter
            .compute(&scenario.input)
            .with_context(|| format!("row {row_number}"))?;

        let label = scenario
            .label
            .clone()
            .unwrap_or_else(|| format!("row {row_number}"));
        println!("{}", report::render_batch_line(&label, &breakdown));
        if details {
            println!("{}", report::render_breakdown(&breakdown));
        }
    }

    Ok(())
}

/// Feeds one flag value through the form's edit filter, turning a silent
/// in-form rejection into a CLI error the user can act on.
fn apply(
    form: &mut EarningsForm,
    field: Field,
    text: &str,
) -> Result<()> {
    if !form.set(field, text) {
        bail!(
            "{} '{}' is not a valid number (digits and one decimal point only)",
            field.label(),
            text
        );
    }
    Ok(())
}
