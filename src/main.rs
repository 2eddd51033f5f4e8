use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use credit_simulator::report::{render_json, render_table};
use credit_simulator::{ClientInfo, CreditType, LoanRequest, compute_schedule};
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Client first name(s)
    #[arg(long)]
    first_name: String,

    /// Client last name(s)
    #[arg(long)]
    last_name: String,

    /// Client email address
    #[arg(long)]
    email: String,

    /// Credit amount
    #[arg(long)]
    amount: Option<Decimal>,

    /// Number of monthly payments
    #[arg(long)]
    months: Option<Decimal>,

    /// Kind of credit: mortgage, car-buying, consumption or other
    #[arg(long, default_value_t = CreditType::Other)]
    credit_type: CreditType,

    /// Annual interest rate as a fraction (0.11 for 11%). Overrides the credit type rate.
    #[arg(long)]
    rate: Option<Decimal>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("credit_simulator=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let client = ClientInfo::validated(&cli.first_name, &cli.last_name, &cli.email)
        .context("invalid client data")?;

    let annual_rate = cli.rate.unwrap_or_else(|| cli.credit_type.annual_rate());
    let request = LoanRequest::new(cli.amount, Some(annual_rate), cli.months);
    info!(credit_type = %cli.credit_type, rate = %annual_rate, "simulating credit");

    let table = compute_schedule(&request, client)?;

    let output = match cli.format {
        OutputFormat::Table => render_table(&table),
        OutputFormat::Json => render_json(&table).context("failed to serialize the table")?,
    };
    println!("{}", output.trim_end());

    Ok(())
}
