mod cmd;
mod core;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "zhtax",
    version,
    about = "Federal and Zurich taxable income for salary and dividends (tax year 2025)"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate taxable income bases for a scenario
    Bases(cmd::bases::BasesCommand),
    /// Calculate the built-in baseline scenario
    Baseline(cmd::baseline::BaselineCommand),
    /// List the rate registry
    Rates(cmd::rates::RatesCommand),
    /// Print input and output schemas
    Schema(cmd::schema::SchemaCommand),
    /// Compute tax owed (tariffs not yet available)
    Tax(cmd::tax::TaxCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Bases(cmd) => cmd.exec(),
        Command::Baseline(cmd) => cmd.exec(),
        Command::Rates(cmd) => cmd.exec(),
        Command::Schema(cmd) => cmd.exec(),
        Command::Tax(cmd) => cmd.exec(),
    }
}
