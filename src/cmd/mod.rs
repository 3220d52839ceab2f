pub mod bases;
pub mod baseline;
pub mod rates;
pub mod schema;
pub mod tax;

use crate::core::{self, Rates, Scenario};
use anyhow::Context;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Read a scenario JSON file (or stdin with "-")
pub fn read_scenario(path: &Path) -> anyhow::Result<Scenario> {
    let scenario = if path.as_os_str() == "-" {
        read_from_stdin()?
    } else {
        let file = File::open(path)
            .with_context(|| format!("failed to open scenario {}", path.display()))?;
        core::read_scenario_json(BufReader::new(file))
            .with_context(|| format!("failed to read scenario {}", path.display()))?
    };
    log::info!("Read scenario '{}'", scenario.name);
    Ok(scenario)
}

fn read_from_stdin() -> anyhow::Result<Scenario> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a scenario file or pipe JSON to stdin.");
    }

    core::read_scenario_json(io::Cursor::new(buffer)).context("failed to read scenario from stdin")
}

/// 2025 Zurich rates with the optional override file applied
pub fn load_rates(overrides: Option<&Path>) -> anyhow::Result<Rates> {
    let rates = Rates::zurich_2025();
    let Some(path) = overrides else {
        return Ok(rates);
    };

    let file = File::open(path)
        .with_context(|| format!("failed to open rate overrides {}", path.display()))?;
    let overrides = core::read_rate_overrides(BufReader::new(file))
        .with_context(|| format!("failed to read rate overrides {}", path.display()))?;
    log::info!(
        "Applying {} rate override(s) from {}",
        overrides.overrides.len(),
        path.display()
    );
    Ok(rates.apply_overrides(&overrides))
}

pub fn write_csv<I, R, W>(records: I, writer: W) -> anyhow::Result<()>
where
    I: IntoIterator<Item = R>,
    R: serde::Serialize,
    W: io::Write,
{
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records.into_iter() {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

fn format_chf(amount: Decimal) -> String {
    format!("{:.2}", amount)
}
