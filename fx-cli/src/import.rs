//! Bulk import of daily rates from a CSV file.
//!
//! The first row names the pairs (`Date,USD/EUR,USD/GBP,...`), every other
//! row holds a date followed by one rate per pair. Empty cells are skipped.

use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};

use fx_client::{ClientError, FxClient};
use fx_types::{CurrencyCode, RateRequest};

/// Rates read from a CSV file, ready to be posted.
#[derive(Debug)]
pub struct RateSheet {
    pub pairs: Vec<(CurrencyCode, CurrencyCode)>,
    pub rates: Vec<RateRequest>,
}

impl RateSheet {
    /// Every currency that appears in a pair header, sorted.
    pub fn currencies(&self) -> BTreeSet<CurrencyCode> {
        self.pairs
            .iter()
            .flat_map(|(base, target)| [*base, *target])
            .collect()
    }
}

/// Outcome of an import run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub currencies_created: usize,
    pub rates_created: usize,
    /// Rates already stored for the same pair and date.
    pub rates_skipped: usize,
}

fn parse_pair(header: &str) -> Result<(CurrencyCode, CurrencyCode)> {
    let (base, target) = header
        .split_once('/')
        .with_context(|| format!("Column {:?} is not a BASE/TARGET pair", header))?;
    let base: CurrencyCode = base
        .trim()
        .parse()
        .with_context(|| format!("Bad base currency in column {:?}", header))?;
    let target: CurrencyCode = target
        .trim()
        .parse()
        .with_context(|| format!("Bad target currency in column {:?}", header))?;
    Ok((base, target))
}

/// Parses a rate sheet from any reader.
pub fn parse_rates(input: impl Read) -> Result<RateSheet> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers().context("Failed to read CSV header")?.clone();
    if headers.len() < 2 {
        bail!("CSV header must list a date column and at least one pair");
    }
    let pairs = headers
        .iter()
        .skip(1)
        .map(parse_pair)
        .collect::<Result<Vec<_>>>()?;

    let mut rates = Vec::new();
    for (index, record) in reader.records().enumerate() {
        // Header is line 1.
        let line = index + 2;
        let record = record.with_context(|| format!("Failed to read line {}", line))?;

        let raw_date = record.get(0).unwrap_or_default();
        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
            .with_context(|| format!("Bad date {:?} on line {}", raw_date, line))?;

        for (cell, (base, target)) in record.iter().skip(1).zip(&pairs) {
            if cell.is_empty() {
                continue;
            }
            let rate: f64 = cell
                .parse()
                .with_context(|| format!("Bad rate {:?} for {}/{} on line {}", cell, base, target, line))?;
            rates.push(RateRequest {
                rate,
                currency_base: *base,
                currency_target: *target,
                date,
            });
        }
    }

    Ok(RateSheet { pairs, rates })
}

/// Reads a rate sheet from disk.
pub fn read_rates(path: &Path) -> Result<RateSheet> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    parse_rates(file)
}

/// Registers missing currencies, then posts every rate in the sheet.
pub async fn import_rates(client: &FxClient, sheet: &RateSheet) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();

    let existing: BTreeSet<CurrencyCode> = client
        .list_currencies()
        .await?
        .into_iter()
        .map(|c| c.code)
        .collect();
    for code in sheet.currencies().difference(&existing) {
        client.create_currency(*code).await?;
        summary.currencies_created += 1;
    }

    let pb = ProgressBar::new(sheet.rates.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("█▓▒░ "),
    );

    for rate in &sheet.rates {
        pb.set_message(format!("{}/{} {}", rate.currency_base, rate.currency_target, rate.date));
        match client.create_rate(rate).await {
            Ok(_) => summary.rates_created += 1,
            Err(ClientError::Api { status: 409, .. }) => summary.rates_skipped += 1,
            Err(err) => {
                pb.abandon_with_message("import aborted");
                return Err(err.into());
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message("done");

    Ok(summary)
}
