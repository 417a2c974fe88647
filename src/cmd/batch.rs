//! Batch command - assess a CSV of filings

use crate::cmd::read_batch;
use crate::filing::filing_reference;
use crate::naira::{format_naira, format_percent};
use crate::tax::assess;
use crate::utils::{resolve_year, write_csv};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct BatchCommand {
    /// Filings file (CSV). Reads from stdin if not specified.
    #[arg(default_value = "-")]
    file: PathBuf,

    /// Tax year to assess (defaults to the current year)
    #[arg(short, long)]
    year: Option<i32>,

    /// Output as CSV instead of a formatted table
    #[arg(long)]
    csv: bool,
}

#[derive(Debug, Tabled)]
struct BatchRow {
    #[tabled(rename = "Taxpayer")]
    taxpayer: String,
    #[tabled(rename = "Reference")]
    reference: String,
    #[tabled(rename = "Gross")]
    gross: String,
    #[tabled(rename = "Chargeable")]
    chargeable: String,
    #[tabled(rename = "Annual Tax")]
    annual_tax: String,
    #[tabled(rename = "Monthly Tax")]
    monthly_tax: String,
    #[tabled(rename = "Net")]
    net: String,
    #[tabled(rename = "Rate")]
    rate: String,
}

/// CSV record for batch output
#[derive(Debug, Serialize)]
struct BatchCsvRecord {
    taxpayer: String,
    tin: String,
    reference: String,
    gross_income: String,
    total_deductions: String,
    chargeable_income: String,
    annual_tax: String,
    monthly_tax: String,
    effective_tax_rate: String,
    net_income: String,
}

impl BatchCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let records = read_batch(&self.file)?;
        let year = resolve_year(self.year);

        let assessed: Vec<_> = records
            .iter()
            .map(|record| {
                let input = record.normalize();
                let assessment = assess(&input, year);
                let reference = filing_reference(&input);
                (record, assessment, reference)
            })
            .collect();

        if self.csv {
            let rows = assessed.iter().map(|(record, assessment, reference)| {
                BatchCsvRecord {
                    taxpayer: record.display_name().unwrap_or_default(),
                    tin: record.tin.clone().unwrap_or_default(),
                    reference: reference.clone(),
                    gross_income: assessment.gross_income.round_dp(2).to_string(),
                    total_deductions: assessment.total_deductions.round_dp(2).to_string(),
                    chargeable_income: assessment.chargeable_income.round_dp(2).to_string(),
                    annual_tax: assessment.annual_tax.round_dp(2).to_string(),
                    monthly_tax: assessment.monthly_tax.round_dp(2).to_string(),
                    effective_tax_rate: assessment.effective_tax_rate.round_dp(2).to_string(),
                    net_income: assessment.net_income.round_dp(2).to_string(),
                }
            });
            write_csv(rows, io::stdout())?;
            return Ok(());
        }

        if assessed.is_empty() {
            println!("No filings found");
            return Ok(());
        }

        let rows: Vec<BatchRow> = assessed
            .iter()
            .map(|(record, assessment, reference)| BatchRow {
                taxpayer: record
                    .display_name()
                    .unwrap_or_else(|| "(unnamed)".to_string()),
                reference: reference.clone(),
                gross: format_naira(assessment.gross_income),
                chargeable: format_naira(assessment.chargeable_income),
                annual_tax: format_naira(assessment.annual_tax),
                monthly_tax: format_naira(assessment.monthly_tax),
                net: format_naira(assessment.net_income),
                rate: format_percent(assessment.effective_tax_rate),
            })
            .collect();

        println!();
        println!("BATCH PAYE ASSESSMENT ({})", year);
        println!();
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);

        let total_tax: Decimal = assessed
            .iter()
            .map(|(_, assessment, _)| assessment.annual_tax)
            .sum();
        println!();
        println!(
            "Filings: {}, Total annual tax: {}",
            assessed.len(),
            format_naira(total_tax)
        );
        Ok(())
    }
}
