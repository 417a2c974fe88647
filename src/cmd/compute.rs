//! Compute command - assess a single filing

use crate::cmd::gather_filing;
use crate::filing::{filing_reference, FilingOutput, FilingRecord};
use crate::naira::{format_naira, format_percent};
use crate::tax::{assess, TaxAssessment, TaxYear};
use crate::utils::resolve_year;
use chrono::Utc;
use clap::Args;
use std::fs::File;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ComputeCommand {
    /// Filing document (JSON). Reads from stdin with "-".
    #[arg(short, long)]
    filing: Option<PathBuf>,

    /// Override a filing field, e.g. --set basic_salary=1000000
    #[arg(short, long = "set", value_name = "FIELD=VALUE")]
    set: Vec<String>,

    /// Tax year to assess (defaults to the current year)
    #[arg(short, long)]
    year: Option<i32>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,

    /// Write the (input, assessment) pair to a JSON file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ComputeCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let record = gather_filing(self.filing.as_deref(), &self.set)?;
        let year = resolve_year(self.year);

        for issue in record.validate() {
            log::warn!("{}: {:?} {}", issue.field, issue.value, issue.reason);
        }

        let input = record.normalize();
        let assessment = assess(&input, year);
        let reference = filing_reference(&input);

        let output = FilingOutput {
            reference,
            computed_at: Utc::now(),
            tax_year: year.0,
            taxpayer: record.display_name(),
            input,
            assessment,
        };

        if let Some(path) = &self.output {
            let file = File::create(path)?;
            serde_json::to_writer_pretty(file, &output)?;
            log::info!("filing written to {}", path.display());
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            print_summary(&record, &output.assessment, year, &output.reference);
        }
        Ok(())
    }
}

fn print_summary(
    record: &FilingRecord,
    assessment: &TaxAssessment,
    year: TaxYear,
    reference: &str,
) {
    println!();
    println!("PAYE ASSESSMENT ({})", year);
    if let Some(name) = record.display_name() {
        println!("Taxpayer:             {}", name);
    }
    println!("Filing reference:     {}", reference);
    println!();
    println!("Gross income:         {}", format_naira(assessment.gross_income));
    println!("Deductions:           {}", format_naira(assessment.total_deductions));
    println!("Consolidated relief:  {}", format_naira(assessment.consolidated_relief));
    println!("Chargeable income:    {}", format_naira(assessment.chargeable_income));
    println!();
    println!("Annual tax:           {}", format_naira(assessment.annual_tax));
    println!("Monthly tax:          {}", format_naira(assessment.monthly_tax));
    println!("Effective rate:       {}", format_percent(assessment.effective_tax_rate));
    println!("Net income:           {}", format_naira(assessment.net_income));
}
