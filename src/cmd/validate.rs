//! Validate command - strict input checking without computing

use crate::cmd::{read_batch, read_filing};
use crate::filing::{FieldIssue, FilingRecord};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// Filing document (JSON). Reads from stdin with "-".
    #[arg(short, long, conflicts_with = "batch")]
    filing: Option<PathBuf>,

    /// Filings file (CSV) to validate row by row
    #[arg(short, long)]
    batch: Option<PathBuf>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// A validation issue for output
#[derive(Debug, Serialize)]
struct ValidationIssue {
    row: usize,
    field: &'static str,
    value: String,
    reason: String,
}

/// JSON output structure
#[derive(Debug, Serialize)]
struct ValidationOutput {
    issue_count: usize,
    issues: Vec<ValidationIssue>,
}

impl ValidateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let records: Vec<FilingRecord> = match (&self.filing, &self.batch) {
            (_, Some(batch)) => read_batch(batch)?,
            (Some(filing), None) => vec![read_filing(filing)?],
            (None, None) => vec![read_filing(std::path::Path::new("-"))?],
        };

        let issues: Vec<ValidationIssue> = records
            .iter()
            .enumerate()
            .flat_map(|(index, record)| {
                record.validate().into_iter().map(move |issue| {
                    let FieldIssue {
                        field,
                        value,
                        reason,
                    } = issue;
                    ValidationIssue {
                        row: index + 1,
                        field,
                        value,
                        reason: reason.to_string(),
                    }
                })
            })
            .collect();

        if self.json {
            let output = ValidationOutput {
                issue_count: issues.len(),
                issues,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            if output.issue_count > 0 {
                std::process::exit(1);
            }
            return Ok(());
        }

        println!();
        println!("VALIDATION RESULTS");
        println!();

        if issues.is_empty() {
            println!("\u{2713} No issues found.");
        } else {
            println!("\u{26A0} {} issue(s) found:", issues.len());
            println!();
            for (i, issue) in issues.iter().enumerate() {
                println!(
                    "  {}. row {}, {} = {:?}: {}",
                    i + 1,
                    issue.row,
                    issue.field,
                    issue.value,
                    issue.reason
                );
            }
            std::process::exit(1);
        }
        Ok(())
    }
}
