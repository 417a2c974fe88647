pub mod bands;
pub mod batch;
pub mod compute;
pub mod report;
pub mod schema;
pub mod steps;
pub mod validate;

use crate::filing::{self, FilingRecord};
use anyhow::Context;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Read a single filing document (JSON), or stdin with "-"
pub fn read_filing(path: &Path) -> anyhow::Result<FilingRecord> {
    if path.as_os_str() == "-" {
        let record = filing::read_filing_json(stdin_reader()?)?;
        Ok(record)
    } else {
        let file =
            File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
        let record = filing::read_filing_json(BufReader::new(file))?;
        Ok(record)
    }
}

/// Read a batch of filings (CSV), or stdin with "-"
pub fn read_batch(path: &Path) -> anyhow::Result<Vec<FilingRecord>> {
    if path.as_os_str() == "-" {
        let records = filing::read_filings_csv(stdin_reader()?)?;
        Ok(records)
    } else {
        let file =
            File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
        let records = filing::read_filings_csv(BufReader::new(file))?;
        Ok(records)
    }
}

fn stdin_reader() -> anyhow::Result<io::Cursor<Vec<u8>>> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }

    Ok(io::Cursor::new(buffer))
}

/// Apply a `field=value` override to a filing record
pub fn apply_set(record: &mut FilingRecord, assignment: &str) -> anyhow::Result<()> {
    let (field, value) = assignment
        .split_once('=')
        .with_context(|| format!("expected field=value, got {:?}", assignment))?;
    let value = Some(value.to_string());
    match field {
        "first_name" => record.first_name = value,
        "last_name" => record.last_name = value,
        "tin" => record.tin = value,
        "basic_salary" => record.basic_salary = value,
        "housing_allowance" => record.housing_allowance = value,
        "transport_allowance" => record.transport_allowance = value,
        "other_allowances" => record.other_allowances = value,
        "pension_contribution" => record.pension_contribution = value,
        "nhf_contribution" => record.nhf_contribution = value,
        "life_insurance_premium" => record.life_insurance_premium = value,
        "number_of_dependents" => record.number_of_dependents = value,
        "is_disabled" => record.is_disabled = value,
        _ => anyhow::bail!("unknown filing field {:?}", field),
    }
    Ok(())
}

/// Build a filing from an optional document plus `--set` overrides
pub fn gather_filing(
    path: Option<&Path>,
    sets: &[String],
) -> anyhow::Result<FilingRecord> {
    let mut record = match path {
        Some(path) => read_filing(path)?,
        None if sets.is_empty() => {
            anyhow::bail!("No filing given. Provide --filing or at least one --set field=value.")
        }
        None => FilingRecord::default(),
    };
    for assignment in sets {
        apply_set(&mut record, assignment)?;
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_set_overrides_fields() {
        let mut record = FilingRecord::default();
        apply_set(&mut record, "basic_salary=1000000").unwrap();
        apply_set(&mut record, "is_disabled=yes").unwrap();
        assert_eq!(record.basic_salary.as_deref(), Some("1000000"));
        assert_eq!(record.is_disabled.as_deref(), Some("yes"));
    }

    #[test]
    fn apply_set_rejects_unknown_field() {
        let mut record = FilingRecord::default();
        assert!(apply_set(&mut record, "salary=1").is_err());
        assert!(apply_set(&mut record, "no-equals").is_err());
    }

    #[test]
    fn gather_filing_requires_some_input() {
        assert!(gather_filing(None, &[]).is_err());
    }
}
