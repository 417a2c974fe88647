use crate::tax::TaxYear;
use chrono::Utc;

pub fn write_csv<I, R, W>(records: I, writer: W) -> anyhow::Result<()>
where
    I: IntoIterator<Item = R>,
    R: serde::Serialize,
    W: std::io::Write,
{
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records.into_iter() {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Tax year from an optional CLI argument, defaulting to the current year
pub fn resolve_year(year: Option<i32>) -> TaxYear {
    match year {
        Some(year) => TaxYear(year),
        None => TaxYear::from_date(Utc::now().date_naive()),
    }
}
