//! Bands command - tax band and relief reference tables

use crate::naira::{format_naira, format_rate};
use crate::utils::resolve_year;
use clap::Args;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct BandsCommand {
    /// Tax year (defaults to the current year)
    #[arg(short, long)]
    year: Option<i32>,
}

#[derive(Debug, Tabled)]
struct BandRefRow {
    #[tabled(rename = "Chargeable Range")]
    range: String,
    #[tabled(rename = "Marginal Rate")]
    rate: String,
    #[tabled(rename = "Cumulative At Floor")]
    cumulative: String,
}

impl BandsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let year = resolve_year(self.year);

        let rows: Vec<BandRefRow> = year
            .bands()
            .iter()
            .map(|band| BandRefRow {
                range: match band.ceiling {
                    Some(ceiling) => {
                        format!("{} - {}", format_naira(band.floor), format_naira(ceiling))
                    }
                    None => format!("above {}", format_naira(band.floor)),
                },
                rate: format_rate(band.rate),
                cumulative: format_naira(band.cumulative),
            })
            .collect();

        println!();
        println!("PROGRESSIVE TAX BANDS ({})", year);
        println!("Covers {} to {}", year.start_date(), year.end_date());
        println!();
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);

        println!();
        println!(
            "Consolidated relief: max({} of gross, {}) + {} of gross",
            format_rate(year.cra_base_rate()),
            format_naira(year.cra_floor()),
            format_rate(year.cra_gross_rate())
        );
        println!(
            "Dependent relief:    {} per dependent (first {} dependents)",
            format_naira(year.dependent_relief()),
            year.max_relieved_dependents()
        );
        println!(
            "Disability relief:   {}",
            format_naira(year.disability_relief())
        );
        Ok(())
    }
}
