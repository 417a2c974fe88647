//! Report command - detailed assessment breakdown

use crate::cmd::gather_filing;
use crate::filing::{filing_reference, FilingRecord, TaxInput};
use crate::naira::{format_naira, format_percent, format_rate};
use crate::tax::{assess, BandLine, TaxAssessment, TaxYear};
use crate::utils::resolve_year;
use clap::Args;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct ReportCommand {
    /// Filing document (JSON). Reads from stdin with "-".
    #[arg(short, long)]
    filing: Option<PathBuf>,

    /// Override a filing field, e.g. --set basic_salary=1000000
    #[arg(short, long = "set", value_name = "FIELD=VALUE")]
    set: Vec<String>,

    /// Tax year to assess (defaults to the current year)
    #[arg(short, long)]
    year: Option<i32>,

    /// Render an HTML report and open it in the browser
    #[arg(long)]
    html: bool,

    /// Where to write the HTML report (defaults to the temp directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// With --html, write the file without opening the browser
    #[arg(long)]
    no_open: bool,
}

impl ReportCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let record = gather_filing(self.filing.as_deref(), &self.set)?;
        let year = resolve_year(self.year);
        let input = record.normalize();
        let assessment = assess(&input, year);
        let reference = filing_reference(&input);

        if self.html {
            self.write_html(&record, &input, &assessment, year, &reference)
        } else {
            print_report(&record, &input, &assessment, year, &reference);
            Ok(())
        }
    }

    fn write_html(
        &self,
        record: &FilingRecord,
        input: &TaxInput,
        assessment: &TaxAssessment,
        year: TaxYear,
        reference: &str,
    ) -> anyhow::Result<()> {
        let html = render_html(record, input, assessment, year, reference);
        let path = match &self.output {
            Some(path) => path.clone(),
            None => std::env::temp_dir().join(format!("payec-report-{}.html", reference)),
        };
        std::fs::write(&path, html)?;
        println!("Report written to {}", path.display());
        if !self.no_open {
            opener::open(&path)?;
        }
        Ok(())
    }
}

#[derive(Debug, Tabled)]
struct BandRow {
    #[tabled(rename = "Chargeable Range")]
    range: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Taxed Amount")]
    taxed: String,
    #[tabled(rename = "Tax")]
    tax: String,
}

impl From<&BandLine> for BandRow {
    fn from(line: &BandLine) -> Self {
        BandRow {
            range: band_range(line.floor, line.ceiling),
            rate: format_rate(line.rate),
            taxed: format_naira(line.taxed_amount),
            tax: format_naira(line.tax),
        }
    }
}

fn band_range(floor: rust_decimal::Decimal, ceiling: Option<rust_decimal::Decimal>) -> String {
    match ceiling {
        Some(ceiling) => format!("{} - {}", format_naira(floor), format_naira(ceiling)),
        None => format!("above {}", format_naira(floor)),
    }
}

fn print_report(
    record: &FilingRecord,
    input: &TaxInput,
    assessment: &TaxAssessment,
    year: TaxYear,
    reference: &str,
) {
    println!();
    println!("PAYE TAX REPORT ({})", year);
    if let Some(name) = record.display_name() {
        println!("Taxpayer: {}", name);
    }
    if let Some(tin) = record.tin.as_deref() {
        println!("TIN: {}", tin);
    }
    println!("Filing reference: {}", reference);

    println!();
    println!("INCOME");
    println!("  Basic salary         {}", format_naira(input.basic_salary));
    println!("  Housing allowance    {}", format_naira(input.housing_allowance));
    println!("  Transport allowance  {}", format_naira(input.transport_allowance));
    println!("  Other allowances     {}", format_naira(input.other_allowances));
    println!("  Gross income         {}", format_naira(assessment.gross_income));

    println!();
    println!("DEDUCTIONS");
    println!("  Pension              {}", format_naira(input.pension_contribution));
    println!("  NHF                  {}", format_naira(input.nhf_contribution));
    println!("  Life insurance       {}", format_naira(input.life_insurance_premium));
    println!("  Total deductions     {}", format_naira(assessment.total_deductions));

    println!();
    println!("CONSOLIDATED RELIEF ALLOWANCE");
    println!(
        "  max({} of gross, {}) + {} of gross = {}",
        format_rate(year.cra_base_rate()),
        format_naira(year.cra_floor()),
        format_rate(year.cra_gross_rate()),
        format_naira(assessment.consolidated_relief)
    );
    println!("  Chargeable income    {}", format_naira(assessment.chargeable_income));

    println!();
    println!("TAX BANDS");
    if assessment.band_lines.is_empty() {
        println!("  (no chargeable income)");
    } else {
        let rows: Vec<BandRow> = assessment.band_lines.iter().map(BandRow::from).collect();
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
    }

    println!();
    println!("PERSONAL RELIEFS");
    println!(
        "  Dependents ({})       {}",
        input.number_of_dependents.min(year.max_relieved_dependents()),
        format_naira(assessment.dependent_relief)
    );
    println!("  Disability           {}", format_naira(assessment.disability_relief));

    println!();
    println!("RESULT");
    println!("  Annual tax           {}", format_naira(assessment.annual_tax));
    println!("  Monthly tax          {}", format_naira(assessment.monthly_tax));
    println!("  Effective rate       {}", format_percent(assessment.effective_tax_rate));
    println!("  Net income           {}", format_naira(assessment.net_income));
}

fn render_html(
    record: &FilingRecord,
    input: &TaxInput,
    assessment: &TaxAssessment,
    year: TaxYear,
    reference: &str,
) -> String {
    let taxpayer = record
        .display_name()
        .unwrap_or_else(|| "Taxpayer".to_string());
    let band_rows: String = assessment
        .band_lines
        .iter()
        .map(|line| {
            format!(
                "<tr><td>{}</td><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td></tr>",
                band_range(line.floor, line.ceiling),
                format_rate(line.rate),
                format_naira(line.taxed_amount),
                format_naira(line.tax)
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>PAYE Tax Report {year}</title>
<style>
body {{ font-family: sans-serif; max-width: 48rem; margin: 2rem auto; color: #1f2937; }}
h1 {{ font-size: 1.4rem; }}
table {{ border-collapse: collapse; width: 100%; margin: 1rem 0; }}
th, td {{ border: 1px solid #d1d5db; padding: 0.4rem 0.6rem; text-align: left; }}
td.num {{ text-align: right; }}
.result {{ background: #ecfdf5; font-weight: bold; }}
.muted {{ color: #6b7280; font-size: 0.85rem; }}
</style>
</head>
<body>
<h1>PAYE Tax Report ({year})</h1>
<p>{taxpayer}<br><span class="muted">Filing reference {reference}</span></p>
<table>
<tr><th>Gross income</th><td class="num">{gross}</td></tr>
<tr><th>Total deductions</th><td class="num">{deductions}</td></tr>
<tr><th>Consolidated relief</th><td class="num">{cra}</td></tr>
<tr><th>Chargeable income</th><td class="num">{chargeable}</td></tr>
</table>
<table>
<tr><th>Chargeable range</th><th>Rate</th><th>Taxed amount</th><th>Tax</th></tr>
{band_rows}
</table>
<table>
<tr><th>Dependent relief ({dependents})</th><td class="num">{dependent_relief}</td></tr>
<tr><th>Disability relief</th><td class="num">{disability_relief}</td></tr>
<tr class="result"><th>Annual tax</th><td class="num">{annual}</td></tr>
<tr><th>Monthly tax</th><td class="num">{monthly}</td></tr>
<tr><th>Effective rate</th><td class="num">{effective}</td></tr>
<tr class="result"><th>Net income</th><td class="num">{net}</td></tr>
</table>
</body>
</html>
"#,
        year = year,
        taxpayer = taxpayer,
        reference = reference,
        gross = format_naira(assessment.gross_income),
        deductions = format_naira(assessment.total_deductions),
        cra = format_naira(assessment.consolidated_relief),
        chargeable = format_naira(assessment.chargeable_income),
        band_rows = band_rows,
        dependents = input.number_of_dependents.min(year.max_relieved_dependents()),
        dependent_relief = format_naira(assessment.dependent_relief),
        disability_relief = format_naira(assessment.disability_relief),
        annual = format_naira(assessment.annual_tax),
        monthly = format_naira(assessment.monthly_tax),
        effective = format_percent(assessment.effective_tax_rate),
        net = format_naira(assessment.net_income),
    )
}
