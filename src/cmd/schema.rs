//! Schema command - print expected input formats

use crate::filing::{FilingRecord, TaxInput};
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the filing document
    JsonSchema,
    /// CSV header row with column names
    CsvHeader,
    /// Field catalog with kinds and descriptions
    Fields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => self.print_json_schema(),
            SchemaFormat::CsvHeader => self.print_csv_header(),
            SchemaFormat::Fields => self.print_fields(),
        }
    }

    fn print_json_schema(&self) -> anyhow::Result<()> {
        let schema = schema_for!(FilingRecord);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }

    fn print_csv_header(&self) -> anyhow::Result<()> {
        let columns: Vec<&str> = FilingRecord::form_schema()
            .iter()
            .map(|field| field.name)
            .collect();
        println!("{}", columns.join(","));
        Ok(())
    }

    fn print_fields(&self) -> anyhow::Result<()> {
        println!("Filing Input Fields");
        println!("===================");
        println!();
        for field in TaxInput::form_schema() {
            println!("{:24} ({:6})  {}", field.name, field.kind, field.description);
        }
        println!();
        println!("All amounts are annual Naira figures. Blank or unparsable");
        println!("values are treated as 0 (use `validate` for strict checking).");
        Ok(())
    }
}
