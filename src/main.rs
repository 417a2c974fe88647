use clap::{Parser, Subcommand};

mod cmd;
mod filing;
mod naira;
mod steps;
mod tax;
mod utils;

#[derive(Parser, Debug)]
#[command(name = "payec", version, about = "Nigerian PAYE income tax calculator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assess a single filing
    Compute(cmd::compute::ComputeCommand),
    /// Detailed assessment breakdown, optionally as HTML
    Report(cmd::report::ReportCommand),
    /// Assess a CSV of filings
    Batch(cmd::batch::BatchCommand),
    /// Print tax band and relief reference tables
    Bands(cmd::bands::BandsCommand),
    /// Strictly check filing input without computing
    Validate(cmd::validate::ValidateCommand),
    /// Print expected input formats
    Schema(cmd::schema::SchemaCommand),
    /// Print the filing wizard step sequence
    Steps(cmd::steps::StepsCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Compute(command) => command.exec(),
        Command::Report(command) => command.exec(),
        Command::Batch(command) => command.exec(),
        Command::Bands(command) => command.exec(),
        Command::Validate(command) => command.exec(),
        Command::Schema(command) => command.exec(),
        Command::Steps(command) => command.exec(),
    }
}
