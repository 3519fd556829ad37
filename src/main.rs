use anyhow::Result;
use clap::Parser;
use loan_ledger::cli::Cli;
use simple_logger::SimpleLogger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    SimpleLogger::new().with_level(level).init()?;

    cli.run()
}
