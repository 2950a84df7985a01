use clap::Parser;
use propmatch::cli::{self, Cli};

fn main() -> miette::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    cli::run(&cli)?;
    Ok(())
}
