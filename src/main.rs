use anyhow::Result;
use clap::Parser;

use tplcheck::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
