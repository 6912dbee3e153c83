use anyhow::Result;
use clap::Parser;

use slicestore::cli::{run, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let state = run(&cli)?;
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}
