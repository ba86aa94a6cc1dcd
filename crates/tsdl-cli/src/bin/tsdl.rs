#![allow(clippy::print_stderr)]

use anyhow::Result;
use clap::Parser;
use tsdl_cli::args::CliArgs;
use tsdl_cli::{driver, tracing_config};

const EXIT_FAILURE: i32 = 1;

fn main() -> Result<()> {
    // Zero cost unless TSDL_LOG or RUST_LOG is set.
    tracing_config::init_tracing();

    let args = CliArgs::parse();
    let summary = driver::run(&args)?;
    for failure in &summary.failures {
        eprintln!("{}: {}", failure.path.display(), failure.message);
    }
    if !summary.is_success() {
        std::process::exit(EXIT_FAILURE);
    }
    Ok(())
}
