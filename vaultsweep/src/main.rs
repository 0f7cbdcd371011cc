// src/main.rs
use anyhow::Result;
use clap::Parser as _;
use vaultsweep::{Args, logging, run};

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose, args.quiet);
    run(args)
}
