#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod api;
mod cli;
mod core;
mod output;
mod prelude;
mod quantity;
mod tables;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, BurrowCommand, Command},
    prelude::*,
};

#[tokio::main]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Survey(args) => {
            cli::survey(&args).await?;
        }
        Command::Burrow(args) => match args.command {
            BurrowCommand::Vehicle(args) => cli::burrow_vehicle(&args).await?,
            BurrowCommand::Weather(args) => cli::burrow_weather(&args).await?,
            BurrowCommand::Isodistance(args) => cli::burrow_isodistance(&args).await?,
            BurrowCommand::Range(args) => cli::burrow_range(&args)?,
        },
    }

    info!("done!");
    Ok(())
}
