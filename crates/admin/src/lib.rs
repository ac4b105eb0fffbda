mod action;
mod app;
mod cli;
mod components;
mod config;
mod errors;
mod logging;
mod pages;
mod schemas;
mod services;
mod tui;

use clap::Parser;
use color_eyre::Result;

use crate::app::App;
use crate::cli::Cli;

#[tokio::main]
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    crate::errors::init()?;
    crate::logging::init()?;

    let mut app = App::new(&cli)?;
    app.run().await?;
    Ok(())
}
