use clap::Parser;

mod app;
mod audio;
mod catalog;
mod cli;
mod config;
mod error;
mod logging;
mod mpris;
mod navigation;
mod player;
mod runtime;
mod ui;

fn main() -> anyhow::Result<()> {
    runtime::run(cli::Cli::parse())
}
