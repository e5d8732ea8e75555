use crate::cli::run;

mod actions;
mod catalog;
pub mod cli;
mod config;
pub mod domain;
mod filter;
pub mod http;
mod onboard;
mod selection;

fn main() -> anyhow::Result<()> {
    run()
}
