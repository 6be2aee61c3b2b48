#![deny(unsafe_code)]
pub mod commands;

use anyhow::Result;
use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

/// Custom styles for CLI help output
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());
use commands::analyze::Analyze;
use commands::command::Command;
use commands::merge::Merge;
use commands::onehot::Onehot;
use commands::split::Split;
use enum_dispatch::enum_dispatch;
use env_logger::Env;
use log::info;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser, Debug)]
#[command(styles = STYLES)]
struct Args {
    #[clap(subcommand)]
    subcommand: Subcommand,
}

#[enum_dispatch(Command)]
#[derive(Parser, Debug)]
#[command(version)]
#[allow(clippy::large_enum_variant)]
enum Subcommand {
    // Transform
    #[command(display_order = 1)]
    Merge(Merge),
    #[command(display_order = 2)]
    Split(Split),
    #[command(display_order = 3)]
    Onehot(Onehot),

    // Inspect
    #[command(display_order = 4)]
    Analyze(Analyze),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    info!("Running csvmill version {}", env!("CARGO_PKG_VERSION"));
    args.subcommand.execute()
}
