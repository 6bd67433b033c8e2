//! Museum CLI - drive the shop cart from a terminal.
//!
//! Commands:
//! - `museum render` - Show the cart page, or its item rows as HTML
//! - `museum add` - Add a catalog item to the cart
//! - `museum inc` / `museum dec` / `museum remove` - Change a line item
//! - `museum clear` - Empty the cart
//! - `museum member` - Tick or untick the member checkbox
//! - `museum shop` - List the catalog
//! - `museum config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;
mod prompt;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ChoiceArg, ConfigArgs, ItemArgs, MemberArgs, RenderArgs};

/// Museum CLI - Manage the museum shop cart
#[derive(Parser)]
#[command(name = "museum")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Start with the member checkbox ticked
    #[arg(long, global = true)]
    member: bool,

    /// Answer the discount prompt without asking
    #[arg(long, global = true, value_enum)]
    choice: Option<ChoiceArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cart page
    Render(RenderArgs),

    /// Add one unit of a catalog item
    Add(ItemArgs),

    /// Increase an item's quantity
    Inc(ItemArgs),

    /// Decrease an item's quantity
    Dec(ItemArgs),

    /// Remove an item from the cart
    Remove(ItemArgs),

    /// Empty the cart
    Clear,

    /// Tick or untick the member checkbox
    Member(MemberArgs),

    /// List the shop catalog
    Shop,

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output, cli.member, cli.choice)?;

    // Execute command
    let result = match cli.command {
        Commands::Render(args) => commands::cart::render(args, &ctx),
        Commands::Add(args) => commands::cart::add(args, &ctx),
        Commands::Inc(args) => commands::cart::inc(args, &ctx),
        Commands::Dec(args) => commands::cart::dec(args, &ctx),
        Commands::Remove(args) => commands::cart::remove(args, &ctx),
        Commands::Clear => commands::cart::clear(&ctx),
        Commands::Member(args) => commands::cart::member(args, &ctx),
        Commands::Shop => commands::shop::run(&ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
