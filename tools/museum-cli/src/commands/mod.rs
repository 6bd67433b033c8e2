//! CLI command implementations.

pub mod cart;
pub mod config;
pub mod shop;

use clap::{Args, Subcommand, ValueEnum};
use museum_commerce::cart::DiscountChoice;
use museum_commerce::ProductId;

/// Arguments for the render command.
#[derive(Args)]
pub struct RenderArgs {
    /// Print the item table body as HTML instead.
    #[arg(long)]
    pub html: bool,
}

/// Arguments for commands acting on one cart item.
#[derive(Args)]
pub struct ItemArgs {
    /// Product id.
    pub id: String,
}

impl ItemArgs {
    pub fn product_id(&self) -> ProductId {
        ProductId::new(self.id.trim())
    }
}

/// Arguments for the member command.
#[derive(Args)]
pub struct MemberArgs {
    /// New checkbox state.
    #[arg(value_enum)]
    pub state: Toggle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn is_on(self) -> bool {
        self == Toggle::On
    }
}

/// Preset answer to the discount prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ChoiceArg {
    Member,
    Volume,
}

impl ChoiceArg {
    pub fn into_choice(self) -> DiscountChoice {
        match self {
            ChoiceArg::Member => DiscountChoice::Member,
            ChoiceArg::Volume => DiscountChoice::Volume,
        }
    }
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
