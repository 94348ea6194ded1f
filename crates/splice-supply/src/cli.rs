use clap::{Parser, Subcommand};

use splicecore::api::FileCategory;

#[derive(Parser)]
#[command(name = "splice-supply")]
#[command(author, version, about = "Headless client shell for the Splice Supply Mini App", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the client: bootstrap, then keep the connectivity monitor alive
    Run {
        /// Force the built-in mock transport regardless of SUPPLY_API_MODE
        #[arg(long)]
        mock: bool,
    },

    /// Browse the built-in catalog without touching the network
    Catalog {
        /// File tier to list (free or premium)
        #[arg(short, long, default_value = "free")]
        category: FileCategory,

        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Substring matched against name and description
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Fetch and print the caller's account status once
    Status,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
