//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::api::ApiCommand;
use crate::commands::route::RouteCommand;

/// Tour-booking API client and route inspector.
#[derive(Parser, Debug)]
#[command(name = "tourbook")]
#[command(author, version = env!("TOURBOOK_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Booking API operations
    Api(ApiCommand),

    /// Resolve site paths against the route table
    Route(RouteCommand),
}
