//! Route table inspection.

mod list;
mod resolve;
mod reverse;

use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct RouteCommand {
    #[command(subcommand)]
    pub command: RouteSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RouteSubcommand {
    /// Resolve a path to the page it renders
    Resolve(resolve::ResolveArgs),

    /// List the site's routes in match order
    List(list::ListArgs),

    /// Build the path of a named route
    Reverse(reverse::ReverseArgs),
}

pub fn handle(cmd: RouteCommand) -> Result<()> {
    match cmd.command {
        RouteSubcommand::Resolve(args) => resolve::run(args),
        RouteSubcommand::List(args) => list::run(args),
        RouteSubcommand::Reverse(args) => reverse::run(args),
    }
}
