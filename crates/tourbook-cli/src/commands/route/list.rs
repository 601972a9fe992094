use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde_json::json;

use tourbook_router::site;

use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print routes as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ListArgs) -> Result<()> {
    let routes = site::routes();

    if args.json {
        let entries: Vec<_> = routes
            .routes()
            .iter()
            .map(|r| {
                json!({
                    "pattern": r.pattern().as_str(),
                    "name": r.name(),
                    "page": r.page(),
                })
            })
            .collect();
        return output::json_pretty(&entries);
    }

    for route in routes.routes() {
        println!(
            "{:<16} {:<12} {}",
            route.pattern().as_str(),
            route.page().as_str(),
            route.name().unwrap_or("-").dimmed()
        );
    }

    Ok(())
}
