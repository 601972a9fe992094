use anyhow::{Context, Result};
use clap::Args;

use tourbook_router::site;

#[derive(Args, Debug)]
pub struct ReverseArgs {
    /// Route name, e.g. `tour`
    pub name: String,

    /// Placeholder value (repeatable)
    #[arg(short, long = "param", value_name = "NAME=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, String)>,
}

pub fn run(args: ReverseArgs) -> Result<()> {
    let routes = site::routes();
    let params: Vec<(&str, &str)> = args
        .params
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();

    let path = routes
        .reverse(&args.name, &params)
        .with_context(|| format!("Cannot build path for route '{}'", args.name))?;

    println!("{}", path);
    Ok(())
}

fn parse_param(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected NAME=VALUE, got `{s}`"))
}
