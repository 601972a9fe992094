use anyhow::Result;
use clap::Args;
use serde_json::json;

use tourbook_router::site;

use crate::output;

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Path to resolve, e.g. `/tours/abc`
    pub path: String,

    /// Print the match as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ResolveArgs) -> Result<()> {
    let routes = site::routes();

    let Some(matched) = routes.resolve(&args.path) else {
        anyhow::bail!("No route matches '{}'", args.path);
    };

    if args.json {
        let params: serde_json::Map<String, serde_json::Value> = matched
            .params
            .iter()
            .map(|(k, v)| (k.to_string(), json!(v)))
            .collect();
        return output::json_pretty(&json!({
            "page": matched.page,
            "name": matched.name,
            "pattern": matched.pattern.map(|p| p.as_str()),
            "params": params,
        }));
    }

    output::field("Page", matched.page.as_str());
    if let Some(name) = matched.name {
        output::field("Name", name);
    }
    if let Some(pattern) = matched.pattern {
        output::field("Pattern", pattern.as_str());
    }
    for (key, value) in matched.params.iter() {
        output::field(key, value);
    }

    Ok(())
}
