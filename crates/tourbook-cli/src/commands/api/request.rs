//! Raw request command.
//!
//! Sends through the authenticated client, so the bearer header and the
//! one-shot refresh on 401 apply exactly as they do for typed calls.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use tourbook_core::ApiUrl;
use tourbook_http::{ApiRequest, Method};

use crate::output;
use crate::session;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

#[derive(Args, Debug)]
pub struct RequestArgs {
    /// HTTP method
    #[arg(value_enum)]
    pub method: HttpMethod,

    /// Path relative to the API base URL (e.g. `tour/`)
    pub path: String,

    /// JSON body file, or `-` for stdin
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// Query parameter (repeatable)
    #[arg(short, long = "query", value_name = "KEY=VALUE", value_parser = parse_query)]
    pub query: Vec<(String, String)>,
}

pub async fn run(api: &ApiUrl, args: RequestArgs) -> Result<()> {
    let client = session::client(api)?;

    let mut request = ApiRequest::new(args.method.into(), args.path);
    for (key, value) in args.query {
        request = request.query(key, value);
    }
    if let Some(path) = &args.json {
        let body = read_body(path)?;
        request = request.json(&body)?;
    }

    let response = client.send(request).await.context("Request failed")?;

    if response.bytes().is_empty() {
        return Ok(());
    }

    match response.json::<serde_json::Value>() {
        Ok(value) => output::json_pretty(&value),
        Err(_) => {
            println!("{}", response.text());
            Ok(())
        }
    }
}

fn read_body(path: &Path) -> Result<serde_json::Value> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };

    serde_json::from_str(&raw).context("Request body is not valid JSON")
}

fn parse_query(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{s}`"))?;
    if key.is_empty() {
        return Err("query key must not be empty".to_string());
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_pairs_split_on_first_equals() {
        assert_eq!(
            parse_query("country=IT").unwrap(),
            ("country".to_string(), "IT".to_string())
        );
        assert_eq!(
            parse_query("q=a=b").unwrap(),
            ("q".to_string(), "a=b".to_string())
        );
        assert!(parse_query("novalue").is_err());
        assert!(parse_query("=x").is_err());
    }
}
