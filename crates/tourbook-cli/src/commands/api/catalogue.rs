//! Catalogue listing commands.

use anyhow::{Context, Result};
use clap::Args;

use tourbook_core::ApiUrl;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct SlugArgs {
    /// Show a single entry by slug
    pub slug: Option<String>,
}

pub async fn tours(api: &ApiUrl, args: SlugArgs) -> Result<()> {
    let client = session::client(api)?;
    let value = match args.slug {
        Some(slug) => client.tour(&slug).await,
        None => client.tours().await,
    }
    .context("Failed to fetch tours")?;

    output::json_pretty(&value)
}

pub async fn companies(api: &ApiUrl, args: SlugArgs) -> Result<()> {
    let client = session::client(api)?;
    let value = match args.slug {
        Some(slug) => client.company(&slug).await,
        None => client.companies().await,
    }
    .context("Failed to fetch companies")?;

    output::json_pretty(&value)
}

pub async fn countries(api: &ApiUrl) -> Result<()> {
    let client = session::client(api)?;
    let value = client
        .countries()
        .await
        .context("Failed to fetch countries")?;

    output::json_pretty(&value)
}

pub async fn favourites(api: &ApiUrl) -> Result<()> {
    let client = session::client(api)?;
    let value = client
        .favourites()
        .await
        .context("Failed to fetch favourites")?;

    output::json_pretty(&value)
}
