//! Refresh token command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use tourbook_core::ApiUrl;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct RefreshTokenArgs {}

pub async fn run(api: &ApiUrl, _args: RefreshTokenArgs) -> Result<()> {
    let client = session::client(api)?;

    eprintln!("{}", "Refreshing access token...".dimmed());

    client
        .refresh()
        .await
        .context("Failed to refresh access token")?;

    output::success("Access token refreshed");
    Ok(())
}
