use anyhow::{Context, Result};
use clap::Args;

use tourbook_core::ApiUrl;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub fn run(api: &ApiUrl, _args: LogoutArgs) -> Result<()> {
    let client = session::client(api)?;

    if !client.session().is_logged_in()? {
        output::warning("No active session");
        return Ok(());
    }

    client.logout().context("Failed to clear credentials")?;
    output::success("Logged out");

    Ok(())
}
