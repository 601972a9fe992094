//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use tourbook_core::ApiUrl;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Print the profile as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(api: &ApiUrl, args: WhoamiArgs) -> Result<()> {
    let client = session::client(api)?;

    if !client.session().is_logged_in()? {
        anyhow::bail!("No active session. Run 'tourbook api login' first.");
    }

    let profile = client
        .current_user()
        .await
        .context("Failed to fetch profile")?;

    if args.json {
        return output::json_pretty(&profile);
    }

    output::field("Username", &profile.username);
    if let Some(email) = &profile.email {
        output::field("Email", email);
    }
    if let Some(phone) = &profile.phone {
        output::field("Phone", phone);
    }
    output::field("API", api.as_str());

    Ok(())
}
