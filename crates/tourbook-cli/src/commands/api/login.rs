//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use tourbook_core::{ApiUrl, Credentials};

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Username or email to authenticate with
    #[arg(long)]
    pub login: String,

    /// Account password
    #[arg(long, env = "TOURBOOK_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run(api: &ApiUrl, args: LoginArgs) -> Result<()> {
    let client = session::client(api)?;
    let credentials = Credentials::new(&args.login, &args.password);

    eprintln!("{}", "Logging in...".dimmed());

    client.login(&credentials).await.context("Failed to login")?;

    output::success("Logged in successfully");
    println!();
    output::field("Login", credentials.login());
    output::field("API", api.as_str());

    Ok(())
}
