//! Account registration command.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use tourbook_core::ApiUrl;
use tourbook_http::Registration;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Username for the new account
    #[arg(long)]
    pub username: String,

    /// Email address
    #[arg(long)]
    pub email: String,

    /// Password for the new account
    #[arg(long, env = "TOURBOOK_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Contact phone number
    #[arg(long)]
    pub phone: Option<String>,
}

pub async fn run(api: &ApiUrl, args: RegisterArgs) -> Result<()> {
    let client = session::client(api)?;
    let registration = Registration {
        username: args.username,
        email: args.email,
        password: args.password,
        phone: args.phone,
    };

    eprintln!("{}", "Creating account...".dimmed());

    let profile = client
        .register(&registration)
        .await
        .context("Failed to create account")?;

    output::success("Account created");
    println!();
    output::field("Username", &profile.username);
    if let Some(email) = &profile.email {
        output::field("Email", email);
    }

    Ok(())
}
