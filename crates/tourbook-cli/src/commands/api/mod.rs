//! API subcommand implementations.

mod catalogue;
mod login;
mod logout;
mod refresh_token;
mod register;
mod request;
mod whoami;

use anyhow::Result;
use clap::{Args, Subcommand};

use tourbook_core::{ApiUrl, DEFAULT_API_URL};

#[derive(Args, Debug)]
pub struct ApiCommand {
    /// API base URL
    #[arg(long, global = true, env = "TOURBOOK_API", default_value = DEFAULT_API_URL)]
    pub api: ApiUrl,

    #[command(subcommand)]
    pub command: ApiSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ApiSubcommand {
    /// Obtain a token pair and store it
    Login(login::LoginArgs),

    /// Forget the stored tokens
    Logout(logout::LogoutArgs),

    /// Display the logged-in customer
    Whoami(whoami::WhoamiArgs),

    /// Renew the access token
    RefreshToken(refresh_token::RefreshTokenArgs),

    /// Create a new account
    Register(register::RegisterArgs),

    /// Send an arbitrary request with the stored credentials
    Request(request::RequestArgs),

    /// List tours, or show one by slug
    Tours(catalogue::SlugArgs),

    /// List companies, or show one by slug
    Companies(catalogue::SlugArgs),

    /// List countries tours are offered in
    Countries,

    /// List the logged-in customer's favourite tours
    Favourites,
}

pub async fn handle(cmd: ApiCommand) -> Result<()> {
    let api = cmd.api;
    match cmd.command {
        ApiSubcommand::Login(args) => login::run(&api, args).await,
        ApiSubcommand::Logout(args) => logout::run(&api, args),
        ApiSubcommand::Whoami(args) => whoami::run(&api, args).await,
        ApiSubcommand::RefreshToken(args) => refresh_token::run(&api, args).await,
        ApiSubcommand::Register(args) => register::run(&api, args).await,
        ApiSubcommand::Request(args) => request::run(&api, args).await,
        ApiSubcommand::Tours(args) => catalogue::tours(&api, args).await,
        ApiSubcommand::Companies(args) => catalogue::companies(&api, args).await,
        ApiSubcommand::Countries => catalogue::countries(&api).await,
        ApiSubcommand::Favourites => catalogue::favourites(&api).await,
    }
}
