use std::path::Path;
use std::process::Output;

use tokio::process::Command;

/// Run the CLI with the credentials file isolated under `home`.
pub async fn run_cli_with_env(args: &[&str], home: &Path, api: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tourbook"));
    cmd.args(args);
    cmd.env("HOME", home);
    cmd.env("XDG_DATA_HOME", home.join("data"));
    cmd.env("TOURBOOK_CREDENTIALS", home.join("credentials.json"));
    cmd.env("TOURBOOK_API", api);
    cmd.env_remove("TOURBOOK_PASSWORD");
    cmd.env_remove("RUST_LOG");
    cmd.output().await.expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub async fn run_cli_with_env_success(args: &[&str], home: &Path, api: &str) -> String {
    let output = run_cli_with_env(args, home, api).await;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI and expect failure, returning stderr.
pub async fn run_cli_with_env_failure(args: &[&str], home: &Path, api: &str) -> String {
    let output = run_cli_with_env(args, home, api).await;
    if output.status.success() {
        panic!("CLI command should have failed: {:?}", args);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}
