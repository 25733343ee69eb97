//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "vitalex.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Vitalex configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::sample_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Set VITALEX_STORE_URL in your environment or .env file");
                println!("  3. Run: vitalex export 2022-01-01 2022-03-31");
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to create configuration file: {e}");
                Ok(2)
            }
        }
    }

    /// The sample configuration template
    fn sample_config() -> &'static str {
        r#"# Vitalex configuration

[application]
# Log level: trace, debug, info, warn, error
log_level = "info"

[store]
# Document store search endpoint; supplied from the environment
base_url = "${VITALEX_STORE_URL}"
# Bearer token, if the store requires one
# auth_token = "${VITALEX_STORE_TOKEN}"
timeout_seconds = 30
page_size = 100

[store.retry]
max_retries = 3
initial_delay_ms = 500
max_delay_ms = 10000
backoff_multiplier = 2.0

[export]
output_dir = "exports"
birth_filename = "birth-events.csv"
death_filename = "death-events.csv"

# Only needed when running the assignment service
# [users]
# base_url = "https://gateway.example.org/user-api"
# auth_token = "${VITALEX_USER_API_TOKEN}"

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
    }
}
