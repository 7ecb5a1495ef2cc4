use std::collections::HashMap;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use moments_client::{MomentsClient, MomentsConfig, MomentsError, PostMomentsRequest};
use secrecy::SecretString;
use url::Url;

#[derive(Parser)]
#[command(name = "moments")]
#[command(version)]
#[command(about = "CLI for posting moments to the tracking service", long_about = None)]
struct Cli {
    /// Base URL of the moments tracking service
    #[arg(long, env = "MOMENTS_BASE_PATH")]
    base_path: String,

    /// Bearer access token for the tracking service
    #[arg(long, env = "MOMENTS_ACCESS_TOKEN", hide_env_values = true)]
    access_token: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Post a moment
    Post {
        /// Schema the moment's payload conforms to
        #[arg(long)]
        schema_id: String,

        /// Project the moment belongs to
        #[arg(long)]
        project_id: String,

        /// Moment payload as a JSON object
        #[arg(long, default_value = "{}")]
        data: String,

        /// Output the raw response JSON instead of just the moment id
        #[arg(long)]
        raw: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // reqwest is built without a default TLS provider; install ring before
    // the first client is constructed
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls crypto provider"))?;

    let cli = Cli::parse();

    let base_path = Url::parse(&cli.base_path)
        .with_context(|| format!("invalid base path: {}", cli.base_path))?;
    let config = MomentsConfig::new(base_path, SecretString::from(cli.access_token));
    let client = MomentsClient::new(config).context("failed to build moments client")?;

    match cli.command {
        Commands::Post {
            schema_id,
            project_id,
            data,
            raw,
        } => {
            let data: HashMap<String, serde_json::Value> =
                serde_json::from_str(&data).context("--data must be a JSON object")?;

            let request = PostMomentsRequest {
                schema_id,
                project_id,
                data,
            };

            match client.post_moments(&request).await {
                Ok(response) => {
                    if raw {
                        println!("{}", serde_json::to_string_pretty(&response)?);
                    } else {
                        println!("{}", response.moment_id);
                    }
                }
                Err(MomentsError::Api { status, errors }) => {
                    eprintln!("moment rejected ({}): {}", status, errors.message);
                    for error in &errors.errors {
                        eprintln!("  - {}", error);
                    }
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    Ok(())
}
