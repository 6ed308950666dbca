use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

use zeptomail_provider::{DefaultSettings, ProviderConfig, SendRequest};

/// Sends one message described as JSON, read from the file given as the
/// first argument or from stdin, and prints the API response.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ProviderConfig::from_env()?;
    let settings = DefaultSettings::from_env()?;
    tracing::info!("ZeptoMail provider for {} initialized", settings.default_from);

    let raw = match std::env::args().nth(1) {
        Some(path) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read {path}"))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("failed to read request from stdin")?;
            buf
        }
    };
    let request: SendRequest = serde_json::from_str(&raw).context("invalid send request")?;

    let sender = zeptomail_provider::init(config, settings);
    let response = sender.send(request).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
