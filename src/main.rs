//! nylas-mail - command line front end for the Nylas client

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use nylas_mail::mail::{Mailbox, MessageQuery};
use nylas_mail::{ClientConfig, GrantType, NylasClient};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nylas-mail", about = "Nylas OAuth and mailbox client", version)]
struct Cli {
    /// Path to a JSON configuration file; NYLAS_* variables are used when absent
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the authorization URL to send the user to
    AuthUrl {
        /// Request offline access
        #[arg(long)]
        offline: bool,
    },
    /// Exchange an authorization code or refresh token and print the grant
    Exchange {
        /// Authorization code (online) or refresh token (offline)
        token: String,
        /// Flow to use: online or offline
        #[arg(long, default_value = "online")]
        access_type: String,
    },
    /// Exchange a token and list messages from the resulting mailbox
    Messages {
        /// Authorization code (online) or refresh token (offline)
        token: String,
        /// Flow to use: online or offline
        #[arg(long, default_value = "online")]
        access_type: String,
        /// Page size
        #[arg(long, default_value_t = nylas_mail::mail::DEFAULT_LIMIT)]
        limit: u32,
        /// Only unread messages
        #[arg(long)]
        unread: bool,
    },
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<ClientConfig> {
    let path = path.or_else(|| ClientConfig::default_path().filter(|p| p.exists()));
    match path {
        Some(path) => ClientConfig::load(&path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => ClientConfig::from_env().context("loading config from environment"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = NylasClient::new(load_config(cli.config)?)?;

    match cli.command {
        Commands::AuthUrl { offline } => {
            println!("{}", client.oauth_url(!offline)?);
        }
        Commands::Exchange { token, access_type } => {
            let grant_type: GrantType = access_type.parse()?;
            let grant = client.exchange_token(&token, grant_type.is_online()).await?;
            println!("{}", serde_json::to_string_pretty(&grant.to_record())?);
        }
        Commands::Messages {
            token,
            access_type,
            limit,
            unread,
        } => {
            let grant_type: GrantType = access_type.parse()?;
            let grant = client.exchange_token(&token, grant_type.is_online()).await?;
            let mailbox = client.mailbox(grant);

            let mut query = MessageQuery::with_limit(limit);
            if unread {
                query = query.unread(true);
            }
            let page = mailbox.list_messages(&query).await?;

            for message in &page.data {
                let from = message
                    .from
                    .first()
                    .map(|p| p.email.as_str())
                    .unwrap_or("-");
                println!(
                    "{}\t{}\t{}",
                    message.id,
                    from,
                    message.subject.as_deref().unwrap_or("")
                );
            }
            if let Some(cursor) = page.next_cursor {
                tracing::info!(next_cursor = %cursor, "more messages available");
            }
        }
    }

    Ok(())
}
