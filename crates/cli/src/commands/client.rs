use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;

use quotecraft_core::{AppConfig, ClientInfoUpdate};

use super::open_store;

#[derive(Debug, Args)]
pub struct ClientArgs {
    #[arg(long, help = "Client name")]
    pub name: Option<String>,
    #[arg(long, help = "Phone number; pass an empty string to clear")]
    pub phone: Option<String>,
    #[arg(long, help = "Event date, YYYY-MM-DD")]
    pub event_date: Option<NaiveDate>,
    #[arg(long, help = "Guest count")]
    pub guests: Option<u32>,
}

pub async fn run(config: &AppConfig, args: ClientArgs) -> Result<String> {
    let mut store = open_store(config).await?;

    store
        .update_client_info(ClientInfoUpdate {
            name: args.name,
            phone_number: args.phone,
            event_date: args.event_date,
            guest_count: args.guests,
        })
        .await?;

    let client = &store.active().client_info;
    Ok(format!(
        "client info updated: {} ({} guests)",
        if client.name.is_empty() { "unnamed" } else { client.name.as_str() },
        client.guest_count
    ))
}
