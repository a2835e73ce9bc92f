use anyhow::{Context, Result};

use quotecraft_agent::{HttpLlmClient, PackageSuggester};
use quotecraft_core::{views, AppConfig};

use super::open_store;

pub async fn run(config: &AppConfig) -> Result<String> {
    let store = open_store(config).await?;
    let quote = store.active();

    if quote.items.is_empty() {
        return Ok("add some meals first: select at least one item to get package suggestions"
            .to_string());
    }

    let llm = HttpLlmClient::new(
        &config.llm.base_url,
        &config.llm.model,
        config.llm.api_key.clone(),
        config.llm.timeout_secs,
    )?;
    let suggester = PackageSuggester::new(llm);

    let packages = suggester
        .suggest(&views::summary_text(quote))
        .await
        .context("could not get suggestions at this time; try again later")?;

    if packages.is_empty() {
        return Ok("no package suggestions returned".to_string());
    }

    let mut out = String::from("Suggested packages:\n");
    for package in &packages {
        out.push_str(&format!("- {package}\n"));
    }
    Ok(out.trim_end().to_string())
}
