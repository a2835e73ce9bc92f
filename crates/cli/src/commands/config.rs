use quotecraft_core::AppConfig;

/// Effective configuration with the API key redacted.
pub fn run(config: &AppConfig) -> String {
    let catalog = config
        .catalog
        .path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "(builtin menu)".to_string());
    let api_key = if config.llm.api_key.is_some() { "***redacted***" } else { "(unset)" };

    format!(
        "storage.path = {}\n\
         quote.tax_rate = {}\n\
         quote.duplicate_policy = {}\n\
         catalog.path = {catalog}\n\
         business.name = {}\n\
         llm.base_url = {}\n\
         llm.model = {}\n\
         llm.api_key = {api_key}\n\
         llm.timeout_secs = {}\n\
         logging.level = {}\n\
         logging.format = {}",
        config.storage.path.display(),
        config.quote.tax_rate,
        config.quote.duplicate_policy,
        config.business.name,
        config.llm.base_url,
        config.llm.model,
        config.llm.timeout_secs,
        config.logging.level,
        config.logging.format.as_str(),
    )
}
