use anyhow::Result;
use tracing::debug;

use crate::llm::LlmClient;

/// Asks for popular catering packages matching the current selections.
/// The summary comes from `quotecraft_core::views::summary_text`; the reply
/// is a comma-separated list of package names.
pub struct PackageSuggester<C> {
    llm: C,
}

impl<C: LlmClient> PackageSuggester<C> {
    pub fn new(llm: C) -> Self {
        Self { llm }
    }

    pub async fn suggest(&self, meal_summary: &str) -> Result<Vec<String>> {
        let prompt = format!(
            "You are a catering expert. Based on the following meal selections, \
             suggest popular packages.\n\n\
             Meal Selections:\n{meal_summary}\n\n\
             Suggested Packages (comma-separated):"
        );

        let raw = self.llm.complete(&prompt).await?;
        let packages = parse_packages(&raw);
        debug!(count = packages.len(), "package suggestions parsed");
        Ok(packages)
    }
}

/// Splits the model reply on commas, trims, and drops empty segments.
pub fn parse_packages(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|name| !name.is_empty()).map(str::to_string).collect()
}
