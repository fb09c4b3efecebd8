use std::collections::HashMap;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::llm::LlmClient;
use crate::prompt::PromptTemplate;
use crate::scraper::ProfileRecord;

pub const SUMMARY_TEMPLATE: &str = "
    given the Linkedin information {information}  about a person from I want you to create:
    1. a short summary
    2. two interesting facts about them
    ";

/// Fills a prompt template with a profile record and asks the LLM for text.
#[derive(Clone)]
pub struct SummaryGenerator {
    template: PromptTemplate,
    llm: LlmClient,
}

impl SummaryGenerator {
    pub fn new(config: &Config) -> Result<Self> {
        let template = PromptTemplate::new(SUMMARY_TEMPLATE, &["information"])?;
        Ok(Self::with_template(template, LlmClient::new(config)?))
    }

    pub fn with_template(template: PromptTemplate, llm: LlmClient) -> Self {
        Self { template, llm }
    }

    pub fn model(&self) -> &str {
        self.llm.model()
    }

    /// Summarises a profile. An absent record is rendered as `null`.
    pub async fn generate(&self, information: Option<&ProfileRecord>) -> Result<String> {
        let variables = HashMap::from([("information", render_information(information)?)]);
        self.invoke(&variables).await
    }

    /// Formats the template with `variables` and returns the generated text.
    pub async fn invoke(&self, variables: &HashMap<&str, String>) -> Result<String> {
        let prompt = self.template.format(variables)?;
        self.llm.complete(&prompt).await
    }
}

pub fn render_information(information: Option<&ProfileRecord>) -> Result<String> {
    match information {
        Some(record) => serde_json::to_string_pretty(record).map_err(|e| {
            AppError::ResponseFormatError(format!("could not render profile record: {e}"))
        }),
        None => Ok("null".to_string()),
    }
}
