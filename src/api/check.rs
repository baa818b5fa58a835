use async_trait::async_trait;
use tracing::debug;

use crate::api::{parse_check_response, CheckRequest};
use crate::core::check::{CheckError, GrammarService, Suggestion};

/// Submit `text` for checking and return the parsed suggestions.
///
/// Any non-success status is a failure regardless of the body. Uses the
/// client's default timeout and never retries.
pub async fn check_text(
    client: &reqwest::Client,
    api_url: &str,
    language: &str,
    text: &str,
) -> Result<Vec<Suggestion>, CheckError> {
    debug!(api_url, language, "sending check request");
    let response = client
        .post(api_url)
        .form(&CheckRequest { text, language })
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(CheckError::Status { status, body });
    }

    let body = response.text().await?;
    let suggestions = parse_check_response(&body)?;
    debug!(count = suggestions.len(), "check response parsed");
    Ok(suggestions)
}

/// [`GrammarService`] backed by a LanguageTool-compatible HTTP endpoint.
#[derive(Clone, Debug)]
pub struct LanguageToolClient {
    client: reqwest::Client,
    api_url: String,
    language: String,
}

impl LanguageToolClient {
    pub fn new(api_url: impl Into<String>, language: impl Into<String>) -> Result<Self, CheckError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("gramcheck/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, api_url, language))
    }

    pub fn with_client(
        client: reqwest::Client,
        api_url: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            language: language.into(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

#[async_trait]
impl GrammarService for LanguageToolClient {
    async fn check(&self, text: &str) -> Result<Vec<Suggestion>, CheckError> {
        check_text(&self.client, &self.api_url, &self.language, text).await
    }
}
