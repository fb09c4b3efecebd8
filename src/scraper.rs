use std::fmt;
use std::time::{Duration, Instant};

use reqwest::{Client, ClientBuilder};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::{Config, mask_secret};
use crate::error::{AppError, Result};

/// Static sample document served in mock mode, whatever profile was asked for.
pub const MOCK_PROFILE_URL: &str = "https://gist.githubusercontent.com/Sashreek007/59baa143843298c7d7f26a35afd85949/raw/64d6300fa724585ca514938de25f466f6f27bb6a/eden-marcho-scrapin.json";
pub const ENRICHMENT_ENDPOINT: &str = "https://api.scrapin.io/enrichment/profile";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Whatever the provider returned under `"person"`. No schema is enforced.
pub type ProfileRecord = Value;

/// How a profile is retrieved.
#[derive(Clone, PartialEq, Eq)]
pub enum FetchStrategy {
    /// Read the fixed sample document.
    Mock,
    /// Ask the enrichment endpoint for the requested profile.
    Live { api_key: String },
}

impl FetchStrategy {
    /// Resolves the mode flag into a strategy. Live mode without a key fails
    /// here, before anything touches the network.
    pub fn resolve(mock: bool, api_key: Option<&str>) -> Result<Self> {
        if mock {
            return Ok(FetchStrategy::Mock);
        }

        api_key
            .map(|key| FetchStrategy::Live {
                api_key: key.to_string(),
            })
            .ok_or_else(|| {
                AppError::ConfigError(
                    "SCRAPIN_API_KEY must be set to fetch live profiles".to_string(),
                )
            })
    }
}

impl fmt::Debug for FetchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchStrategy::Mock => f.write_str("Mock"),
            FetchStrategy::Live { api_key } => f
                .debug_struct("Live")
                .field("api_key", &mask_secret(api_key))
                .finish(),
        }
    }
}

#[derive(Clone)]
pub struct ProfileFetcher {
    client: Client,
    scrapin_api_key: Option<String>,
    mock_url: String,
    enrichment_endpoint: String,
}

impl ProfileFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_endpoints(config, MOCK_PROFILE_URL, ENRICHMENT_ENDPOINT)
    }

    /// Same as [`ProfileFetcher::new`] but against other endpoints, e.g. a
    /// local mock server.
    pub fn with_endpoints(
        config: &Config,
        mock_url: &str,
        enrichment_endpoint: &str,
    ) -> Result<Self> {
        let client = ClientBuilder::new().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            scrapin_api_key: config.scrapin_api_key.clone(),
            mock_url: mock_url.to_string(),
            enrichment_endpoint: enrichment_endpoint.to_string(),
        })
    }

    /// Fetches the profile behind `profile_url`, or the sample document when
    /// `mock` is set. Returns `None` when the response has no `"person"`.
    pub async fn fetch(&self, profile_url: &str, mock: bool) -> Result<Option<ProfileRecord>> {
        let strategy = FetchStrategy::resolve(mock, self.scrapin_api_key.as_deref())?;
        self.fetch_with(profile_url, &strategy).await
    }

    pub async fn fetch_with(
        &self,
        profile_url: &str,
        strategy: &FetchStrategy,
    ) -> Result<Option<ProfileRecord>> {
        let request = match strategy {
            FetchStrategy::Mock => {
                info!(
                    requested = profile_url,
                    url = %self.mock_url,
                    "Fetching sample profile document"
                );
                self.client.get(&self.mock_url)
            }
            FetchStrategy::Live { api_key } => {
                info!(profile_url, "Fetching profile from enrichment endpoint");
                self.client
                    .get(&self.enrichment_endpoint)
                    .query(&[("apikey", api_key.as_str()), ("linkedInUrl", profile_url)])
            }
        };

        let started = Instant::now();
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Profile source returned a non-success status");
        }

        let body = response.text().await?;
        debug!(elapsed = ?started.elapsed(), bytes = body.len(), "Profile response received");

        extract_person(&body)
    }
}

/// Pulls the `"person"` value out of a provider response body.
pub fn extract_person(body: &str) -> Result<Option<ProfileRecord>> {
    let document: Value = serde_json::from_str(body).map_err(|e| {
        AppError::ResponseFormatError(format!("response body is not valid JSON: {e}"))
    })?;

    let Value::Object(mut fields) = document else {
        return Err(AppError::ResponseFormatError(
            "expected a JSON object at the top level".to_string(),
        ));
    };

    match fields.remove("person") {
        Some(Value::Null) | None => {
            warn!("Response did not contain a person record");
            Ok(None)
        }
        Some(person) => Ok(Some(person)),
    }
}
