//! Contentstack gateway.
//!
//! Edits go through the Content Management API (`/v3/content_types/{ct}/entries`),
//! the published preview reads the Content Delivery API.

use super::content::ContentGateway;
use crate::error::{GatewayError, GatewayResult};
use async_trait::async_trait;
use blockpage_model::{Entry, EntryList, EntryPatch};
use blockpage_types::EntryUid;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Contentstack data region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    #[default]
    Us,
    Eu,
    AzureNa,
}

impl Region {
    /// Maps a region name; anything unrecognized falls back to `Us`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "eu" => Region::Eu,
            "azure-na" => Region::AzureNa,
            _ => Region::Us,
        }
    }

    /// Management API base URL.
    pub fn api_base_url(self) -> &'static str {
        match self {
            Region::Us => "https://api.contentstack.io",
            Region::Eu => "https://eu-api.contentstack.com",
            Region::AzureNa => "https://azure-na-api.contentstack.com",
        }
    }

    /// Delivery API base URL.
    pub fn cdn_base_url(self) -> &'static str {
        match self {
            Region::Us => "https://cdn.contentstack.io",
            Region::Eu => "https://eu-cdn.contentstack.com",
            Region::AzureNa => "https://azure-na-cdn.contentstack.com",
        }
    }
}

/// Contentstack specific configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentstackConfig {
    /// Stack API key.
    pub api_key: String,
    /// Management token, required for reading and updating entries.
    pub management_token: String,
    /// Delivery token, only needed for the published preview.
    pub delivery_token: String,
    /// Publishing environment the delivery API reads from.
    pub environment: String,
    pub region: Region,
    /// Stack branch; empty means the stack default.
    pub branch: String,
    /// Locale for delivery reads.
    pub language: String,
    /// Overrides the region's management API URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
    /// Overrides the region's delivery API URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cdn_base_url: Option<String>,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for ContentstackConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            management_token: String::new(),
            delivery_token: String::new(),
            environment: "development".to_string(),
            region: Region::Us,
            branch: "main".to_string(),
            language: "en-us".to_string(),
            api_base_url: None,
            cdn_base_url: None,
            timeout_secs: 60,
        }
    }
}

impl ContentstackConfig {
    /// Reads `CONTENTSTACK_*` environment variables over the defaults.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            api_key: var("CONTENTSTACK_API_KEY").unwrap_or_default(),
            management_token: var("CONTENTSTACK_MANAGEMENT_TOKEN").unwrap_or_default(),
            delivery_token: var("CONTENTSTACK_DELIVERY_TOKEN").unwrap_or_default(),
            environment: var("CONTENTSTACK_ENVIRONMENT").unwrap_or(defaults.environment),
            region: var("CONTENTSTACK_REGION")
                .map(|r| Region::from_name(&r))
                .unwrap_or(defaults.region),
            branch: var("CONTENTSTACK_BRANCH").unwrap_or(defaults.branch),
            language: var("CONTENTSTACK_LANGUAGE").unwrap_or(defaults.language),
            api_base_url: var("CONTENTSTACK_API_BASE_URL"),
            cdn_base_url: var("CONTENTSTACK_CDN_BASE_URL"),
            timeout_secs: defaults.timeout_secs,
        }
    }

    fn api_base(&self) -> &str {
        self.api_base_url
            .as_deref()
            .unwrap_or_else(|| self.region.api_base_url())
            .trim_end_matches('/')
    }

    fn cdn_base(&self) -> &str {
        self.cdn_base_url
            .as_deref()
            .unwrap_or_else(|| self.region.cdn_base_url())
            .trim_end_matches('/')
    }
}

/// Response to an entry listing.
#[derive(Debug, Deserialize)]
struct EntriesResponse {
    #[serde(default)]
    entries: Vec<Entry>,
}

/// Response to a single-entry fetch or update.
#[derive(Debug, Deserialize)]
struct EntryResponse {
    entry: Entry,
}

#[derive(Debug, Serialize)]
struct EntryBody<'a> {
    entry: &'a Entry,
}

/// Contentstack gateway implementation.
pub struct ContentstackGateway {
    config: ContentstackConfig,
    client: Client,
}

impl ContentstackGateway {
    /// Creates a gateway. Fails if the API key or management token is missing.
    pub fn new(config: ContentstackConfig) -> GatewayResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(GatewayError::Config("missing Contentstack API key".to_string()));
        }
        if config.management_token.trim().is_empty() {
            return Err(GatewayError::Config(
                "missing Contentstack management token".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// The configuration this gateway was built with.
    pub fn config(&self) -> &ContentstackConfig {
        &self.config
    }

    fn entries_url(base: &str, content_type: &str) -> String {
        format!(
            "{}/v3/content_types/{}/entries",
            base,
            urlencoding::encode(content_type)
        )
    }

    fn entry_url(&self, content_type: &str, uid: &EntryUid) -> String {
        format!(
            "{}/{}",
            Self::entries_url(self.config.api_base(), content_type),
            urlencoding::encode(uid.as_str())
        )
    }

    /// Builds a management API request with auth headers.
    fn management(&self, method: Method, url: String) -> RequestBuilder {
        let mut request = self
            .client
            .request(method, url)
            .header("api_key", &self.config.api_key)
            .header("authorization", &self.config.management_token);
        if !self.config.branch.is_empty() {
            request = request.header("branch", &self.config.branch);
        }
        request
    }

    async fn fetch_entry(&self, content_type: &str, uid: &EntryUid) -> GatewayResult<Entry> {
        let response = self
            .management(Method::GET, self.entry_url(content_type, uid))
            .send()
            .await
            .map_err(|e| GatewayError::Network(format!("entry fetch failed: {e}")))?;

        let body: EntryResponse = check(response, "entry fetch")
            .await?
            .json()
            .await
            .map_err(|e| GatewayError::Network(format!("failed to parse entry: {e}")))?;

        Ok(body.entry)
    }

    async fn put_entry(&self, content_type: &str, entry: &Entry) -> GatewayResult<Entry> {
        let response = self
            .management(Method::PUT, self.entry_url(content_type, &entry.uid))
            .json(&EntryBody { entry })
            .send()
            .await
            .map_err(|e| GatewayError::Network(format!("entry update failed: {e}")))?;

        let body: EntryResponse = check(response, "entry update")
            .await?
            .json()
            .await
            .map_err(|e| GatewayError::Network(format!("failed to parse updated entry: {e}")))?;

        Ok(body.entry)
    }

    /// Lists published entries through the delivery API.
    pub async fn fetch_published(&self, content_type: &str) -> GatewayResult<EntryList> {
        if self.config.delivery_token.trim().is_empty() {
            return Err(GatewayError::Config(
                "missing Contentstack delivery token".to_string(),
            ));
        }

        debug!("Fetching published entries for {}", content_type);

        let mut request = self
            .client
            .get(Self::entries_url(self.config.cdn_base(), content_type))
            .header("api_key", &self.config.api_key)
            .header("access_token", &self.config.delivery_token)
            .query(&[
                ("environment", self.config.environment.as_str()),
                ("locale", self.config.language.as_str()),
            ]);
        if !self.config.branch.is_empty() {
            request = request.header("branch", &self.config.branch);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::Network(format!("published fetch failed: {e}")))?;

        let body: EntriesResponse = check(response, "published fetch")
            .await?
            .json()
            .await
            .map_err(|e| GatewayError::Network(format!("failed to parse published entries: {e}")))?;

        Ok(EntryList::new(body.entries))
    }
}

/// Maps non-success statuses to gateway errors.
async fn check(response: Response, what: &str) -> GatewayResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    if status.as_u16() == 404 {
        return Err(GatewayError::NotFound(format!("{what}: {message}")));
    }
    Err(GatewayError::Api {
        status: status.as_u16(),
        message: format!("{what} failed: {message}"),
    })
}

#[async_trait]
impl ContentGateway for ContentstackGateway {
    fn provider_name(&self) -> &'static str {
        "Contentstack"
    }

    async fn fetch_entries(&self, content_type: &str) -> GatewayResult<EntryList> {
        debug!("Fetching entries for {}", content_type);

        let response = self
            .management(
                Method::GET,
                Self::entries_url(self.config.api_base(), content_type),
            )
            .send()
            .await
            .map_err(|e| GatewayError::Network(format!("entry list failed: {e}")))?;

        let body: EntriesResponse = check(response, "entry list")
            .await?
            .json()
            .await
            .map_err(|e| GatewayError::Network(format!("failed to parse entry list: {e}")))?;

        Ok(EntryList::new(body.entries))
    }

    async fn update_entry(
        &self,
        content_type: &str,
        uid: &EntryUid,
        patch: EntryPatch,
    ) -> GatewayResult<Entry> {
        let mut entry = self.fetch_entry(content_type, uid).await?;
        let block_count = patch.blocks.len();
        entry.apply(patch);
        let updated = self.put_entry(content_type, &entry).await?;

        info!("Updated entry {} ({} blocks)", uid, block_count);
        Ok(updated)
    }
}
