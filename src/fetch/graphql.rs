//! SEOmatic GraphQL transport over HTTP

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};
use url::Url;

use super::MetadataFetch;
use crate::normalize::RawContainerBundle;
use crate::utils::constants::SEOMATIC_QUERY;
use crate::utils::{SeoError, SeoResult};

#[derive(Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<SeomaticData>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize)]
struct SeomaticData {
    #[serde(default)]
    seomatic: Option<RawContainerBundle>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

/// Queries the `seomatic` field of a Craft CMS GraphQL endpoint
#[derive(Clone)]
pub struct GraphQlFetcher {
    client: reqwest::Client,
    endpoint: Url,
    debug: bool,
}

impl GraphQlFetcher {
    /// Build a fetcher for `endpoint`
    ///
    /// `timeout` bounds each request end to end. With `debug` set, every
    /// received bundle is logged at info level.
    ///
    /// # Errors
    /// `SeoError::TransportUnavailable` when the endpoint is not a valid URL
    /// or the HTTP client cannot be built.
    pub fn new(endpoint: &str, timeout: Duration, debug: bool) -> SeoResult<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| {
            SeoError::TransportUnavailable(format!("invalid GraphQL endpoint '{endpoint}': {e}"))
        })?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SeoError::TransportUnavailable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            debug,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl MetadataFetch for GraphQlFetcher {
    async fn fetch(
        &self,
        content_id: &str,
        site_id: i64,
        auth_token: Option<&str>,
    ) -> SeoResult<Option<RawContainerBundle>> {
        debug!("Querying SEOmatic for uri '{}' on site {}", content_id, site_id);

        let mut request = self.client.post(self.endpoint.clone()).json(&json!({
            "query": SEOMATIC_QUERY,
            "variables": {
                "uri": content_id,
                "siteId": site_id,
            },
        }));

        if let Some(token) = auth_token.filter(|token| !token.is_empty()) {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SeoError::Transport(format!(
                "GraphQL endpoint {} returned HTTP {}",
                self.endpoint, status
            )));
        }

        let body: GraphQlResponse = response
            .json()
            .await
            .map_err(|e| SeoError::Transport(format!("invalid GraphQL response: {e}")))?;

        let errors = body.errors.unwrap_or_default();
        let bundle = body.data.and_then(|data| data.seomatic);

        if !errors.is_empty() {
            let messages = errors
                .into_iter()
                .map(|error| error.message)
                .collect::<Vec<_>>()
                .join("; ");

            if bundle.is_none() {
                return Err(SeoError::Transport(format!("GraphQL errors: {messages}")));
            }
            warn!("GraphQL query for '{}' returned partial errors: {}", content_id, messages);
        }

        if self.debug {
            info!("Received GraphQL result for '{}': {:?}", content_id, bundle);
        }

        Ok(bundle)
    }
}
