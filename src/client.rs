//! Head client: route resolution, fetch and normalization in one call
//!
//! # Architecture
//!
//! Holds immutable configuration and an `Arc<dyn MetadataFetch>`:
//! - No per-request state outlives a call, so a client can be shared
//!   freely across tasks
//! - The fetch is the only suspension point; resolution and normalization
//!   are synchronous
//! - Fetch failures propagate unchanged, no retries

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::SeoConfig;
use crate::fetch::{GraphQlFetcher, MetadataFetch};
use crate::normalize::{HeadDescriptor, normalize};
use crate::route::RouteResolver;
use crate::utils::{SeoError, SeoResult};

/// Resolves SEOmatic head descriptors for rendered routes
#[derive(Clone)]
pub struct SeoHeadClient {
    config: SeoConfig,
    fetcher: Option<Arc<dyn MetadataFetch>>,
}

impl SeoHeadClient {
    /// Build a client from configuration
    ///
    /// The GraphQL transport is created when `graphql_endpoint` is set.
    /// Without one the client still builds, and every lookup fails with
    /// `SeoError::TransportUnavailable`.
    ///
    /// # Errors
    /// Returns `SeoError::TransportUnavailable` if the configured endpoint is
    /// invalid.
    pub fn from_config(config: SeoConfig) -> SeoResult<Self> {
        let fetcher = match config.graphql_endpoint.as_deref() {
            Some(endpoint) => {
                let fetcher = GraphQlFetcher::new(
                    endpoint,
                    Duration::from_secs(config.request_timeout_secs),
                    config.debug,
                )?;
                Some(Arc::new(fetcher) as Arc<dyn MetadataFetch>)
            }
            None => None,
        };

        Ok(Self { config, fetcher })
    }

    /// Build a client around a caller-supplied transport
    pub fn with_fetcher(config: SeoConfig, fetcher: Arc<dyn MetadataFetch>) -> Self {
        Self {
            config,
            fetcher: Some(fetcher),
        }
    }

    pub fn config(&self) -> &SeoConfig {
        &self.config
    }

    /// Content identifier queried for `render_path`
    pub fn resolve<'a>(&'a self, render_path: &'a str) -> &'a str {
        RouteResolver::new(&self.config.route_remap, self.config.debug).resolve(render_path)
    }

    /// Fetch and normalize the head descriptor for `render_path`
    ///
    /// `site_id` falls back to the configured site (default `1`).
    ///
    /// # Errors
    /// - `TransportUnavailable` when no transport is configured
    /// - `Transport` when the fetch fails
    /// - `MissingData` when the source returns no bundle
    /// - `MalformedContainer` when a container cannot be decoded
    pub async fn get_head_descriptor(
        &self,
        render_path: &str,
        site_id: Option<i64>,
    ) -> SeoResult<HeadDescriptor> {
        let fetcher = self.fetcher.as_ref().ok_or_else(|| {
            SeoError::TransportUnavailable(
                "no GraphQL endpoint configured; set `graphqlEndpoint` or supply a fetcher"
                    .to_string(),
            )
        })?;

        let site_id = site_id.unwrap_or(self.config.site_id);
        let content_id = self.resolve(render_path);
        debug!("Resolved '{}' to content id '{}' (site {})", render_path, content_id, site_id);

        let bundle = fetcher
            .fetch(content_id, site_id, self.config.graphql_token.as_deref())
            .await?;

        let head = normalize(bundle.as_ref())?;

        if self.config.debug {
            info!(
                "Head for '{}': title={:?}, {} meta, {} link, {} script",
                render_path,
                head.title,
                head.meta.as_ref().map_or(0, Vec::len),
                head.link.as_ref().map_or(0, Vec::len),
                head.script.len()
            );
        }

        Ok(head)
    }
}
