//! Metadata fetch collaborators
//!
//! [`MetadataFetch`] is the seam between head resolution and whatever
//! transport talks to the CMS. [`GraphQlFetcher`] is the SEOmatic GraphQL
//! implementation.

mod graphql;

pub use graphql::GraphQlFetcher;

use async_trait::async_trait;

use crate::normalize::RawContainerBundle;
use crate::utils::SeoResult;

/// Fetches the raw SEOmatic containers for one content identifier
///
/// `Ok(None)` means the source answered but had no bundle for the
/// identifier. Transport failures are reported as `SeoError::Transport`.
#[async_trait]
pub trait MetadataFetch: Send + Sync {
    async fn fetch(
        &self,
        content_id: &str,
        site_id: i64,
        auth_token: Option<&str>,
    ) -> SeoResult<Option<RawContainerBundle>>;
}
