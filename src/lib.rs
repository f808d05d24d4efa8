//! SEOmatic head metadata for server-rendered sites
//!
//! Resolves which CMS entry a rendered route takes its metadata from, fetches
//! the SEOmatic containers for it and normalizes them into a single
//! [`HeadDescriptor`] (title, meta, link and script tags).

mod client;
pub mod fetch;
pub mod normalize;
pub mod route;
mod utils;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use client::SeoHeadClient;
pub use fetch::{GraphQlFetcher, MetadataFetch};
pub use normalize::{HeadDescriptor, NuxtHead, RawContainerBundle, ScriptTag, TagRecord, normalize};
pub use route::{RemapRule, RouteResolver, resolve};
pub use utils::constants;
pub use utils::{SeoError, SeoResult};

/// Configuration supplied by the surrounding application
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoConfig {
    /// Render paths whose metadata is read from another entry
    #[serde(default)]
    pub route_remap: Vec<RemapRule>,

    /// Log remaps and received results at info level
    #[serde(default)]
    pub debug: bool,

    /// Sent as a bearer token when set
    #[serde(default)]
    pub graphql_token: Option<String>,

    /// Craft CMS GraphQL endpoint, e.g. `https://cms.example.com/api`
    #[serde(default)]
    pub graphql_endpoint: Option<String>,

    #[serde(default = "default_site_id")]
    pub site_id: i64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_site_id() -> i64 {
    constants::DEFAULT_SITE_ID
}

fn default_request_timeout_secs() -> u64 {
    constants::DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for SeoConfig {
    fn default() -> Self {
        Self {
            route_remap: Vec::new(),
            debug: false,
            graphql_token: None,
            graphql_endpoint: None,
            site_id: default_site_id(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Load config from a YAML file, falling back to defaults when it is absent
pub fn load_yaml_config(path: impl AsRef<Path>) -> anyhow::Result<SeoConfig> {
    let config_path = path.as_ref();

    if config_path.exists() {
        let contents = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config: SeoConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("Invalid config in {}", config_path.display()))?;
        Ok(config)
    } else {
        Ok(SeoConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_config_uses_defaults_for_missing_fields() {
        let config: SeoConfig = serde_yaml::from_str(
            "routeRemap:\n  - path: /\n    getFrom: homepage\ndebug: true\n",
        )
        .unwrap();

        assert_eq!(config.route_remap, vec![RemapRule::new("/", "homepage")]);
        assert!(config.debug);
        assert_eq!(config.site_id, 1);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.graphql_token.is_none());
    }

    fn write_temp_config(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}-{name}", env!("CARGO_PKG_NAME"), std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn yaml_config_file_is_loaded() {
        let path = write_temp_config(
            "valid.yaml",
            "graphqlEndpoint: https://cms.example.com/api\n\
             graphqlToken: secret\n\
             siteId: 2\n\
             requestTimeoutSecs: 5\n\
             routeRemap:\n  - path: /\n    getFrom: homepage\n  - path: /about\n    getFrom: about-page\n",
        );

        let config = load_yaml_config(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.graphql_endpoint.as_deref(), Some("https://cms.example.com/api"));
        assert_eq!(config.graphql_token.as_deref(), Some("secret"));
        assert_eq!(config.site_id, 2);
        assert_eq!(config.request_timeout_secs, 5);
        assert!(!config.debug);
        assert_eq!(
            config.route_remap,
            vec![RemapRule::new("/", "homepage"), RemapRule::new("/about", "about-page")]
        );
    }

    #[test]
    fn invalid_yaml_config_is_an_error() {
        let path = write_temp_config("invalid.yaml", "siteId: [not, a, number\n");

        let err = load_yaml_config(&path).unwrap_err();
        fs::remove_file(&path).unwrap();

        assert!(err.to_string().starts_with("Invalid config in"), "{err}");
    }

    #[test]
    fn missing_config_file_yields_defaults() {
        let config = load_yaml_config("/nonexistent/seomatic.yaml").unwrap();
        assert!(config.route_remap.is_empty());
        assert_eq!(config.site_id, constants::DEFAULT_SITE_ID);
    }
}
