//! Shared constants for SEOmatic container handling
//!
//! Container names match the field names of the SEOmatic GraphQL type.

pub const META_TITLE_CONTAINER: &str = "metaTitleContainer";
pub const META_TAG_CONTAINER: &str = "metaTagContainer";
pub const META_LINK_CONTAINER: &str = "metaLinkContainer";
pub const META_SCRIPT_CONTAINER: &str = "metaScriptContainer";
pub const META_JSON_LD_CONTAINER: &str = "metaJsonLdContainer";

/// Script type attached to structured-data blocks
pub const LD_JSON_TYPE: &str = "application/ld+json";

/// Site id queried when the caller does not name one
pub const DEFAULT_SITE_ID: i64 = 1;

/// Per-request timeout for the GraphQL transport (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Head manager sanitizers to disable so inline scripts are emitted verbatim
pub const DISABLED_SANITIZERS: &[&str] = &["script"];

/// SEOmatic query, requesting every container in array form
pub const SEOMATIC_QUERY: &str = r#"
query ($uri: String, $siteId: Int) {
  seomatic(uri: $uri, siteId: $siteId, asArray: true) {
    metaTitleContainer
    metaTagContainer
    metaScriptContainer
    metaLinkContainer
    metaJsonLdContainer
    ... on SeomaticType {
      metaTitleContainer
      metaJsonLdContainer
      metaLinkContainer
      metaScriptContainer
      metaTagContainer
    }
  }
}
"#;
