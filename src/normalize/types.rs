//! Bundle and head descriptor types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::constants::{DISABLED_SANITIZERS, LD_JSON_TYPE};

/// Attribute record for a single `<meta>` or `<link>` tag
///
/// Attribute names are open-ended (`name`, `content`, `property`, `rel`,
/// `href`, `hreflang`, ...) so the record keeps them as a JSON object in
/// payload order.
pub type TagRecord = Map<String, Value>;

/// Containers as returned by the SEOmatic GraphQL field
///
/// Every container is a JSON-encoded string, or null when SEOmatic has
/// nothing for it. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContainerBundle {
    #[serde(default)]
    pub meta_title_container: Option<String>,
    #[serde(default)]
    pub meta_tag_container: Option<String>,
    #[serde(default)]
    pub meta_link_container: Option<String>,
    #[serde(default)]
    pub meta_script_container: Option<String>,
    #[serde(default)]
    pub meta_json_ld_container: Option<String>,
    /// GraphQL type discriminator, never decoded
    #[serde(rename = "__typename", default, skip_serializing_if = "Option::is_none")]
    pub typename: Option<String>,
}

/// A `<script>` entry: inline body or external source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptTag {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub script_type: Option<String>,
    #[serde(rename = "innerHTML", default, skip_serializing_if = "Option::is_none")]
    pub inner_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

impl ScriptTag {
    pub fn inline(body: impl Into<String>) -> Self {
        Self {
            script_type: None,
            inner_html: Some(body.into()),
            src: None,
        }
    }

    pub fn external(src: impl Into<String>) -> Self {
        Self {
            script_type: None,
            inner_html: None,
            src: Some(src.into()),
        }
    }

    /// Structured-data block serialized as `application/ld+json`
    pub fn json_ld(body: impl Into<String>) -> Self {
        Self {
            script_type: Some(LD_JSON_TYPE.to_string()),
            inner_html: Some(body.into()),
            src: None,
        }
    }
}

/// Normalized, render-ready page head
///
/// `meta` and `link` are `None` when their container was null, which is
/// distinct from `Some(vec![])`. `script` is always present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Vec<TagRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Vec<TagRecord>>,
    #[serde(default)]
    pub script: Vec<ScriptTag>,
}

impl HeadDescriptor {
    /// Wrap for vue-meta / Nuxt `head()`, keeping inline scripts unescaped
    pub fn into_nuxt_head(self) -> NuxtHead {
        NuxtHead {
            head: self,
            dangerously_disable_sanitizers: DISABLED_SANITIZERS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

/// Head descriptor plus the sanitizer opt-out Nuxt's head manager expects
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NuxtHead {
    #[serde(flatten)]
    pub head: HeadDescriptor,
    #[serde(rename = "__dangerouslyDisableSanitizers")]
    pub dangerously_disable_sanitizers: Vec<String>,
}
