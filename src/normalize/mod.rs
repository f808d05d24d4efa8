//! Container normalization
//!
//! Converts the raw SEOmatic containers into a flat [`HeadDescriptor`].
//!
//! # Policy
//! - Every container is decoded before anything is extracted, so a single
//!   undecodable container fails the whole call.
//! - A null container means "absent": `meta`/`link` keys are omitted, the
//!   script and JSON-LD sequences contribute nothing.
//! - Group and record order follow payload insertion order.

mod types;

pub use types::{HeadDescriptor, NuxtHead, RawContainerBundle, ScriptTag, TagRecord};

use serde::Deserialize;
use serde_json::Value;

use crate::utils::constants::{
    META_JSON_LD_CONTAINER, META_LINK_CONTAINER, META_SCRIPT_CONTAINER, META_TAG_CONTAINER,
    META_TITLE_CONTAINER,
};
use crate::utils::{SeoError, SeoResult};

#[derive(Deserialize)]
struct TitleContainer {
    title: TitleRecord,
}

#[derive(Deserialize)]
struct TitleRecord {
    #[serde(default)]
    title: Option<String>,
}

#[derive(Deserialize)]
struct ScriptEntry {
    #[serde(default)]
    script: Option<String>,
    #[serde(default)]
    src: Option<String>,
}

/// Containers after JSON decoding; `Value::Null` marks an absent container
struct DecodedContainers {
    title: Value,
    tags: Value,
    links: Value,
    scripts: Value,
    json_ld: Value,
}

impl DecodedContainers {
    fn decode(bundle: &RawContainerBundle) -> SeoResult<Self> {
        Ok(Self {
            title: decode(META_TITLE_CONTAINER, bundle.meta_title_container.as_deref())?,
            tags: decode(META_TAG_CONTAINER, bundle.meta_tag_container.as_deref())?,
            links: decode(META_LINK_CONTAINER, bundle.meta_link_container.as_deref())?,
            scripts: decode(META_SCRIPT_CONTAINER, bundle.meta_script_container.as_deref())?,
            json_ld: decode(META_JSON_LD_CONTAINER, bundle.meta_json_ld_container.as_deref())?,
        })
    }
}

/// Normalize a fetched bundle into a head descriptor
///
/// # Errors
/// - [`SeoError::MissingData`] when `bundle` is `None`
/// - [`SeoError::MalformedContainer`] when any present container is not
///   valid JSON or does not have the expected shape
pub fn normalize(bundle: Option<&RawContainerBundle>) -> SeoResult<HeadDescriptor> {
    let bundle = bundle.ok_or(SeoError::MissingData)?;
    let decoded = DecodedContainers::decode(bundle)?;

    let title = extract_title(decoded.title)?;
    let meta = flatten_tags(META_TAG_CONTAINER, decoded.tags)?;
    let link = flatten_tags(META_LINK_CONTAINER, decoded.links)?;

    let mut script = script_tags(decoded.scripts)?;
    script.extend(json_ld_tags(decoded.json_ld)?);

    Ok(HeadDescriptor {
        title,
        meta,
        link,
        script,
    })
}

fn decode(container: &'static str, raw: Option<&str>) -> SeoResult<Value> {
    match raw {
        None => Ok(Value::Null),
        Some(text) => serde_json::from_str(text)
            .map_err(|e| SeoError::malformed(container, format!("invalid JSON: {e}"))),
    }
}

fn extract_title(value: Value) -> SeoResult<Option<String>> {
    if value.is_null() {
        return Ok(None);
    }

    let container: TitleContainer = serde_json::from_value(value)
        .map_err(|e| SeoError::malformed(META_TITLE_CONTAINER, format!("expected title.title: {e}")))?;

    Ok(container.title.title.filter(|title| !title.is_empty()))
}

/// Entries of a keyed object (insertion order) or of a sequence
fn entries(container: &'static str, value: Value) -> SeoResult<Vec<Value>> {
    match value {
        Value::Object(map) => Ok(map.into_iter().map(|(_, entry)| entry).collect()),
        Value::Array(items) => Ok(items),
        other => Err(SeoError::malformed(
            container,
            format!("expected an object or array, found {}", kind(&other)),
        )),
    }
}

fn flatten_tags(container: &'static str, value: Value) -> SeoResult<Option<Vec<TagRecord>>> {
    if value.is_null() {
        return Ok(None);
    }

    let mut tags = Vec::new();
    for group in entries(container, value)? {
        match group {
            Value::Array(records) => {
                for record in records {
                    tags.push(tag_record(container, record)?);
                }
            }
            Value::Object(record) => tags.push(record),
            other => {
                return Err(SeoError::malformed(
                    container,
                    format!("expected a tag group, found {}", kind(&other)),
                ));
            }
        }
    }

    Ok(Some(tags))
}

fn tag_record(container: &'static str, value: Value) -> SeoResult<TagRecord> {
    match value {
        Value::Object(record) => Ok(record),
        other => Err(SeoError::malformed(
            container,
            format!("expected a tag record, found {}", kind(&other)),
        )),
    }
}

fn script_tags(value: Value) -> SeoResult<Vec<ScriptTag>> {
    if value.is_null() {
        return Ok(Vec::new());
    }

    entries(META_SCRIPT_CONTAINER, value)?
        .into_iter()
        .map(script_tag)
        .collect()
}

fn script_tag(entry: Value) -> SeoResult<ScriptTag> {
    let entry: ScriptEntry = serde_json::from_value(entry).map_err(|e| {
        SeoError::malformed(META_SCRIPT_CONTAINER, format!("invalid script entry: {e}"))
    })?;

    match (entry.script, entry.src) {
        (Some(body), _) => Ok(ScriptTag::inline(body)),
        (None, Some(src)) => Ok(ScriptTag::external(src)),
        (None, None) => Err(SeoError::malformed(
            META_SCRIPT_CONTAINER,
            "script entry has neither `script` nor `src`",
        )),
    }
}

fn json_ld_tags(value: Value) -> SeoResult<Vec<ScriptTag>> {
    if value.is_null() {
        return Ok(Vec::new());
    }

    entries(META_JSON_LD_CONTAINER, value)?
        .into_iter()
        .map(|mut entry| {
            integral_floats_as_integers(&mut entry);
            serde_json::to_string(&entry)
                .map(ScriptTag::json_ld)
                .map_err(|e| SeoError::malformed(META_JSON_LD_CONTAINER, e.to_string()))
        })
        .collect()
}

/// Integers up to 2^53 print identically as `f64` and `i64`
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Rewrite floats with no fractional part (`4.0`, `1e3`) as integers
///
/// Structured-data bodies then match what `JSON.stringify` emits for the
/// same document, which never prints a trailing `.0`.
fn integral_floats_as_integers(value: &mut Value) {
    match value {
        Value::Number(number) => {
            if let Some(float) = number.as_f64().filter(|_| number.is_f64()) {
                if float.fract() == 0.0 && float.abs() <= MAX_SAFE_INTEGER {
                    *number = (float as i64).into();
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(integral_floats_as_integers),
        Value::Object(map) => map.values_mut().for_each(integral_floats_as_integers),
        _ => {}
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle() -> RawContainerBundle {
        RawContainerBundle::default()
    }

    #[test]
    fn all_null_containers_yield_only_script() {
        let head = normalize(Some(&bundle())).unwrap();
        assert_eq!(serde_json::to_string(&head).unwrap(), r#"{"script":[]}"#);
    }

    #[test]
    fn missing_bundle_is_an_error() {
        assert!(matches!(normalize(None), Err(SeoError::MissingData)));
    }

    #[test]
    fn empty_title_is_omitted() {
        let raw = RawContainerBundle {
            meta_title_container: Some(r#"{"title":{"title":""}}"#.into()),
            ..bundle()
        };
        assert_eq!(normalize(Some(&raw)).unwrap().title, None);
    }

    #[test]
    fn title_without_inner_record_is_malformed() {
        let raw = RawContainerBundle {
            meta_title_container: Some(r#"{"heading":"About"}"#.into()),
            ..bundle()
        };
        let err = normalize(Some(&raw)).unwrap_err();
        assert_eq!(err.container(), Some(META_TITLE_CONTAINER));
    }

    #[test]
    fn null_inner_title_is_absent() {
        let raw = RawContainerBundle {
            meta_title_container: Some(r#"{"title":{"title":null}}"#.into()),
            ..bundle()
        };
        assert_eq!(normalize(Some(&raw)).unwrap().title, None);
    }

    #[test]
    fn typename_is_never_decoded() {
        let raw = RawContainerBundle {
            typename: Some("SeomaticType".into()),
            ..bundle()
        };
        assert!(normalize(Some(&raw)).is_ok());
    }

    #[test]
    fn single_record_groups_are_appended() {
        let raw = RawContainerBundle {
            meta_tag_container: Some(
                r#"{"generator":{"name":"generator","content":"SEOmatic"},"og:locale:alternate":[]}"#
                    .into(),
            ),
            ..bundle()
        };
        let meta = normalize(Some(&raw)).unwrap().meta.unwrap();
        assert_eq!(meta.len(), 1);
        assert_eq!(meta[0]["content"], "SEOmatic");
    }

    #[test]
    fn scalar_tag_group_is_malformed() {
        let raw = RawContainerBundle {
            meta_link_container: Some(r#"{"canonical":"https://example.com"}"#.into()),
            ..bundle()
        };
        let err = normalize(Some(&raw)).unwrap_err();
        assert_eq!(err.container(), Some(META_LINK_CONTAINER));
    }

    #[test]
    fn script_entry_without_body_or_src_is_malformed() {
        let raw = RawContainerBundle {
            meta_script_container: Some(r#"{"gtag":{"position":1}}"#.into()),
            ..bundle()
        };
        let err = normalize(Some(&raw)).unwrap_err();
        assert_eq!(err.container(), Some(META_SCRIPT_CONTAINER));
    }
}
