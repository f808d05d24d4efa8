//! Route remapping
//!
//! Decides which content identifier to query for a rendered path. A site
//! whose homepage renders at `/` can, for example, pull its metadata from the
//! CMS entry with the slug `homepage`.

use serde::{Deserialize, Serialize};
use tracing::info;

/// Static mapping from a render path to the identifier its metadata comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemapRule {
    /// Render path matched by exact equality
    pub path: String,
    /// Content identifier queried instead of `path`
    pub get_from: String,
}

impl RemapRule {
    pub fn new(path: impl Into<String>, get_from: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            get_from: get_from.into(),
        }
    }
}

/// First rule whose `path` equals `render_path`, if any
pub fn find_rule<'a>(render_path: &str, remap_table: &'a [RemapRule]) -> Option<&'a RemapRule> {
    remap_table.iter().find(|rule| rule.path == render_path)
}

/// Resolve the content identifier for `render_path`
///
/// Returns the `get_from` of the first matching rule, or `render_path`
/// unchanged when nothing matches.
pub fn resolve<'a>(render_path: &'a str, remap_table: &'a [RemapRule]) -> &'a str {
    find_rule(render_path, remap_table).map_or(render_path, |rule| rule.get_from.as_str())
}

/// Remap table paired with the diagnostic flag
#[derive(Debug, Clone, Copy)]
pub struct RouteResolver<'a> {
    remap_table: &'a [RemapRule],
    debug: bool,
}

impl<'a> RouteResolver<'a> {
    pub fn new(remap_table: &'a [RemapRule], debug: bool) -> Self {
        Self { remap_table, debug }
    }

    /// Resolve `render_path`, tracing the remap when debug is enabled
    pub fn resolve<'p>(&self, render_path: &'p str) -> &'p str
    where
        'a: 'p,
    {
        match find_rule(render_path, self.remap_table) {
            Some(rule) => {
                if self.debug {
                    info!(
                        "Getting metadata for '{}' from '{}'",
                        render_path, rule.get_from
                    );
                }
                rule.get_from.as_str()
            }
            None => render_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmatched_path_is_returned_unchanged() {
        let table = vec![RemapRule::new("/", "homepage")];
        assert_eq!(resolve("/blog/post", &table), "/blog/post");
        assert_eq!(resolve("/about", &[]), "/about");
    }

    #[test]
    fn first_matching_rule_wins() {
        let table = vec![
            RemapRule::new("/contact", "contact-us"),
            RemapRule::new("/", "homepage"),
            RemapRule::new("/", "landing"),
        ];
        assert_eq!(resolve("/", &table), "homepage");
        assert_eq!(RouteResolver::new(&table, true).resolve("/"), "homepage");
    }

    #[test]
    fn matching_is_exact() {
        let table = vec![RemapRule::new("/about", "about-page")];
        assert_eq!(resolve("/about/", &table), "/about/");
        assert_eq!(resolve("/About", &table), "/About");
    }

    #[test]
    fn remap_rule_reads_camel_case() {
        let rule: RemapRule =
            serde_json::from_str(r#"{"path": "/", "getFrom": "homepage"}"#).unwrap();
        assert_eq!(rule, RemapRule::new("/", "homepage"));
    }
}
