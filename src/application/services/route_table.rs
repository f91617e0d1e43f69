//! Short-code pattern matching and the static route table.
//!
//! Redirect records come in two flavours. Legacy short codes
//! (`/go.php?bid=42`) are answered at request time by the short-link filter.
//! Everything else becomes a static rewrite rule, assembled once from the
//! same records.

use regex::Regex;
use std::collections::HashMap;

use crate::domain::entities::{RedirectEntry, RedirectRecord, RouteRewrite};

/// Legacy short-link route.
pub const DEFAULT_SHORT_LINK_ROUTE: &str = "/go.php";
/// Query parameter carrying the legacy short code.
pub const DEFAULT_SHORT_LINK_PARAM: &str = "bid";

/// Matcher for short-code redirect sources of the form `<route>?<param>=<digits>`.
#[derive(Debug, Clone)]
pub struct ShortLinkPattern {
    route: String,
    param: String,
    regex: Regex,
}

impl ShortLinkPattern {
    /// Builds a pattern for the given route and query parameter.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting expression fails to compile.
    pub fn new(route: impl Into<String>, param: impl Into<String>) -> Result<Self, regex::Error> {
        let route = route.into();
        let param = param.into();
        let regex = Regex::new(&format!(
            r"^{}\?{}=(\d+)$",
            regex::escape(&route),
            regex::escape(&param)
        ))?;

        Ok(Self {
            route,
            param,
            regex,
        })
    }

    /// The literal path intercepted by the short-link filter.
    pub fn route(&self) -> &str {
        &self.route
    }

    /// The query parameter that carries the code.
    pub fn param(&self) -> &str {
        &self.param
    }

    /// Extracts the numeric code from a redirect source, if it is a short code.
    pub fn extract_code<'a>(&self, source: &'a str) -> Option<&'a str> {
        self.regex
            .captures(source.trim())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Converts a record into a cache entry if its source is a short code.
    pub fn to_entry(&self, record: &RedirectRecord) -> Option<RedirectEntry> {
        let code = self.extract_code(&record.source)?;
        if record.destination.trim().is_empty() {
            return None;
        }

        Some(RedirectEntry {
            code: code.to_string(),
            destination: record.destination.trim().to_string(),
            permanent: record.permanent,
        })
    }

    /// Short-code entries the filter will serve, one per code.
    ///
    /// A later record overrides an earlier one with the same code; codes keep
    /// the position of their first appearance.
    pub fn entries(&self, records: &[RedirectRecord]) -> Vec<RedirectEntry> {
        let mut entries: Vec<RedirectEntry> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for entry in records.iter().filter_map(|record| self.to_entry(record)) {
            match index.get(&entry.code) {
                Some(&i) => entries[i] = entry,
                None => {
                    index.insert(entry.code.clone(), entries.len());
                    entries.push(entry);
                }
            }
        }

        entries
    }
}

/// Static rewrite rules derived from redirect records.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    rules: Vec<RouteRewrite>,
}

impl RouteTable {
    /// Builds the route table.
    ///
    /// Short-code sources are excluded, query strings are stripped from the
    /// remaining sources, records with an empty source or destination are
    /// skipped. Store order is preserved.
    pub fn build(records: &[RedirectRecord], pattern: &ShortLinkPattern) -> Self {
        let rules = records
            .iter()
            .filter(|record| pattern.extract_code(&record.source).is_none())
            .filter_map(|record| {
                let source = strip_query(record.source.trim());
                let destination = record.destination.trim();

                if source.is_empty() || destination.is_empty() {
                    return None;
                }

                Some(RouteRewrite {
                    source: source.to_string(),
                    destination: destination.to_string(),
                    permanent: record.permanent,
                })
            })
            .collect();

        Self { rules }
    }

    pub fn rules(&self) -> &[RouteRewrite] {
        &self.rules
    }

    pub fn into_rules(self) -> Vec<RouteRewrite> {
        self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn strip_query(source: &str) -> &str {
    source.split_once('?').map_or(source, |(path, _)| path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_pattern() -> ShortLinkPattern {
        ShortLinkPattern::new(DEFAULT_SHORT_LINK_ROUTE, DEFAULT_SHORT_LINK_PARAM).unwrap()
    }

    #[test]
    fn test_extract_code() {
        let pattern = default_pattern();

        assert_eq!(pattern.extract_code("/go.php?bid=42"), Some("42"));
        assert_eq!(pattern.extract_code(" /go.php?bid=7 "), Some("7"));
        assert_eq!(pattern.extract_code("/go.php?bid=abc"), None);
        assert_eq!(pattern.extract_code("/go.php?bid="), None);
        assert_eq!(pattern.extract_code("/gozphp?bid=42"), None);
        assert_eq!(pattern.extract_code("/go.php?id=42"), None);
        assert_eq!(pattern.extract_code("/about"), None);
    }

    #[test]
    fn test_custom_pattern() {
        let pattern = ShortLinkPattern::new("/r", "c").unwrap();

        assert_eq!(pattern.route(), "/r");
        assert_eq!(pattern.param(), "c");
        assert_eq!(pattern.extract_code("/r?c=123"), Some("123"));
        assert_eq!(pattern.extract_code("/go.php?bid=123"), None);
    }

    #[test]
    fn test_to_entry() {
        let pattern = default_pattern();

        let entry = pattern
            .to_entry(&RedirectRecord::new("/go.php?bid=42", "/foo", true))
            .unwrap();
        assert_eq!(entry.code, "42");
        assert_eq!(entry.destination, "/foo");
        assert!(entry.permanent);

        assert!(
            pattern
                .to_entry(&RedirectRecord::new("/go.php?bid=42", " ", true))
                .is_none()
        );
        assert!(
            pattern
                .to_entry(&RedirectRecord::new("/old", "/new", true))
                .is_none()
        );
    }

    #[test]
    fn test_entries_last_record_wins_in_first_seen_order() {
        let records = vec![
            RedirectRecord::new("/go.php?bid=42", "/first", true),
            RedirectRecord::new("/old", "/new", true),
            RedirectRecord::new("/go.php?bid=7", "/seven", false),
            RedirectRecord::new("/go.php?bid=42", "/second", false),
        ];

        let entries = default_pattern().entries(&records);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].code, "42");
        assert_eq!(entries[0].destination, "/second");
        assert!(!entries[0].permanent);
        assert_eq!(entries[1].code, "7");
    }

    #[test]
    fn test_route_table_excludes_short_codes_and_strips_queries() {
        let records = vec![
            RedirectRecord::new("/go.php?bid=1", "/one", true),
            RedirectRecord::new("/old-page?ref=mail", "/new-page", true),
            RedirectRecord::new("/legacy", "https://partner.example/", false),
            RedirectRecord::new("", "/nowhere", false),
            RedirectRecord::new("/dangling", "", false),
        ];

        let table = RouteTable::build(&records, &default_pattern());

        assert_eq!(
            table.rules(),
            &[
                RouteRewrite {
                    source: "/old-page".to_string(),
                    destination: "/new-page".to_string(),
                    permanent: true,
                },
                RouteRewrite {
                    source: "/legacy".to_string(),
                    destination: "https://partner.example/".to_string(),
                    permanent: false,
                },
            ]
        );
    }

    #[test]
    fn test_empty_route_table() {
        let table = RouteTable::build(&[], &default_pattern());
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
    }
}
