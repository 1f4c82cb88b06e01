//! Typed shapes of the MediaWiki API responses the resolver consumes.
//!
//! Requests use the default (version 1) JSON format: presence flags such as
//! `missing` arrive as empty strings, and markup sits under a `"*"` key.

use std::fmt;

use serde::de::{IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// Value sent for flag parameters; the API only checks that they are present.
pub const FLAG: &str = "1";

// ── action=query ──

#[derive(Debug, Default, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub query: QueryPages,
}

#[derive(Debug, Default, Deserialize)]
pub struct QueryPages {
    /// Pages in the order the response lists them; the map keys are dropped.
    #[serde(default, deserialize_with = "pages_in_response_order")]
    pub pages: Vec<PageEntry>,
}

#[derive(Debug, Deserialize)]
pub struct PageEntry {
    pub pageid: Option<i64>,
    pub title: Option<String>,
    #[serde(default)]
    pub missing: Option<IgnoredAny>,
    #[serde(default)]
    pub invalid: Option<IgnoredAny>,
}

impl PageEntry {
    /// The positive page id of a page that exists.
    pub fn existing_id(&self) -> Option<u64> {
        if self.missing.is_some() || self.invalid.is_some() {
            return None;
        }
        self.pageid.filter(|&id| id > 0).map(|id| id as u64)
    }
}

fn pages_in_response_order<'de, D>(deserializer: D) -> Result<Vec<PageEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    struct PagesVisitor;

    impl<'de> Visitor<'de> for PagesVisitor {
        type Value = Vec<PageEntry>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map or list of page entries")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut pages = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((_, page)) = map.next_entry::<IgnoredAny, PageEntry>()? {
                pages.push(page);
            }
            Ok(pages)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut pages = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(page) = seq.next_element::<PageEntry>()? {
                pages.push(page);
            }
            Ok(pages)
        }
    }

    deserializer.deserialize_any(PagesVisitor)
}

// ── action=parse ──

#[derive(Debug, Deserialize)]
pub struct ParseResponse {
    pub parse: Parsed,
}

#[derive(Debug, Deserialize)]
pub struct Parsed {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub sections: Vec<SectionEntry>,
    pub text: Option<Markup>,
    #[serde(default)]
    pub iwlinks: Vec<InterwikiLink>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SectionEntry {
    pub number: String,
    pub index: String,
    #[serde(default)]
    pub line: String,
}

#[derive(Debug, Deserialize)]
pub struct Markup {
    #[serde(rename = "*")]
    pub html: String,
}

#[derive(Debug, Deserialize)]
pub struct InterwikiLink {
    pub url: String,
    #[serde(rename = "*")]
    pub text: String,
}

// ── action=opensearch ──

/// `[query, [titles], [descriptions], [urls]]`; only the titles are kept.
#[derive(Debug)]
pub struct OpenSearchResponse {
    pub titles: Vec<String>,
}

impl<'de> Deserialize<'de> for OpenSearchResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PositionalVisitor;

        impl<'de> Visitor<'de> for PositionalVisitor {
            type Value = OpenSearchResponse;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an opensearch array")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                seq.next_element::<IgnoredAny>()?;
                let titles = seq.next_element::<Vec<String>>()?.unwrap_or_default();
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(OpenSearchResponse { titles })
            }
        }

        deserializer.deserialize_seq(PositionalVisitor)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn pages_keep_response_order() {
        let raw = r#"{"query":{"pages":{"9":{"pageid":9,"title":"B"},"-1":{"title":"X","missing":""},"2":{"pageid":2,"title":"A"}}}}"#;
        let value: serde_json::Value = serde_json::from_str(raw).unwrap();
        let parsed: QueryResponse = serde_json::from_value(value).unwrap();
        let ids: Vec<Option<u64>> = parsed.query.pages.iter().map(PageEntry::existing_id).collect();
        assert_eq!(ids, vec![Some(9), None, Some(2)]);
    }

    #[test]
    fn query_without_pages_is_empty() {
        let parsed: QueryResponse =
            serde_json::from_value(json!({"batchcomplete": ""})).unwrap();
        assert!(parsed.query.pages.is_empty());
    }

    #[test]
    fn invalid_title_is_not_a_page() {
        let parsed: QueryResponse = serde_json::from_value(json!({
            "query": {"pages": {"-1": {"title": "<>", "invalid": "", "invalidreason": "bad"}}}
        }))
        .unwrap();
        assert_eq!(parsed.query.pages[0].existing_id(), None);
    }

    #[test]
    fn opensearch_titles() {
        let parsed: OpenSearchResponse = serde_json::from_value(json!([
            "mark tw",
            ["Mark Twain", "Mark Twain (disambiguation)"],
            ["", ""],
            ["https://en.wikiquote.org/wiki/Mark_Twain", "https://en.wikiquote.org/wiki/X"]
        ]))
        .unwrap();
        assert_eq!(parsed.titles, vec!["Mark Twain", "Mark Twain (disambiguation)"]);
    }

    #[test]
    fn parse_text_under_star_key() {
        let parsed: ParseResponse = serde_json::from_value(json!({
            "parse": {"title": "Mark Twain", "pageid": 7, "text": {"*": "<ul><li>Q</li></ul>"}}
        }))
        .unwrap();
        assert_eq!(parsed.parse.text.unwrap().html, "<ul><li>Q</li></ul>");
        assert!(parsed.parse.sections.is_empty());
    }
}
