use tracing::{debug, info};

use super::WikiquoteClient;
use crate::api::{QueryResponse, FLAG};
use crate::error::QuoteError;
use crate::model::PageReference;
use crate::transport::Transport;

/// Uppercase the first letter of every whitespace-separated word, leaving the
/// rest untouched. Wiki titles are case-sensitive past their first letter, so
/// "mark twain" only finds the page as "Mark Twain".
pub fn capitalize_words(query: &str) -> String {
    let mut out = String::with_capacity(query.len());
    let mut word_start = true;
    for c in query.chars() {
        if c.is_whitespace() {
            word_start = true;
            out.push(c);
        } else if word_start {
            out.extend(c.to_uppercase());
            word_start = false;
        } else {
            out.push(c);
        }
    }
    out
}

impl<T: Transport> WikiquoteClient<T> {
    /// Map a free-text query to one existing page, following redirects.
    ///
    /// When the response lists several pages, the first one that is not
    /// missing wins, in the order the API returned them.
    pub async fn resolve_title(&self, query: &str) -> Result<PageReference, QuoteError> {
        let title = capitalize_words(query.trim());
        if title.is_empty() {
            return Err(QuoteError::NotFound {
                query: query.to_string(),
            });
        }

        let params = [
            ("action", "query".to_string()),
            ("redirects", FLAG.to_string()),
            ("titles", title.clone()),
        ];
        let value = self.transport.get_json(&params).await?;
        let response: QueryResponse = serde_json::from_value(value)?;
        debug!("Title lookup for {:?} returned {} pages", title, response.query.pages.len());

        let page = response.query.pages.into_iter().find_map(|p| {
            let page_id = p.existing_id()?;
            Some(PageReference {
                page_id,
                canonical_title: p.title.unwrap_or_else(|| title.clone()),
            })
        });

        match page {
            Some(page) => {
                info!("Resolved {:?} to {} (page {})", query, page.canonical_title, page.page_id);
                Ok(page)
            }
            None => Err(QuoteError::NotFound { query: title }),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::resolver::testdata::title_query;
    use crate::transport::fake::FakeTransport;

    #[test]
    fn capitalizes_each_word() {
        assert_eq!(capitalize_words("the old man and the sea"), "The Old Man And The Sea");
        assert_eq!(capitalize_words("mark twain"), "Mark Twain");
    }

    #[test]
    fn capitalize_is_idempotent() {
        for q in ["the old man and the sea", "  spaced\tout  words ", "ßtraße über", "e. e. cummings"] {
            let once = capitalize_words(q);
            assert_eq!(capitalize_words(&once), once);
        }
    }

    #[test]
    fn capitalize_keeps_inner_case_and_whitespace() {
        assert_eq!(capitalize_words("iPhone  mcDonald"), "IPhone  McDonald");
        assert_eq!(capitalize_words(""), "");
    }

    async fn resolve(pages: serde_json::Value) -> Result<PageReference, QuoteError> {
        let (params, response) = title_query("Some Title", json!({"query": {"pages": pages}}));
        let client = WikiquoteClient::new(FakeTransport::new().with(&params, response));
        client.resolve_title("some title").await
    }

    #[tokio::test]
    async fn first_non_missing_page_wins() {
        let page = resolve(json!({
            "3": {"pageid": 3, "title": "Some Title"},
            "7": {"pageid": 7, "title": "Other", "missing": ""}
        }))
        .await
        .unwrap();
        assert_eq!(page.page_id, 3);
        assert_eq!(page.canonical_title, "Some Title");
    }

    #[tokio::test]
    async fn response_order_not_key_order() {
        let page = resolve(json!({
            "-1": {"title": "Gone", "missing": ""},
            "42": {"pageid": 42, "title": "Later Key First"},
            "3": {"pageid": 3, "title": "Earlier Key"}
        }))
        .await
        .unwrap();
        assert_eq!(page.page_id, 42);
    }

    #[tokio::test]
    async fn only_missing_pages_is_not_found() {
        let err = resolve(json!({
            "-1": {"ns": 0, "title": "Some Title", "missing": ""},
            "-2": {"ns": 0, "title": "Other Title", "missing": ""}
        }))
        .await
        .unwrap_err();
        assert!(matches!(err, QuoteError::NotFound { ref query } if query == "Some Title"));
    }

    #[tokio::test]
    async fn redirect_target_is_canonical_title() {
        let (params, response) = title_query(
            "Samuel Clemens",
            json!({"query": {
                "redirects": [{"from": "Samuel Clemens", "to": "Mark Twain"}],
                "pages": {"7": {"pageid": 7, "ns": 0, "title": "Mark Twain"}}
            }}),
        );
        let client = WikiquoteClient::new(FakeTransport::new().with(&params, response));
        let page = client.resolve_title("samuel clemens").await.unwrap();
        assert_eq!(page.canonical_title, "Mark Twain");
    }

    #[tokio::test]
    async fn blank_query_needs_no_request() {
        let client = WikiquoteClient::new(FakeTransport::new());
        let err = client.resolve_title("   ").await.unwrap_err();
        assert!(matches!(err, QuoteError::NotFound { .. }));
        assert!(client.transport().requests().is_empty());
    }
}
