use tracing::debug;

use super::WikiquoteClient;
use crate::api::{OpenSearchResponse, FLAG};
use crate::error::QuoteError;
use crate::transport::Transport;

impl<T: Transport> WikiquoteClient<T> {
    /// Article titles suggested for a free-text search, best match first.
    pub async fn search_titles(&self, query: &str) -> Result<Vec<String>, QuoteError> {
        let params = [
            ("action", "opensearch".to_string()),
            ("namespace", "0".to_string()),
            ("suggest", FLAG.to_string()),
            ("search", query.to_string()),
        ];
        let value = self.transport.get_json(&params).await?;
        let response: OpenSearchResponse = serde_json::from_value(value)?;
        debug!("Search {:?}: {} suggestions", query, response.titles.len());
        Ok(response.titles)
    }

    /// URL of the first interwiki link (e.g. to the encyclopedia article)
    /// whose text contains `title`. Looks at the whole page when `section`
    /// is `None`.
    pub async fn find_wiki_link(
        &self,
        page_id: u64,
        section: Option<&str>,
        title: &str,
    ) -> Result<Option<String>, QuoteError> {
        let mut params = vec![
            ("action", "parse".to_string()),
            ("noimages", FLAG.to_string()),
            ("pageid", page_id.to_string()),
        ];
        if let Some(section) = section {
            params.push(("section", section.to_string()));
        }
        let parsed = self.parse(&params).await?;
        Ok(parsed
            .iwlinks
            .into_iter()
            .find(|link| link.text.contains(title))
            .map(|link| link.url))
    }
}
