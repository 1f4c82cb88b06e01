use tracing::debug;

use super::WikiquoteClient;
use crate::api::FLAG;
use crate::error::QuoteError;
use crate::model::QuoteSet;
use crate::parser::extract_list_quotes;
use crate::transport::Transport;

impl<T: Transport> WikiquoteClient<T> {
    /// Quotes listed in one section of a page. A section without list items
    /// gives an empty set.
    pub async fn extract_quotes(
        &self,
        page_id: u64,
        section_index: &str,
    ) -> Result<QuoteSet, QuoteError> {
        let params = [
            ("action", "parse".to_string()),
            ("noimages", FLAG.to_string()),
            ("pageid", page_id.to_string()),
            ("section", section_index.to_string()),
        ];
        let parsed = self.parse(&params).await?;
        let html = parsed.text.map(|t| t.html).unwrap_or_default();
        let quotes = extract_list_quotes(&html);
        debug!(
            "Section {} of {}: {} quotes from {} bytes of markup",
            section_index,
            parsed.title,
            quotes.len(),
            html.len()
        );

        Ok(QuoteSet {
            canonical_title: parsed.title,
            quotes,
        })
    }
}
