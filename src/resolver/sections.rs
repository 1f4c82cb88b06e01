use tracing::debug;

use super::WikiquoteClient;
use crate::error::QuoteError;
use crate::model::{Section, SectionSet};
use crate::transport::Transport;

/// Index tokens of the sub-sections of section 1 (`1.x`, `1.x.y`, ...), in
/// outline order. Pages without sub-headings fall back to section 1 itself.
pub fn select_quote_sections(outline: &[Section]) -> Vec<String> {
    let selected: Vec<String> = outline
        .iter()
        .filter(|s| is_under_first_section(&s.number))
        .map(|s| s.index.clone())
        .collect();
    if !selected.is_empty() {
        return selected;
    }

    let top = outline
        .iter()
        .find(|s| s.number == "1")
        .map(|s| s.index.clone())
        .unwrap_or_else(|| "1".to_string());
    vec![top]
}

fn is_under_first_section(number: &str) -> bool {
    let mut parts = number.split('.');
    parts.next() == Some("1") && parts.next().is_some()
}

impl<T: Transport> WikiquoteClient<T> {
    /// Section outline of a page, returned with the page's title.
    pub async fn outline(&self, page_id: u64) -> Result<(String, Vec<Section>), QuoteError> {
        let params = [
            ("action", "parse".to_string()),
            ("prop", "sections".to_string()),
            ("pageid", page_id.to_string()),
        ];
        let parsed = self.parse(&params).await?;
        let sections = parsed
            .sections
            .into_iter()
            .map(|s| Section {
                number: s.number,
                index: s.index,
                heading: s.line,
            })
            .collect();
        Ok((parsed.title, sections))
    }

    pub async fn resolve_sections(&self, page_id: u64) -> Result<SectionSet, QuoteError> {
        let (canonical_title, outline) = self.outline(page_id).await?;
        let section_indexes = select_quote_sections(&outline);
        debug!(
            "{} has {} sections, {} candidates: {:?}",
            canonical_title,
            outline.len(),
            section_indexes.len(),
            section_indexes
        );
        Ok(SectionSet {
            canonical_title,
            section_indexes,
        })
    }
}
