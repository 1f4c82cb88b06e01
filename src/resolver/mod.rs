pub mod lookup;
pub mod quotes;
pub mod sections;
pub mod title;

use rand::Rng;
use tracing::{info, warn};

use crate::api::{ParseResponse, Parsed};
use crate::error::{QuoteError, TransportError};
use crate::model::ResolvedQuote;
use crate::settings::Settings;
use crate::transport::{HttpTransport, Params, Transport};

pub use sections::select_quote_sections;
pub use title::capitalize_words;

/// Resolves queries against one wiki through a [`Transport`].
///
/// Each lookup is a single API call; [`WikiquoteClient::random_quote`] chains
/// them: title -> sections -> quotes.
pub struct WikiquoteClient<T> {
    transport: T,
    empty_section_retries: usize,
}

impl WikiquoteClient<HttpTransport> {
    pub fn from_settings(settings: &Settings) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(settings)?;
        Ok(Self::new(transport).with_empty_section_retries(settings.empty_section_retries))
    }
}

impl<T: Transport> WikiquoteClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            empty_section_retries: 0,
        }
    }

    /// Other sections to try when the chosen one turns out to hold no quotes.
    pub fn with_empty_section_retries(mut self, retries: usize) -> Self {
        self.empty_section_retries = retries;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn parse(&self, params: &Params<'_>) -> Result<Parsed, QuoteError> {
        let value = self.transport.get_json(params).await?;
        let response: ParseResponse = serde_json::from_value(value)?;
        Ok(response.parse)
    }

    /// One random quote for `query`: resolve the page, pick one of its quote
    /// sections, then pick one quote from it. Both picks are uniform.
    pub async fn random_quote<R: Rng>(
        &self,
        query: &str,
        rng: &mut R,
    ) -> Result<ResolvedQuote, QuoteError> {
        let page = self.resolve_title(query).await?;
        let sections = self.resolve_sections(page.page_id).await?;

        let mut remaining = sections.section_indexes;
        let mut retries_left = self.empty_section_retries;
        loop {
            let section = remaining.swap_remove(rng.gen_range(0..remaining.len()));
            let mut quote_set = self.extract_quotes(page.page_id, &section).await?;

            if !quote_set.quotes.is_empty() {
                let pick = rng.gen_range(0..quote_set.quotes.len());
                info!(
                    "Picked quote {}/{} from section {} of {}",
                    pick + 1,
                    quote_set.quotes.len(),
                    section,
                    quote_set.canonical_title
                );
                return Ok(ResolvedQuote {
                    canonical_title: quote_set.canonical_title,
                    quote: quote_set.quotes.swap_remove(pick),
                });
            }

            if retries_left == 0 || remaining.is_empty() {
                return Err(QuoteError::EmptySection {
                    title: quote_set.canonical_title,
                    section,
                });
            }
            retries_left -= 1;
            warn!(
                "Section {} of {} has no quotes, trying another ({} retries left)",
                section, quote_set.canonical_title, retries_left
            );
        }
    }
}
