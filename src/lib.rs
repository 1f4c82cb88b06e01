//! Random quotations from Wikiquote.
//!
//! A query is resolved in three dependent API calls: the title lookup finds
//! the page, the section outline narrows it to the sections that hold quotes,
//! and one section's rendered markup is reduced to a list of quotes. One
//! section and one quote are then picked at random.

pub mod api;
pub mod batch;
pub mod error;
pub mod model;
pub mod parser;
pub mod resolver;
pub mod settings;
pub mod transport;

pub use error::{QuoteError, TransportError};
pub use model::{PageReference, QuoteSet, ResolvedQuote, Section, SectionSet};
pub use resolver::{capitalize_words, select_quote_sections, WikiquoteClient};
pub use settings::Settings;
