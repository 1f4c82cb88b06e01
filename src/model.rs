use serde::Serialize;

/// A page the title lookup settled on, after redirects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageReference {
    pub page_id: u64,
    pub canonical_title: String,
}

/// Index tokens of the sections likely to hold quotes. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionSet {
    pub canonical_title: String,
    pub section_indexes: Vec<String>,
}

/// Quote markup found in one section, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteSet {
    pub canonical_title: String,
    pub quotes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedQuote {
    pub canonical_title: String,
    pub quote: String,
}

/// One entry of a page outline, as listed by the `sections` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub number: String,
    pub index: String,
    pub heading: String,
}
