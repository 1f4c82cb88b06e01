use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Flatten quote markup to display text: tags dropped, entities decoded,
/// whitespace runs collapsed.
pub fn to_plain_text(markup: &str) -> String {
    let fragment = Html::parse_fragment(markup);
    let text: String = fragment.root_element().text().collect();
    WHITESPACE_RE.replace_all(&text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_tags_and_decodes_entities() {
        assert_eq!(
            to_plain_text("<i>Pudd'nhead Wilson</i> &amp; <a href=\"/wiki/X\">friends</a>"),
            "Pudd'nhead Wilson & friends"
        );
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(to_plain_text("  line one\n\n  line <b>two</b>  "), "line one line two");
    }

    #[test]
    fn plain_input_unchanged() {
        assert_eq!(to_plain_text("Plain quote text"), "Plain quote text");
    }
}
