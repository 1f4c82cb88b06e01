use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

static LIST_ITEM: LazyLock<Selector> = LazyLock::new(|| Selector::parse("li").unwrap());
static BOLD: LazyLock<Selector> = LazyLock::new(|| Selector::parse("b, strong").unwrap());
static NESTED_LIST: LazyLock<Selector> = LazyLock::new(|| Selector::parse("ul, ol, dl").unwrap());

const LIST_TAGS: &[&str] = &["ul", "ol", "dl"];
const BOLD_TAGS: &[&str] = &["b", "strong"];

/// Quote markup of every top-level list item in a rendered section, in
/// document order. Items that reduce to nothing are skipped.
pub fn extract_list_quotes(fragment: &str) -> Vec<String> {
    let document = Html::parse_fragment(fragment);

    document
        .select(&LIST_ITEM)
        .filter(|li| is_top_level(li))
        .map(|li| quote_markup(&li))
        .filter(|q| !q.is_empty())
        .collect()
}

/// Directly inside a `ul`/`ol`, and not inside another list item.
fn is_top_level(li: &ElementRef) -> bool {
    let in_list = li
        .parent()
        .and_then(|p| p.value().as_element().map(|e| matches!(e.name(), "ul" | "ol")))
        .unwrap_or(false);
    let nested = li
        .ancestors()
        .any(|a| a.value().as_element().is_some_and(|e| e.name() == "li"));
    in_list && !nested
}

/// Bold spans win over the full item text; nested lists never count.
fn quote_markup(li: &ElementRef) -> String {
    let bold: Vec<ElementRef> = li
        .select(&BOLD)
        .filter(|b| !has_ancestor_within(b, li, LIST_TAGS) && !has_ancestor_within(b, li, BOLD_TAGS))
        .collect();

    if !bold.is_empty() {
        return bold
            .iter()
            .map(|b| b.inner_html())
            .collect::<String>()
            .trim()
            .to_string();
    }

    let mut markup = li.inner_html();
    for list in li.select(&NESTED_LIST) {
        if has_ancestor_within(&list, li, LIST_TAGS) {
            continue;
        }
        let nested = list.html();
        if let Some(pos) = markup.find(&nested) {
            markup.replace_range(pos..pos + nested.len(), "");
        }
    }
    markup.trim().to_string()
}

/// True if `el` sits inside one of `tags` somewhere below `scope`.
fn has_ancestor_within(el: &ElementRef, scope: &ElementRef, tags: &[&str]) -> bool {
    for a in el.ancestors() {
        if a.id() == scope.id() {
            return false;
        }
        if a.value().as_element().is_some_and(|e| tags.contains(&e.name())) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap()
    }

    #[test]
    fn bold_span_and_plain_item() {
        let html = "<ul><li>Some lead-in <b>the memorable part</b> and more.\
                    <ul><li>citation</li></ul></li><li>Plain quote text</li></ul>";
        let quotes = extract_list_quotes(html);
        assert_eq!(quotes, vec!["the memorable part", "Plain quote text"]);
    }

    #[test]
    fn no_list_items() {
        assert!(extract_list_quotes("<p>Just a paragraph.</p><h2>Heading</h2>").is_empty());
        assert!(extract_list_quotes("").is_empty());
    }

    #[test]
    fn nested_list_stripped_inline_markup_kept() {
        let html = "<ul><li>To be <i>or</i> not to be.<ul><li><i>Hamlet</i>, Act III</li></ul></li></ul>";
        assert_eq!(extract_list_quotes(html), vec!["To be <i>or</i> not to be."]);
    }

    #[test]
    fn bold_inside_citation_is_ignored() {
        let html = "<ul><li>Whole quote.<ul><li>Source <b>(1897)</b></li></ul></li></ul>";
        assert_eq!(extract_list_quotes(html), vec!["Whole quote."]);
    }

    #[test]
    fn several_bold_spans_concatenate_in_order() {
        let html = "<ul><li><b>First,</b> filler <strong> second.</strong></li></ul>";
        assert_eq!(extract_list_quotes(html), vec!["First, second."]);
    }

    #[test]
    fn bold_within_bold_counted_once() {
        let html = "<ul><li>x <b>outer <b>inner</b></b></li></ul>";
        assert_eq!(extract_list_quotes(html), vec!["outer <b>inner</b>"]);
    }

    #[test]
    fn ordered_lists_and_empty_items() {
        let html = "<ol><li>One</li><li>   </li><li><ul><li>only a citation</li></ul></li><li>Two</li></ol>";
        assert_eq!(extract_list_quotes(html), vec!["One", "Two"]);
    }

    #[test]
    fn sourced_section_fixture() {
        let quotes = extract_list_quotes(&fixture("mark_twain_sourced"));
        assert_eq!(quotes.len(), 4);
        assert_eq!(
            quotes[0],
            "Get your facts first, and then you can distort them as much as you please."
        );
        assert_eq!(
            quotes[1],
            "Truth is stranger than fiction, but it is because Fiction is obliged to stick to possibilities; Truth isn't."
        );
        assert_eq!(
            quotes[2],
            "The man who does not read has no advantage over the man who cannot read."
        );
        assert_eq!(quotes[3], "Courage is resistance to fear,not absence of fear.");
        assert!(quotes.iter().all(|q| !q.contains("<li>")));
    }
}
