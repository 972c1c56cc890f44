//! DOM text helpers: visible text, boilerplate-free main text, title, and
//! word-boundary truncation.

use std::sync::LazyLock;

use scraper::node::Element;
use scraper::{ElementRef, Html, Node, Selector};

/// Minimum length for a main-content region to be trusted over the body.
const MIN_MAIN_CONTENT_CHARS: usize = 200;

/// Elements whose text never reaches the reader.
const INVISIBLE_TAGS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Elements dropped before taking descriptive text.
const BOILERPLATE_TAGS: [&str; 13] = [
    "nav", "header", "footer", "script", "style", "aside", "form", "noscript", "iframe", "button",
    "template", "svg", "select",
];

const MAIN_CONTENT_SELECTORS: [&str; 8] = [
    "main",
    "article",
    "section[role=\"main\"]",
    "div[role=\"main\"]",
    ".main-content",
    "#main-content",
    ".content",
    "#content",
];

static MAIN_CONTENT: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    MAIN_CONTENT_SELECTORS
        .iter()
        .map(|s| Selector::parse(s).expect("valid main-content selector"))
        .collect()
});
pub(crate) static BODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("valid body selector"));
pub(crate) static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid anchor selector"));
static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("valid title selector"));

/// Text a visitor can read, including navigation and footer.
pub(crate) fn visible_text(root: ElementRef<'_>) -> String {
    collect_text(root, |el| INVISIBLE_TAGS.contains(&el.name()))
}

/// Text with navigation, forms, sidebars and other chrome removed.
pub(crate) fn cleaned_text(root: ElementRef<'_>) -> String {
    collect_text(root, is_boilerplate)
}

fn is_boilerplate(element: &Element) -> bool {
    BOILERPLATE_TAGS.contains(&element.name())
        || element.id().is_some_and(|id| id.eq_ignore_ascii_case("sidebar"))
        || element
            .classes()
            .any(|class| class.eq_ignore_ascii_case("sidebar"))
}

/// Walks the subtree iteratively so deeply nested markup cannot exhaust
/// the stack. Output is whitespace-collapsed.
fn collect_text<F>(root: ElementRef<'_>, skip: F) -> String
where
    F: Fn(&Element) -> bool,
{
    let mut raw = String::new();
    let mut stack: Vec<_> = root.children().collect();
    stack.reverse();

    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Text(text) => {
                raw.push_str(text);
                raw.push(' ');
            }
            Node::Element(element) => {
                if skip(element) {
                    continue;
                }
                let mut children: Vec<_> = node.children().collect();
                children.reverse();
                stack.extend(children);
            }
            _ => {}
        }
    }

    collapse_whitespace(&raw)
}

pub(crate) fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The document `<title>`, whitespace-collapsed. `None` when missing or blank.
pub(crate) fn document_title(document: &Html) -> Option<String> {
    let element = document.select(&TITLE).next()?;
    let title = collapse_whitespace(&element.text().collect::<String>());
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

/// Main descriptive text of a page.
///
/// Uses the first main-content region whose cleaned text is long enough,
/// otherwise the cleaned `<body>`.
pub(crate) fn main_text(document: &Html) -> Option<String> {
    for selector in MAIN_CONTENT.iter() {
        if let Some(region) = document.select(selector).next() {
            let text = cleaned_text(region);
            if text.chars().count() > MIN_MAIN_CONTENT_CHARS {
                return Some(text);
            }
        }
    }

    let body = document.select(&BODY).next()?;
    let text = cleaned_text(body);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Truncates `text` to at most `max_chars` characters, cutting only at
/// whitespace. Returns `None` if nothing non-blank fits.
#[must_use]
pub fn truncate_at_word_boundary(text: &str, max_chars: usize) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if text.chars().count() <= max_chars {
        return Some(text.to_string());
    }

    let cut = text
        .char_indices()
        .nth(max_chars)
        .map_or(text.len(), |(idx, _)| idx);
    let head = &text[..cut];
    let next_is_space = text[cut..].chars().next().is_some_and(char::is_whitespace);

    let kept = if next_is_space {
        head
    } else {
        head.rfind(char::is_whitespace).map_or("", |idx| &head[..idx])
    };

    let kept = kept.trim_end();
    if kept.is_empty() {
        None
    } else {
        Some(kept.to_string())
    }
}
