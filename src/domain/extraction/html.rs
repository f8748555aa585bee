use super::dto::ExtractedArticle;
use scraper::{ElementRef, Html, Selector};

/// Elements whose text never counts as article content
const IGNORED_ELEMENTS: &[&str] = &[
    "script", "style", "nav", "header", "footer", "aside", "iframe", "noscript",
];

/// Candidate containers for the article body, most specific first
const CONTENT_SELECTORS: &[&str] = &[
    "article",
    "[role=\"main\"]",
    ".article-content",
    ".post-content",
    ".entry-content",
    "main",
];

/// A container must carry more than this many characters to be used
const MIN_CONTAINER_CHARS: usize = 200;

/// Paragraphs at or below this length are treated as boilerplate
const MIN_PARAGRAPH_CHARS: usize = 50;

pub const UNTITLED_ARTICLE: &str = "Untitled Article";

/// Pull title, byline, date and body text out of an HTML page.
///
/// The body is whitespace-collapsed and may be empty; callers decide whether
/// there is enough of it.
pub fn scrape_article(html: &str) -> ExtractedArticle {
    let document = Html::parse_document(html);

    let title = first_text(&document, "h1")
        .or_else(|| meta_content(&document, "meta[property=\"og:title\"]"))
        .or_else(|| first_text(&document, "title"))
        .unwrap_or_else(|| UNTITLED_ARTICLE.to_string());

    let author = meta_content(&document, "meta[name=\"author\"]")
        .or_else(|| meta_content(&document, "meta[property=\"article:author\"]"))
        .or_else(|| first_text(&document, "[rel=\"author\"]"));

    let published_date = meta_content(&document, "meta[property=\"article:published_time\"]")
        .or_else(|| attribute(&document, "time[datetime]", "datetime"));

    ExtractedArticle {
        title,
        content: collapse_whitespace(&body_text(&document)),
        author,
        published_date,
    }
}

/// Replace every whitespace run with a single space and trim
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn body_text(document: &Html) -> String {
    for css in CONTENT_SELECTORS {
        let Some(selector) = parse_selector(css) else {
            continue;
        };
        let text = document
            .select(&selector)
            .filter(|el| !is_ignored(el))
            .map(|el| visible_text(&el))
            .collect::<Vec<_>>()
            .join(" ");
        let text = text.trim();
        if text.chars().count() > MIN_CONTAINER_CHARS {
            return text.to_string();
        }
    }

    let Some(paragraph) = parse_selector("p") else {
        return String::new();
    };
    document
        .select(&paragraph)
        .filter(|el| !is_ignored(el))
        .map(|el| visible_text(&el).trim().to_string())
        .filter(|text| text.chars().count() > MIN_PARAGRAPH_CHARS)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn parse_selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::warn!(selector = css, error = %e, "Invalid CSS selector");
            None
        }
    }
}

/// Trimmed text of the first visible element matching `css`, if non-empty
fn first_text(document: &Html, css: &str) -> Option<String> {
    let selector = parse_selector(css)?;
    let element = document.select(&selector).find(|el| !is_ignored(el))?;
    non_empty(visible_text(&element).trim())
}

fn meta_content(document: &Html, css: &str) -> Option<String> {
    attribute(document, css, "content")
}

fn attribute(document: &Html, css: &str, name: &str) -> Option<String> {
    let selector = parse_selector(css)?;
    document
        .select(&selector)
        .filter(|el| !is_ignored(el))
        .find_map(|el| el.value().attr(name).and_then(|v| non_empty(v.trim())))
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn is_ignored_name(name: &str) -> bool {
    IGNORED_ELEMENTS.contains(&name)
}

/// True when the element or one of its ancestors is an ignored element
fn is_ignored(element: &ElementRef<'_>) -> bool {
    is_ignored_name(element.value().name())
        || element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|ancestor| is_ignored_name(ancestor.value().name()))
}

/// Text of an element, skipping any ignored descendants
fn visible_text(element: &ElementRef<'_>) -> String {
    let mut out = String::new();
    collect_text(element, &mut out);
    out
}

fn collect_text(element: &ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child) {
            if !is_ignored_name(child.value().name()) {
                collect_text(&child, out);
            }
        }
    }
}
