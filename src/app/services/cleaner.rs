//! Scraped HTML to plain reading text.
//!
//! Chrome (scripts, styles, page header/footer, navigation, sidebars) is
//! detached from the parsed tree, the remaining body is laid out as text by
//! `html2text`, and short lines are dropped. The line filter also drops
//! legitimate short content such as headings; that trade-off is accepted and
//! tuned by [`MIN_LINE_CHARS`].

use html2text::render::TrivialDecorator;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::{debug, warn};

/// Elements removed before text extraction, together with everything inside them.
pub const DENYLISTED_TAGS: &[&str] = &["script", "style", "header", "footer", "nav", "aside"];

/// Lines shorter than this (in characters, ignoring surrounding whitespace) are dropped.
pub const MIN_LINE_CHARS: usize = 20;

/// Deeper trees are flattened to their text instead of being laid out.
const MAX_RENDER_DEPTH: usize = 256;

/// Wide enough that paragraphs are never wrapped into short lines.
const RENDER_WIDTH: usize = 10_000;

/// Elements that start a new line when a page is flattened.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption", "figure",
    "form", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "li", "main", "ol", "p", "pre", "section",
    "table", "td", "th", "tr", "ul",
];

/// Clean a raw HTML page into newline-separated reading text.
pub fn clean_html(html: &str) -> String {
    clean_html_with_threshold(html, MIN_LINE_CHARS)
}

/// [`clean_html`] with an explicit short-line threshold.
pub fn clean_html_with_threshold(html: &str, min_line_chars: usize) -> String {
    let mut document = Html::parse_document(html);
    let removed = remove_denylisted(&mut document);
    let rendered = render_body(&document);

    // Indentation inside a line is content (preformatted blocks); only the
    // whole result is trimmed.
    let kept: Vec<&str> = rendered
        .lines()
        .map(str::trim_end)
        .filter(|line| {
            let content = line.trim_start();
            !content.is_empty() && content.chars().count() >= min_line_chars
        })
        .collect();

    debug!(
        "Cleaned HTML: removed {} chrome elements, kept {} of {} lines",
        removed,
        kept.len(),
        rendered.lines().count()
    );

    kept.join("\n").trim().to_string()
}

/// Detach every denylisted element from the tree. Returns how many were matched.
fn remove_denylisted(document: &mut Html) -> usize {
    let selector = match Selector::parse(&DENYLISTED_TAGS.join(", ")) {
        Ok(selector) => selector,
        Err(e) => {
            warn!("Invalid denylist selector: {}", e);
            return 0;
        }
    };

    let ids: Vec<_> = document.select(&selector).map(|element| element.id()).collect();
    for id in &ids {
        if let Some(mut node) = document.tree.get_mut(*id) {
            node.detach();
        }
    }
    ids.len()
}

fn render_body(document: &Html) -> String {
    let root = Selector::parse("body")
        .ok()
        .and_then(|selector| document.select(&selector).next())
        .unwrap_or_else(|| document.root_element());

    if nesting_depth(root) > MAX_RENDER_DEPTH {
        warn!(
            "Page nests deeper than {} elements; extracting flat text",
            MAX_RENDER_DEPTH
        );
        return flat_text(root);
    }

    match html2text::from_read_with_decorator(
        root.html().as_bytes(),
        RENDER_WIDTH,
        TrivialDecorator::new(),
    ) {
        Ok(text) => text,
        Err(err) => {
            warn!("html2text failed: {err}");
            flat_text(root)
        }
    }
}

fn nesting_depth(root: ElementRef) -> usize {
    let mut deepest = 0;
    let mut stack = vec![(*root, 0usize)];
    while let Some((node, depth)) = stack.pop() {
        deepest = deepest.max(depth);
        stack.extend(node.children().map(|child| (child, depth + 1)));
    }
    deepest
}

/// Text nodes in document order, with a line break before each block element.
fn flat_text(root: ElementRef) -> String {
    let mut out = String::new();
    let mut stack = vec![*root];
    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) if BLOCK_TAGS.contains(&element.name()) => out.push('\n'),
            _ => {}
        }
        stack.extend(node.children().rev());
    }
    out
}
