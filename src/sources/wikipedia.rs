// src/sources/wikipedia.rs
//
// Lead paragraph of a leader's encyclopedia page.
//
// Selection is a heuristic over the current article markup:
// - scope to the article body (`div.mw-parser-output`, skipping the ones
//   wrapping page-status indicators) when present;
// - walk <p> in document order, stopping at the first contents boundary
//   (`h2`, `#toc`, `.toc`);
// - skip empty paragraphs and notices (hatnotes, coordinates, tables,
//   "… may refer to:" disambiguation lines);
// - the first paragraph with bold text (the subject's name) wins, else the
//   first one that qualified.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::core::html::{contains_tag, has_any_class, has_any_id, visible_text, within};
use crate::core::net::Transport;
use crate::error::FetchError;
use crate::session::Session;

static BODY_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.mw-parser-output").unwrap());

static BLOCK_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p, h2, #toc, .toc").unwrap());

static NOTICE_TEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)^(?:for other uses|this article is about|not to be confused with|coordinates\s*:|"[^"]+" redirects here)|may refer to:?$|\(disambiguation\)"#,
    )
    .unwrap()
});

const NOTICE_CLASSES: &[&str] = &[
    "hatnote", "dablink", "rellink", "navigation-not-searchable", "mw-empty-elt",
    "coordinates", "geo", "geo-default", "infobox", "sidebar", "shortdescription",
];
const NOTICE_IDS: &[&str] = &["coordinates"];
const INDICATOR_CLASSES: &[&str] = &["mw-indicators", "mw-indicator"];
const BOLD: &[&str] = &["b", "strong"];

/// Paragraph text before normalization.
pub type RawText = String;

/// Fetch the page and pick its lead paragraph. `Ok(None)` means the page
/// has no qualifying paragraph.
pub fn first_paragraph<T: Transport>(
    session: &mut Session<T>,
    page_url: &str,
) -> Result<Option<RawText>, FetchError> {
    let page = session.get_page(page_url)?;
    let found = extract_first_paragraph(&page.body);
    if found.is_none() {
        debug!("{page_url}: no qualifying paragraph");
    }
    Ok(found)
}

pub fn extract_first_paragraph(html: &str) -> Option<RawText> {
    let doc = Html::parse_document(html);
    // Status indicators (padlock, featured star) carry their own
    // `mw-parser-output` ahead of the article body.
    let mut scopes: Vec<ElementRef> = doc
        .select(&BODY_SEL)
        .filter(|el| !within(el, |e| has_any_class(e, INDICATOR_CLASSES)))
        .collect();
    if scopes.is_empty() {
        scopes.push(doc.root_element());
    }
    scopes.into_iter().find_map(lead_paragraph)
}

fn lead_paragraph(scope: ElementRef) -> Option<RawText> {
    let mut fallback = None;
    for el in scope.select(&BLOCK_SEL) {
        if el.value().name() != "p" {
            break; // contents boundary
        }
        if is_notice(&el) {
            continue;
        }
        let text = visible_text(&el);
        if text.trim().is_empty() {
            continue;
        }
        if contains_tag(&el, BOLD) {
            return Some(text);
        }
        fallback.get_or_insert(text);
    }
    fallback
}

fn is_notice(el: &ElementRef) -> bool {
    if within(el, |e| {
        e.value().name() == "table" || has_any_class(e, NOTICE_CLASSES) || has_any_id(e, NOTICE_IDS)
    }) {
        return true;
    }
    NOTICE_TEXT_RE.is_match(visible_text(el).trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(body: &str) -> String {
        format!(r#"<html><body><div id="content"><div class="mw-parser-output">{body}</div></div></body></html>"#)
    }

    #[test]
    fn picks_bold_lead_after_empty_and_hatnote() {
        let html = page(
            r#"<div class="hatnote">For other people named Guy, see Guy (disambiguation).</div>
               <p class="mw-empty-elt"> </p>
               <table class="infobox"><tr><td><p>Prime Minister</p></td></tr></table>
               <p><b>Guy Verhofstadt</b><sup>[1]</sup> is a Belgian politician.</p>
               <h2>Early life</h2><p><b>Later</b> text.</p>"#,
        );
        assert_eq!(
            extract_first_paragraph(&html).as_deref(),
            Some("Guy Verhofstadt[1] is a Belgian politician.")
        );
    }

    #[test]
    fn falls_back_to_first_plain_paragraph() {
        let html = page("<p>\n</p><p>A plain lead without bold.</p><p>Second.</p>");
        assert_eq!(extract_first_paragraph(&html).as_deref(), Some("A plain lead without bold."));
    }

    #[test]
    fn bold_paragraph_beats_earlier_plain_one() {
        let html = page("<p>Intro remark.</p><p><b>Name</b> was a leader.</p>");
        assert_eq!(extract_first_paragraph(&html).as_deref(), Some("Name was a leader."));
    }

    #[test]
    fn stops_at_contents_boundary() {
        let html = page(r#"<div id="toc"><h2>Contents</h2></div><p><b>After</b> the toc.</p>"#);
        assert_eq!(extract_first_paragraph(&html), None);
    }

    #[test]
    fn disambiguation_only_page_is_not_found() {
        let html = page(
            r#"<p><b>John Smith</b> may refer to:</p>
               <ul><li>John Smith (explorer)</li></ul>"#,
        );
        assert_eq!(extract_first_paragraph(&html), None);

        let html = page(r#"<div class="hatnote">For other uses, see X (disambiguation).</div>"#);
        assert_eq!(extract_first_paragraph(&html), None);
    }

    #[test]
    fn coordinates_paragraph_is_skipped() {
        let html = page(
            r#"<p><span id="coordinates">Coordinates: 50°51′N 4°21′E</span></p>
               <p><b>Brussels</b> is a city.</p>"#,
        );
        assert_eq!(extract_first_paragraph(&html).as_deref(), Some("Brussels is a city."));
    }

    #[test]
    fn works_without_article_wrapper() {
        let html = "<html><body><p><b>Solo</b> page.</p></body></html>";
        assert_eq!(extract_first_paragraph(html).as_deref(), Some("Solo page."));
    }

    #[test]
    fn status_indicators_before_body_are_skipped() {
        let html = r#"<html><body>
            <div class="mw-indicators"><div class="mw-indicator" id="mw-indicator-pp-default">
              <div class="mw-parser-output"><span typeof="mw:File"><a href="/wiki/Protection"><img alt="Protected"></a></span></div>
            </div></div>
            <div id="mw-content-text"><div class="mw-content-ltr mw-parser-output">
              <p class="mw-empty-elt"></p>
              <p><b>Joseph Robinette Biden Jr.</b> is an American politician.</p>
            </div></div></body></html>"#;
        assert_eq!(
            extract_first_paragraph(html).as_deref(),
            Some("Joseph Robinette Biden Jr. is an American politician.")
        );
    }
}
