// src/core/html.rs
// Small helpers over `scraper` element trees.

use scraper::ElementRef;

/// Concatenated text of the element and its descendants, tags dropped.
pub fn visible_text(el: &ElementRef) -> String {
    el.text().collect()
}

pub fn has_any_class(el: &ElementRef, classes: &[&str]) -> bool {
    el.value().classes().any(|c| classes.contains(&c))
}

pub fn has_any_id(el: &ElementRef, ids: &[&str]) -> bool {
    el.value().id().is_some_and(|id| ids.contains(&id))
}

/// True if any descendant element is one of `tags`.
pub fn contains_tag(el: &ElementRef, tags: &[&str]) -> bool {
    el.descendants()
        .filter_map(ElementRef::wrap)
        .skip(1) // the element itself
        .any(|e| tags.contains(&e.value().name()))
}

/// The element itself or any ancestor satisfies `pred`.
pub fn within<F>(el: &ElementRef, pred: F) -> bool
where
    F: Fn(&ElementRef) -> bool,
{
    pred(el) || el.ancestors().filter_map(ElementRef::wrap).any(|a| pred(&a))
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::*;

    fn first<'a>(doc: &'a Html, css: &str) -> ElementRef<'a> {
        doc.select(&Selector::parse(css).unwrap()).next().unwrap()
    }

    #[test]
    fn text_and_tags() {
        let doc = Html::parse_fragment(r#"<p class="lead x">A <b>bold</b> <i>move</i></p>"#);
        let p = first(&doc, "p");
        assert_eq!(visible_text(&p), "A bold move");
        assert!(contains_tag(&p, &["b", "strong"]));
        assert!(!contains_tag(&p, &["p"]));
        assert!(has_any_class(&p, &["x"]));
    }

    #[test]
    fn within_checks_ancestors() {
        let doc = Html::parse_fragment(r#"<div id="coordinates"><span><p>51°N</p></span></div>"#);
        let p = first(&doc, "p");
        assert!(within(&p, |e| has_any_id(e, &["coordinates"])));
        assert!(!within(&p, |e| e.value().name() == "table"));
    }
}
