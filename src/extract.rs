use scraper::{ElementRef, Html, Selector};

use crate::error::PipelineError;
use crate::record::{Link, Record};

/// Pull title, headings, paragraphs and links out of raw document bytes.
///
/// The parser is error-recovering, so any text input yields a record —
/// missing elements become empty fields, never errors. The only content
/// that cannot be tokenized at all is non-text: invalid UTF-8 fails with
/// `MalformedInput`.
pub fn extract(content: &[u8]) -> Result<Record, PipelineError> {
    let text = std::str::from_utf8(content)
        .map_err(|e| PipelineError::MalformedInput(format!("invalid utf-8: {}", e)))?;
    let doc = Html::parse_document(text);

    let title_sel = selector("title");
    // One combined selector keeps document order across heading levels.
    let heading_sel = selector("h1, h2, h3, h4, h5, h6");
    let para_sel = selector("p");
    let anchor_sel = selector("a");

    let title = doc
        .select(&title_sel)
        .next()
        .map(element_text)
        .unwrap_or_default();

    let headings = doc.select(&heading_sel).map(element_text).collect();
    let paragraphs = doc.select(&para_sel).map(element_text).collect();

    let links = doc
        .select(&anchor_sel)
        .map(|a| Link {
            text: element_text(a),
            href: a.value().attr("href").map(str::to_string),
        })
        .collect();

    Ok(Record {
        title,
        headings,
        paragraphs,
        links,
    })
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

fn element_text(el: ElementRef) -> String {
    el.text().collect()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_to_end_example() {
        let html = br#"<html><title>T</title><h1>A</h1><p>B</p><a href="u">C</a></html>"#;
        let r = extract(html).unwrap();
        assert_eq!(r.title, "T");
        assert_eq!(r.headings, vec!["A"]);
        assert_eq!(r.paragraphs, vec!["B"]);
        assert_eq!(
            r.links,
            vec![Link { text: "C".into(), href: Some("u".into()) }]
        );
    }

    #[test]
    fn missing_elements_yield_empty_record() {
        let r = extract(b"<html><body><div>nothing here</div></body></html>").unwrap();
        assert_eq!(r.title, "");
        assert!(r.headings.is_empty());
        assert!(r.paragraphs.is_empty());
        assert!(r.links.is_empty());
    }

    #[test]
    fn headings_keep_document_order_across_levels() {
        let html = b"<h2>first</h2><h1>second</h1><h6>third</h6><h3>fourth</h3>";
        let r = extract(html).unwrap();
        assert_eq!(r.headings, vec!["first", "second", "third", "fourth"]);
    }

    #[test]
    fn anchor_without_href_is_none() {
        let r = extract(b"<a>bare</a><a href=\"\">empty</a>").unwrap();
        assert_eq!(r.links.len(), 2);
        assert_eq!(r.links[0].href, None);
        assert_eq!(r.links[1].href, Some(String::new()));
    }

    #[test]
    fn plain_text_is_still_markup() {
        // html5ever tokenizes any string; bare text is just body content.
        let r = extract(b"just some words, no tags").unwrap();
        assert_eq!(r.title, "");
        assert!(r.paragraphs.is_empty());
    }

    #[test]
    fn malformed_markup_degrades_gracefully() {
        let r = extract(b"<h1>open heading<p>and a <a href='x'>link").unwrap();
        assert_eq!(r.headings.len(), 1);
        assert_eq!(r.paragraphs.len(), 1);
        assert_eq!(r.links[0].href.as_deref(), Some("x"));
    }

    #[test]
    fn invalid_utf8_is_malformed_input() {
        assert!(matches!(
            extract(&[0xff, 0xfe, 0x80, 0x00]),
            Err(PipelineError::MalformedInput(_))
        ));
    }
}
