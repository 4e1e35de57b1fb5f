//! HTML-to-text normalization for confirmation emails.
//!
//! Confirmation emails arrive as HTML with entities, nested tables, and
//! arbitrary line breaks. The extraction rules downstream expect a single
//! flat, single-spaced string, so everything funnels through [`body_text`]:
//! entities are decoded and tags stripped by html5ever (via `scraper`), then
//! all whitespace runs — including line breaks — collapse to one space.
//!
//! This step never fails. html5ever recovers from malformed markup, so a
//! broken document degrades to best-effort text instead of aborting the
//! pipeline.

use scraper::{Html, Selector};

/// Render an HTML document down to its single-spaced body text.
///
/// Falls back to the text of the whole tree when the document has no
/// `<body>` element (html5ever synthesizes one for full documents, so this
/// only triggers for unusual fragments).
pub fn body_text(raw: &str) -> String {
    let document = Html::parse_document(raw);
    let body = Selector::parse("body").expect("static selector must parse");

    let text: String = match document.select(&body).next() {
        Some(el) => el.text().collect(),
        None => document.root_element().text().collect(),
    };

    collapse_whitespace(&text)
}

/// Collapse every whitespace run (spaces, tabs, line breaks) to one space,
/// trimming the ends.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_to_body_text() {
        let html = r#"
        <html>
        <head><title>Booking</title></head>
        <body>
            <p>QA Booking Confirmation for Jane Doe Start Date:</p>
            <table><tr><td>01 March 2024 at 09:30</td><td>1 day</td></tr></table>
        </body>
        </html>"#;

        let text = body_text(html);
        assert!(text.contains("QA Booking Confirmation for Jane Doe Start Date:"));
        assert!(text.contains("01 March 2024 at 09:30"));
        // Head content is not body text.
        assert!(!text.contains("Booking</title>"));
    }

    #[test]
    fn decodes_entities() {
        let html = "<body><p>Smith &amp; Jones&#39;s booking &ndash; confirmed</p></body>";
        let text = body_text(html);
        assert_eq!(text, "Smith & Jones's booking \u{2013} confirmed");
    }

    #[test]
    fn collapses_line_breaks_and_runs() {
        let html = "<body><p>01 March 2024\r\nat\n\n09:30</p>\n<p>1   day</p></body>";
        let text = body_text(html);
        assert_eq!(text, "01 March 2024 at 09:30 1 day");
    }

    #[test]
    fn malformed_markup_degrades_to_text() {
        let html = "<body><p>reference number is 777<div>unclosed";
        let text = body_text(html);
        assert!(text.contains("reference number is 777"));
        assert!(text.contains("unclosed"));
    }

    #[test]
    fn empty_document_yields_empty_string() {
        assert_eq!(body_text(""), "");
    }
}
