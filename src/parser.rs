//! HTML parsing for portal responses.

use scraper::{ElementRef, Html, Selector};

use crate::errors::{GpaError, Result};

/// A parsed portal page.
///
/// Produced by the login step and only read afterwards.
pub struct Document {
    html: Html,
}

impl Document {
    /// Returns every element matching `selector`, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`GpaError::Config`] if `selector` is not valid CSS.
    pub fn select_all(&self, selector: &str) -> Result<Vec<ElementRef<'_>>> {
        let selector = compile(selector)?;
        Ok(self.html.select(&selector).collect())
    }

    /// Whether `<body>` contains a `tag` element with the given `id`.
    ///
    /// The id is compared verbatim, so portal ids such as `CRSE_NAME$0`
    /// need no CSS escaping.
    pub fn has_element_id_in_body(&self, tag: &str, id: &str) -> Result<bool> {
        let selector = compile(&format!("body {tag}"))?;
        Ok(self
            .html
            .select(&selector)
            .any(|el| el.value().id() == Some(id)))
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| GpaError::Config(format!("invalid selector {selector:?}: {e}")))
}

/// Parses a response body into a [`Document`].
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected; HTML
/// parsing itself always recovers.
pub fn parse_document(bytes: &[u8]) -> Document {
    let text = String::from_utf8_lossy(bytes);
    Document {
        html: Html::parse_document(&text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_bytes_yields_empty_body() {
        let doc = parse_document(&[]);
        assert!(doc.select_all("span").unwrap().is_empty());
        assert!(!doc.has_element_id_in_body("span", "login_error").unwrap());
    }

    #[test]
    fn test_element_id_requires_matching_tag() {
        let doc = parse_document(br#"<html><body><div id="login_error">x</div></body></html>"#);
        assert!(!doc.has_element_id_in_body("span", "login_error").unwrap());
        assert!(doc.has_element_id_in_body("div", "login_error").unwrap());
    }

    #[test]
    fn test_select_all_preserves_document_order() {
        let doc = parse_document(b"<p class=c>1</p><div><p class=c>2</p></div><p class=c>3</p>");
        let text: Vec<String> = doc
            .select_all("p.c")
            .unwrap()
            .iter()
            .map(|e| e.text().collect())
            .collect();
        assert_eq!(text, ["1", "2", "3"]);
    }

    #[test]
    fn test_element_id_with_css_special_characters() {
        let doc = parse_document(br#"<body><span id="CRSE_NAME$0">x</span></body>"#);
        assert!(doc.has_element_id_in_body("span", "CRSE_NAME$0").unwrap());
        assert!(!doc.has_element_id_in_body("span", "CRSE_NAME$1").unwrap());
    }

    #[test]
    fn test_invalid_selector_is_config_error() {
        let doc = parse_document(b"");
        assert!(matches!(doc.select_all("span..x"), Err(GpaError::Config(_))));
    }

    #[test]
    fn test_invalid_utf8_is_tolerated() {
        let doc = parse_document(b"<span class=s>\xFF</span>");
        assert_eq!(doc.select_all("span.s").unwrap().len(), 1);
    }
}
