//! Main-text extraction from an HTML page.
//!
//! Cascades through container selectors from most to least specific and
//! joins the paragraph text found under the first one that yields content.

use crate::boards::{element_text, selector};
use crate::error::Result;
use scraper::Html;

/// Containers likely to hold the page's main prose, most specific first.
const CONTAINER_SELECTORS: [&str; 3] = ["article", "main", "body"];

/// Extract the main article text from an HTML document.
///
/// Returns an empty string when the page has no usable paragraph text;
/// the caller decides whether that is an error.
pub fn extract_article_text(html: &str) -> Result<String> {
    let paragraph_sel = selector("p")?;
    let document = Html::parse_document(html);

    for container_css in CONTAINER_SELECTORS {
        let container_sel = selector(container_css)?;
        let Some(container) = document.select(&container_sel).next() else {
            continue;
        };

        let paragraphs: Vec<String> = container
            .select(&paragraph_sel)
            .map(element_text)
            .filter(|t| !t.is_empty())
            .collect();

        if !paragraphs.is_empty() {
            return Ok(paragraphs.join("\n\n"));
        }
    }

    Ok(String::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_article_container() {
        let html = r#"
            <html><body>
            <p>Navigation junk</p>
            <article>
              <p>Acme builds rockets.</p>
              <p>Founded in 1999.</p>
            </article>
            </body></html>
        "#;
        let text = extract_article_text(html).unwrap();
        assert_eq!(text, "Acme builds rockets.\n\nFounded in 1999.");
    }

    #[test]
    fn test_falls_back_to_body_paragraphs() {
        let html = "<html><body><p>Just one paragraph.</p></body></html>";
        let text = extract_article_text(html).unwrap();
        assert_eq!(text, "Just one paragraph.");
    }

    #[test]
    fn test_no_paragraphs_yields_empty() {
        let html = "<html><body><div>no paragraphs here</div></body></html>";
        let text = extract_article_text(html).unwrap();
        assert!(text.is_empty());
    }
}
