use scraper::{Html, Selector};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{CleanerError, Result};

/// Script element carrying the published document payload
pub const PAYLOAD_SELECTOR: &str = r#"script#document[type="application/json"]"#;

/// Execute Stage 0: locate the embedded payload and parse it
///
/// Finds the first `<script id="document" type="application/json">` element
/// and parses its body as JSON.
pub fn locate_payload(html: &str) -> Result<Value> {
    let raw = extract_payload_text(html)?;
    info!("Located document payload ({} bytes)", raw.len());

    serde_json::from_str(&raw).map_err(CleanerError::MalformedJson)
}

/// Raw text content of the payload element
pub fn extract_payload_text(html: &str) -> Result<String> {
    let selector =
        Selector::parse(PAYLOAD_SELECTOR).map_err(|e| CleanerError::Selector(format!("{:?}", e)))?;
    let document = Html::parse_document(html);

    let element = document
        .select(&selector)
        .next()
        .ok_or(CleanerError::MissingPayload)?;
    debug!("Payload element: {:?}", element.value());

    Ok(element.text().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(script: &str) -> String {
        format!(
            "<!DOCTYPE html><html><head><title>Shared</title></head><body><div id=\"app\"></div>{}</body></html>",
            script
        )
    }

    #[test]
    fn test_locate_payload() {
        let html = page(
            r#"<script id="document" type="application/json">{"voices": [], "n": 1 < 2}</script>"#,
        );
        // `<` inside a script body is raw text, so this only fails at the JSON step
        let err = locate_payload(&html).unwrap_err();
        assert!(matches!(err, CleanerError::MalformedJson(_)));

        let html = page(
            r#"<script id="document" type="application/json">{"voices": [{"id": "A1", "name": "A & B"}]}</script>"#,
        );
        let doc = locate_payload(&html).unwrap();
        assert_eq!(doc["voices"][0]["name"], "A & B");
    }

    #[test]
    fn test_missing_payload() {
        let html = page(r#"<script type="application/json">{}</script>"#);
        assert!(matches!(
            locate_payload(&html).unwrap_err(),
            CleanerError::MissingPayload
        ));

        let html = page(r#"<script id="document" type="text/javascript">{}</script>"#);
        assert!(matches!(
            locate_payload(&html).unwrap_err(),
            CleanerError::MissingPayload
        ));
    }

    #[test]
    fn test_empty_payload_is_malformed() {
        let html = page(r#"<script id="document" type="application/json"></script>"#);
        assert!(matches!(
            locate_payload(&html).unwrap_err(),
            CleanerError::MalformedJson(_)
        ));
    }

    #[test]
    fn test_first_payload_wins() {
        let html = page(
            r#"<script id="document" type="application/json">{"n": 1}</script>
               <script id="document" type="application/json">{"n": 2}</script>"#,
        );
        assert_eq!(locate_payload(&html).unwrap()["n"], 1);
    }
}
