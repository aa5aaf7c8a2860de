//! Lightweight HTML parsing helpers shared by the fetcher and strategies.
//!
//! Regex-based rather than a full DOM parse; the pipeline only needs visible
//! text, the document title, and anchors with their link text.

use url::Url;

/// A hyperlink with its visible anchor text.
#[derive(Debug, Clone)]
pub struct Link {
    pub url: String,
    pub text: String,
}

/// Convert HTML to plain text.
///
/// Drops scripts and styles, turns block elements into line breaks, strips
/// remaining tags, and decodes common entities.
pub fn html_to_text(html: &str) -> String {
    let mut text = html.to_string();

    let script_re = regex::Regex::new(r"(?s)<script[^>]*>.*?</script>").unwrap();
    let style_re = regex::Regex::new(r"(?s)<style[^>]*>.*?</style>").unwrap();
    text = script_re.replace_all(&text, " ").to_string();
    text = style_re.replace_all(&text, " ").to_string();

    let block_re = regex::Regex::new(r"(?i)</?(p|div|li|ul|ol|h[1-6]|tr|section|article|header|footer)[^>]*>|<br\s*/?>").unwrap();
    text = block_re.replace_all(&text, "\n").to_string();

    let tag_re = regex::Regex::new(r"<[^>]+>").unwrap();
    text = tag_re.replace_all(&text, " ").to_string();

    text = text
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    let spaces_re = regex::Regex::new(r"[ \t]{2,}").unwrap();
    text = spaces_re.replace_all(&text, " ").to_string();
    let newlines_re = regex::Regex::new(r"\n{3,}").unwrap();
    text = newlines_re.replace_all(&text, "\n\n").to_string();

    text.trim().to_string()
}

/// Extract the document title, if any.
pub fn extract_title(html: &str) -> Option<String> {
    let title_re = regex::Regex::new(r"(?is)<title[^>]*>(.*?)</title>").ok()?;
    title_re
        .captures(html)
        .and_then(|cap| cap.get(1))
        .map(|m| html_to_text(m.as_str()))
        .filter(|t| !t.is_empty())
}

/// Extract the first `<h1>` heading, if any.
pub fn extract_heading(html: &str) -> Option<String> {
    let h1_re = regex::Regex::new(r"(?is)<h1[^>]*>(.*?)</h1>").ok()?;
    h1_re
        .captures(html)
        .and_then(|cap| cap.get(1))
        .map(|m| html_to_text(m.as_str()))
        .filter(|t| !t.is_empty())
}

/// Extract anchors with resolved URLs and visible text.
///
/// Skips in-page anchors, javascript:, mailto:, and tel: links.
pub fn extract_links(base_url: &Url, html: &str) -> Vec<Link> {
    let anchor_re =
        regex::Regex::new(r#"(?is)<a[^>]*href\s*=\s*["']([^"']+)["'][^>]*>(.*?)</a>"#).unwrap();

    let mut links = Vec::new();
    for cap in anchor_re.captures_iter(html) {
        let href = cap.get(1).map(|m| m.as_str()).unwrap_or_default();
        if href.starts_with('#')
            || href.starts_with("javascript:")
            || href.starts_with("mailto:")
            || href.starts_with("tel:")
        {
            continue;
        }

        if let Ok(resolved) = base_url.join(href) {
            let text = cap
                .get(2)
                .map(|m| html_to_text(m.as_str()))
                .unwrap_or_default();
            links.push(Link {
                url: resolved.to_string(),
                text,
            });
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_to_text_strips_markup() {
        let html = r#"
            <script>var x = 1;</script>
            <h1>Acme Corp</h1>
            <p>Jane Doe, CEO of Acme Corp</p>
            <a href="/about">About &amp; Team</a>
        "#;
        let text = html_to_text(html);
        assert!(text.contains("Acme Corp"));
        assert!(text.contains("Jane Doe, CEO of Acme Corp"));
        assert!(text.contains("About & Team"));
        assert!(!text.contains("var x"));
        assert!(!text.contains('<'));
    }

    #[test]
    fn test_extract_title() {
        let html = "<html><head><title>Acme Corp | Home</title></head></html>";
        assert_eq!(extract_title(html), Some("Acme Corp | Home".to_string()));
        assert_eq!(extract_title("<body>no title</body>"), None);
    }

    #[test]
    fn test_extract_links_resolves_and_filters() {
        let base = Url::parse("https://example.com/page").unwrap();
        let html = r##"
            <a href="/team">Our Team</a>
            <a href="https://example.com/contact">Contact Us</a>
            <a href="#section">Anchor</a>
            <a href="mailto:info@example.com">Mail</a>
        "##;

        let links = extract_links(&base, html);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].url, "https://example.com/team");
        assert_eq!(links[0].text, "Our Team");
        assert!(!links.iter().any(|l| l.url.contains('#')));
    }
}
