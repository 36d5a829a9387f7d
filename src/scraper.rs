//! Web scraping module for content extraction.
//!
//! Uses reqwest for fetching and scraper for HTML parsing.

use lazy_static::lazy_static;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use thiserror::Error;

use crate::config::FetchConfig;
use crate::document::Document;

/// Blocks shorter than this are treated as navigation noise (headings excepted)
const MIN_BLOCK_CHARS: usize = 20;

/// Containers that usually hold the main content, most specific first
const MAIN_SELECTORS: [&str; 5] = ["article", "main", "[role='main']", ".content", "#content"];

lazy_static! {
    static ref TITLE: Selector = Selector::parse("title").unwrap();
    static ref H1: Selector = Selector::parse("h1").unwrap();
    static ref BLOCKS: Selector =
        Selector::parse("p, h1, h2, h3, h4, h5, h6, li, blockquote, pre").unwrap();
}

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("failed to build HTTP client: {0}")]
    ClientError(#[source] reqwest::Error),
    #[error("failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),
    #[error("no readable content found at URL")]
    NoContent,
}

/// Fetches webpages and extracts their visible text.
#[derive(Debug, Clone)]
pub struct WebLoader {
    client: Client,
}

impl WebLoader {
    /// Create a loader with the configured User-Agent, timeout and TLS policy
    pub fn new(config: &FetchConfig) -> Result<Self, ScraperError> {
        if config.accept_invalid_certs {
            tracing::warn!("TLS certificate verification is disabled for webpage requests");
        }

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(ScraperError::ClientError)?;

        Ok(Self { client })
    }

    /// Fetch a URL and extract its content into a web document
    pub async fn load(&self, url: &str) -> Result<Document, ScraperError> {
        tracing::debug!(url, "fetching webpage");

        let response = self.client.get(url).send().await?.error_for_status()?;
        let html = response.text().await?;

        let document = extract_document(url, &html)?;
        tracing::debug!(url, chars = document.len(), "extracted webpage text");
        Ok(document)
    }
}

/// Parse HTML and build a document from its readable text
pub fn extract_document(url: &str, html: &str) -> Result<Document, ScraperError> {
    let page = Html::parse_document(html);

    let text = extract_text(&page);
    if text.trim().is_empty() {
        return Err(ScraperError::NoContent);
    }

    Ok(Document::web(url, extract_title(&page), text))
}

/// Extract the page title from <title> or <h1>
fn extract_title(page: &Html) -> Option<String> {
    [&*TITLE, &*H1].into_iter().find_map(|selector| {
        page.select(selector)
            .next()
            .map(|element| collapse_whitespace(&element.text().collect::<String>()))
            .filter(|title| !title.is_empty())
    })
}

/// Extract readable text content from the page
fn extract_text(page: &Html) -> String {
    // Try to find main content areas first
    for selector_str in MAIN_SELECTORS {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(element) = page.select(&selector).next() {
                let text = extract_blocks(element);
                if !text.is_empty() {
                    return text;
                }
            }
        }
    }

    // Fall back to the whole document
    extract_blocks(page.root_element())
}

/// Extract text from paragraphs, headings and list items under `root`
fn extract_blocks(root: ElementRef<'_>) -> String {
    let mut blocks: Vec<String> = Vec::new();

    for element in root.select(&BLOCKS) {
        // Nested blocks (a <p> inside an <li>) are covered by their ancestor
        if has_block_ancestor(element, root) {
            continue;
        }

        let cleaned = collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "));
        let is_heading = matches!(element.value().name(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6");

        if !cleaned.is_empty() && (is_heading || cleaned.chars().count() > MIN_BLOCK_CHARS) {
            blocks.push(cleaned);
        }
    }

    blocks.join("\n\n")
}

fn has_block_ancestor(element: ElementRef<'_>, root: ElementRef<'_>) -> bool {
    element
        .ancestors()
        .take_while(|node| node.id() != root.id())
        .filter_map(ElementRef::wrap)
        .any(|ancestor| BLOCKS.matches(&ancestor))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Source;

    const ARTICLE: &str = r#"
        <html>
          <head><title>  Rust 2024 Edition  </title><style>p { color: red; }</style></head>
          <body>
            <nav><li>Home</li><li>A navigation entry that is long enough</li></nav>
            <article>
              <h1>Announcing</h1>
              <p>The   Rust team is happy to announce
                 a new edition of the language.</p>
              <p>Short.</p>
              <ul><li><p>Nested paragraph inside a list item, counted once.</p></li></ul>
              <script>var tracking = "should never appear in the text";</script>
            </article>
          </body>
        </html>"#;

    #[test]
    fn extracts_main_article_text() {
        let doc = extract_document("https://blog.example.com/post", ARTICLE).unwrap();

        assert_eq!(doc.source(), Source::Web);
        assert_eq!(doc.title(), Some("Rust 2024 Edition"));
        assert_eq!(
            doc.text(),
            "Announcing\n\n\
             The Rust team is happy to announce a new edition of the language.\n\n\
             Nested paragraph inside a list item, counted once."
        );
        assert!(!doc.text().contains("navigation"));
        assert!(!doc.text().contains("tracking"));
    }

    #[test]
    fn falls_back_to_whole_page() {
        let html = "<html><body><div><p>Plain page without any article container.</p></div></body></html>";
        let doc = extract_document("https://example.com", html).unwrap();
        assert_eq!(doc.text(), "Plain page without any article container.");
        assert_eq!(doc.title(), None);
    }

    #[test]
    fn title_falls_back_to_h1() {
        let html = "<html><head><title> </title></head><body><h1>Heading Title</h1></body></html>";
        let doc = extract_document("https://example.com", html).unwrap();
        assert_eq!(doc.title(), Some("Heading Title"));
    }

    #[test]
    fn empty_page_has_no_content() {
        let html = "<html><body><script>only()</script><p>tiny</p></body></html>";
        assert!(matches!(
            extract_document("https://example.com", html),
            Err(ScraperError::NoContent)
        ));
    }

    #[tokio::test]
    async fn loads_page_with_browser_user_agent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/article")
            .match_header("user-agent", crate::config::DEFAULT_USER_AGENT)
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(ARTICLE)
            .create_async()
            .await;

        let loader = WebLoader::new(&FetchConfig::default()).unwrap();
        let url = format!("{}/article", server.url());
        let doc = loader.load(&url).await.unwrap();

        assert_eq!(doc.url(), url);
        assert!(doc.text().starts_with("Announcing"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn http_error_status_is_a_fetch_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let loader = WebLoader::new(&FetchConfig::default()).unwrap();
        let result = loader.load(&format!("{}/missing", server.url())).await;

        assert!(matches!(result, Err(ScraperError::FetchError(_))));
        mock.assert_async().await;
    }
}
