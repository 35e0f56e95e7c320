use feed_rs::{model::Entry, parser};
use reqwest::{header, Client, StatusCode};
use thiserror::Error;

pub const UNTITLED: &str = "Untitled";
pub const NO_DESCRIPTION: &str = "No description available";

// See: https://stackoverflow.com/a/7001617/5155484
const FEED_ACCEPT: &str = "application/rss+xml, application/rdf+xml, application/atom+xml, application/xml;q=0.9, text/xml;q=0.8";
const FEED_USER_AGENT: &str = concat!("ghlfeed/", env!("CARGO_PKG_VERSION"));

/// One post candidate drawn from a feed `<item>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    /// Raw (usually HTML) description
    pub content: String,
    pub published_at: Option<String>,
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to fetch feed {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("feed {url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },
    #[error("unable to parse feed: {0}")]
    Parse(#[from] parser::ParseFeedError),
}

/// A parsed feed. Items are produced on demand by [`FeedDocument::items`],
/// which can be called any number of times.
#[derive(Debug)]
pub struct FeedDocument {
    entries: Vec<Entry>,
    max_items: usize,
}

impl FeedDocument {
    pub fn parse(body: &[u8], max_items: usize) -> Result<Self, FeedError> {
        let parsed = parser::parse(body)?;
        Ok(Self {
            entries: parsed.entries,
            max_items,
        })
    }

    /// Items in document order, truncated to the configured maximum.
    pub fn items(&self) -> impl Iterator<Item = FeedItem> + '_ {
        self.entries
            .iter()
            .take(self.max_items)
            .map(FeedItem::from_entry)
    }

    /// Number of items [`FeedDocument::items`] yields.
    pub fn len(&self) -> usize {
        self.entries.len().min(self.max_items)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FeedItem {
    fn from_entry(entry: &Entry) -> Self {
        let title = non_blank(entry.title.as_ref().map(|t| t.content.as_str()))
            .unwrap_or(UNTITLED)
            .to_string();
        let content = non_blank(entry.summary.as_ref().map(|s| s.content.as_str()))
            .unwrap_or(NO_DESCRIPTION)
            .to_string();
        let published_at = entry.published.map(|p| p.to_rfc2822());

        FeedItem {
            title,
            content,
            published_at,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone)]
pub struct FeedReader {
    client: Client,
    max_items: usize,
}

impl FeedReader {
    pub fn new(max_items: usize) -> Self {
        Self::with_client(Client::new(), max_items)
    }

    pub fn with_client(client: Client, max_items: usize) -> Self {
        Self { client, max_items }
    }

    pub async fn fetch(&self, url: &str) -> Result<FeedDocument, FeedError> {
        tracing::info!(feed_url = url, "Fetching RSS feed");

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, FEED_ACCEPT)
            .header(header::USER_AGENT, FEED_USER_AGENT)
            .send()
            .await
            .map_err(|source| FeedError::Fetch {
                url: url.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            tracing::warn!(
                feed_url = url,
                status = %response.status(),
                "Got non-success response for feed"
            );
            return Err(FeedError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }

        let body = response.bytes().await.map_err(|source| FeedError::Fetch {
            url: url.to_string(),
            source,
        })?;

        let document = FeedDocument::parse(&body, self.max_items)?;
        tracing::info!(
            feed_url = url,
            entries = document.entries.len(),
            item_count = document.len(),
            "Parsed feed"
        );
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn rss(items: &[&str]) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Grazing Grass</title>
    <link>https://example.com</link>
    <description>A podcast</description>
    {}
  </channel>
</rss>"#,
            items.join("\n")
        )
    }

    fn episode(n: usize) -> String {
        format!(
            "<item><title>Episode {n}</title><description>&lt;p&gt;Show notes {n}&lt;/p&gt;</description><pubDate>Mon, 06 Sep 2021 16:45:00 +0000</pubDate><guid>ep-{n}</guid></item>"
        )
    }

    #[test]
    fn test_items_in_document_order_truncated() {
        let items: Vec<String> = (1..=7).map(episode).collect();
        let refs: Vec<&str> = items.iter().map(String::as_str).collect();
        let doc = FeedDocument::parse(rss(&refs).as_bytes(), 5).unwrap();

        let titles: Vec<String> = doc.items().map(|i| i.title).collect();
        assert_eq!(
            titles,
            vec!["Episode 1", "Episode 2", "Episode 3", "Episode 4", "Episode 5"]
        );
        assert_eq!(doc.len(), 5);
    }

    #[test]
    fn test_fewer_items_than_limit() {
        let items = [episode(1), episode(2)];
        let refs: Vec<&str> = items.iter().map(String::as_str).collect();
        let doc = FeedDocument::parse(rss(&refs).as_bytes(), 5).unwrap();
        assert_eq!(doc.items().count(), 2);
    }

    #[test]
    fn test_items_can_be_iterated_again() {
        let items = [episode(1), episode(2)];
        let refs: Vec<&str> = items.iter().map(String::as_str).collect();
        let doc = FeedDocument::parse(rss(&refs).as_bytes(), 1).unwrap();

        let first: Vec<FeedItem> = doc.items().collect();
        let second: Vec<FeedItem> = doc.items().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn test_description_is_raw_html() {
        let item = episode(3);
        let doc = FeedDocument::parse(rss(&[&item]).as_bytes(), 5).unwrap();
        let first = doc.items().next().unwrap();
        assert!(first.content.contains("<p>Show notes 3</p>"));
        assert!(first.published_at.unwrap().contains("2021"));
    }

    #[test]
    fn test_missing_fields_use_placeholders() {
        let doc = FeedDocument::parse(
            rss(&["<item><guid>no-fields</guid></item>"]).as_bytes(),
            5,
        )
        .unwrap();
        let item = doc.items().next().unwrap();
        assert_eq!(item.title, UNTITLED);
        assert_eq!(item.content, NO_DESCRIPTION);
        assert_eq!(item.published_at, None);
    }

    #[test]
    fn test_missing_description_only() {
        let doc = FeedDocument::parse(
            rss(&["<item><title>Only a title</title></item>"]).as_bytes(),
            5,
        )
        .unwrap();
        let item = doc.items().next().unwrap();
        assert_eq!(item.title, "Only a title");
        assert_eq!(item.content, NO_DESCRIPTION);
    }

    #[test]
    fn test_not_xml_is_parse_error() {
        let result = FeedDocument::parse(b"this is definitely not a feed", 5);
        assert!(matches!(result, Err(FeedError::Parse(_))));
    }

    #[actix_web::test]
    async fn test_fetch_from_server() {
        let server = MockServer::start().await;
        let items = [episode(1), episode(2)];
        let refs: Vec<&str> = items.iter().map(String::as_str).collect();
        Mock::given(method("GET"))
            .and(path("/feed.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(rss(&refs)))
            .expect(1)
            .mount(&server)
            .await;

        let reader = FeedReader::new(5);
        let doc = reader
            .fetch(&format!("{}/feed.xml", server.uri()))
            .await
            .unwrap();
        assert_eq!(doc.len(), 2);
    }

    #[actix_web::test]
    async fn test_fetch_malformed_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>oops"))
            .mount(&server)
            .await;

        let reader = FeedReader::new(5);
        let result = reader.fetch(&format!("{}/feed.xml", server.uri())).await;
        assert!(matches!(result, Err(FeedError::Parse(_))));
    }

    #[actix_web::test]
    async fn test_fetch_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let reader = FeedReader::new(5);
        let result = reader.fetch(&format!("{}/missing.xml", server.uri())).await;
        assert!(matches!(result, Err(FeedError::Status { .. })));
    }

    #[actix_web::test]
    async fn test_unreachable_host_is_fetch_error() {
        let reader = FeedReader::new(5);
        let result = reader.fetch("http://127.0.0.1:1/feed.xml").await;
        assert!(matches!(result, Err(FeedError::Fetch { .. })));
    }
}
