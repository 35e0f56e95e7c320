use reqwest::header;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::client::{decode, error_message, read_body, send, GhlClient, GhlError};
use super::oauth::AccessToken;
use crate::feed::FeedItem;

pub const BLOG_POSTS_PATH: &str = "/v2/blogs/posts";
pub const BLOGS_PATH: &str = "/v2/blogs";
pub const STATUS_PUBLISHED: &str = "PUBLISHED";

#[derive(Debug, Serialize)]
pub struct BlogPostPayload<'a> {
    pub location_id: &'a str,
    pub title: &'a str,
    pub content: &'a str,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog_id: Option<&'a str>,
}

impl<'a> BlogPostPayload<'a> {
    pub fn new(item: &'a FeedItem, location_id: &'a str, blog_id: Option<&'a str>) -> Self {
        Self {
            location_id,
            title: &item.title,
            content: &item.content,
            status: STATUS_PUBLISHED,
            blog_id,
        }
    }
}

#[derive(Debug, Deserialize)]
struct BlogList {
    blogs: Option<Vec<Value>>,
}

impl GhlClient {
    /// Creates a published blog post from one feed item and returns the
    /// platform's response body. Any status >= 400 is an error.
    pub async fn publish_post(
        &self,
        item: &FeedItem,
        token: &AccessToken,
        location_id: &str,
        blog_id: Option<&str>,
    ) -> Result<Value, GhlError> {
        let endpoint = self.endpoint(BLOG_POSTS_PATH);
        let payload = BlogPostPayload::new(item, location_id, blog_id);

        let request = self
            .http()
            .post(&endpoint)
            .header(header::AUTHORIZATION, token.bearer())
            .json(&payload);

        let response = send(request, &endpoint).await?;
        let status = response.status();
        let body = read_body(response, &endpoint).await?;

        if status.as_u16() >= 400 {
            let message = error_message(&body).unwrap_or_else(|| "Blog post failed".to_string());
            tracing::warn!(
                status = status.as_u16(),
                title = %item.title,
                message = %message,
                "Blog post rejected"
            );
            return Err(GhlError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let posted: Value = decode(&body, &endpoint)?;
        tracing::info!(title = %item.title, location_id, "Blog post published");
        Ok(posted)
    }

    /// Lists the blogs that exist for a location.
    pub async fn list_blogs(
        &self,
        location_id: &str,
        token: &AccessToken,
    ) -> Result<Vec<Value>, GhlError> {
        let endpoint = self.endpoint(BLOGS_PATH);

        let request = self
            .http()
            .get(&endpoint)
            .query(&[("location_id", location_id)])
            .header(header::AUTHORIZATION, token.bearer());

        let response = send(request, &endpoint).await?;
        let status = response.status();
        let body = read_body(response, &endpoint).await?;

        if !status.is_success() {
            let message = error_message(&body).unwrap_or(body);
            return Err(GhlError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let list: BlogList = decode(&body, &endpoint)?;
        Ok(list.blogs.unwrap_or_default())
    }
}
