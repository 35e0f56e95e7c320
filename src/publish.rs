use serde_json::Value;

use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::location_setting::LocationSetting;
use crate::state::AppState;

/// A publish run that stopped early. `published` holds the platform
/// responses for items posted before the failure; those posts stay live.
#[derive(Debug)]
pub struct PublishFailure {
    pub error: AppError,
    pub published: Vec<Value>,
}

impl From<AppError> for PublishFailure {
    fn from(error: AppError) -> Self {
        PublishFailure {
            error,
            published: Vec::new(),
        }
    }
}

/// Refresh a token, read the feed, then post each item in feed order. The
/// first failed post aborts the rest.
pub async fn publish_from_rss(
    state: &AppState,
    pool: &DbPool,
) -> Result<Vec<Value>, PublishFailure> {
    tracing::info!("Received request to publish blog posts from RSS");

    let settings = state.config.publish.require()?;
    let blog_id = selected_blog(pool, &settings.location_id)?;

    let token = state
        .ghl
        .refresh_access_token(&settings.credentials)
        .await
        .map_err(AppError::from)?;
    let feed = state
        .feed_reader
        .fetch(&settings.feed_url)
        .await
        .map_err(AppError::from)?;

    let mut results = Vec::with_capacity(feed.len());
    for item in feed.items() {
        match state
            .ghl
            .publish_post(&item, &token, &settings.location_id, blog_id.as_deref())
            .await
        {
            Ok(posted) => results.push(posted),
            Err(e) => {
                tracing::error!(
                    title = %item.title,
                    published = results.len(),
                    error = %e,
                    "Publishing stopped"
                );
                return Err(PublishFailure {
                    error: e.into(),
                    published: results,
                });
            }
        }
    }

    tracing::info!(
        location_id = %settings.location_id,
        published = results.len(),
        "Blog post results"
    );
    Ok(results)
}

fn selected_blog(pool: &DbPool, location_id: &str) -> Result<Option<String>, AppError> {
    let mut conn = pool.get()?;
    let setting = LocationSetting::get(&mut conn, location_id)?;
    Ok(setting.map(|s| s.blog_id))
}
