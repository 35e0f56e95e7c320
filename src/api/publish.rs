use actix_web::{post, HttpResponse, ResponseError};
use serde_json::json;

use crate::db::RqDbPool;
use crate::publish;
use crate::state::RqAppState;

/// Republishes the newest feed items as blog posts. Takes no body; the feed
/// and credentials come from process configuration.
#[post("/publish-from-rss")]
pub async fn publish_from_rss(state: RqAppState, pool: RqDbPool) -> HttpResponse {
    match publish::publish_from_rss(&state, &pool).await {
        Ok(results) => HttpResponse::Ok().json(json!({
            "status": "success",
            "results": results
        })),
        Err(failure) => {
            tracing::error!(error = %failure.error, "Publish from RSS failed");
            let mut body = failure.error.to_body();
            body["published"] = json!(failure.published);
            HttpResponse::build(failure.error.status_code()).json(body)
        }
    }
}
