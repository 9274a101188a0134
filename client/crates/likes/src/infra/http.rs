//! REST Backend Adapter
//!
//! Talks to the managed backend's REST surface: the `add_like` procedure
//! for submissions and row-count reads for the counters. One request per
//! call, no retries; a retried submission could record a duplicate like.

use crate::domain::entities::FeaturedImage;
use crate::domain::repository::LikeApi;
use crate::domain::value_objects::SubmitOutcome;
use crate::error::{LikeError, LikeResult};
use kernel::id::{ImageId, VisitorId};
use reqwest::header::HeaderMap;
use serde::Deserialize;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HttpLikeApi {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl HttpLikeApi {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> LikeResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        })
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    /// Exact row count via a HEAD request, read from the Content-Range header
    async fn exact_count(&self, url: String) -> LikeResult<u64> {
        let response = self
            .authed(self.http.head(&url))
            .header("Prefer", "count=exact")
            .send()
            .await?
            .error_for_status()?;

        parse_content_range(response.headers())
    }
}

/// Structured body of the `add_like` procedure
#[derive(Debug, Deserialize)]
struct AddLikeBody {
    success: bool,
    #[serde(default)]
    remaining_seconds: Option<u32>,
    #[serde(default)]
    message: Option<String>,
}

/// Row shape of the curated images table
#[derive(Debug, Deserialize)]
struct ImageRow {
    id: ImageId,
    url: String,
    title: Option<String>,
    #[serde(default)]
    is_ai_generated: bool,
}

impl From<ImageRow> for FeaturedImage {
    fn from(row: ImageRow) -> Self {
        FeaturedImage {
            id: row.id,
            url: row.url,
            title: row.title,
            is_ai_generated: row.is_ai_generated,
        }
    }
}

impl LikeApi for HttpLikeApi {
    async fn submit_like(
        &self,
        image_id: ImageId,
        visitor_id: VisitorId,
    ) -> LikeResult<SubmitOutcome> {
        let url = format!("{}/rest/v1/rpc/add_like", self.base_url);

        let response = self
            .authed(self.http.post(&url))
            .json(&serde_json::json!({
                "p_image_id": image_id,
                "p_visitor_id": visitor_id,
            }))
            .send()
            .await?
            .error_for_status()?;

        let payload: serde_json::Value = response.json().await?;
        parse_add_like(payload)
    }

    async fn like_count(&self, image_id: ImageId) -> LikeResult<u64> {
        self.exact_count(format!(
            "{}/rest/v1/likes?select=id&image_id=eq.{}",
            self.base_url, image_id
        ))
        .await
    }

    async fn total_likes(&self) -> LikeResult<u64> {
        self.exact_count(format!("{}/rest/v1/likes?select=id", self.base_url))
            .await
    }

    async fn featured_image(&self) -> LikeResult<Option<FeaturedImage>> {
        let url = format!(
            "{}/rest/v1/images?select=id,url,title,is_ai_generated&is_selected=eq.true&limit=1",
            self.base_url
        );

        let rows: Vec<ImageRow> = self
            .authed(self.http.get(&url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(rows.into_iter().next().map(FeaturedImage::from))
    }
}

/// Interpret the raw procedure payload
///
/// Older deployments of the procedure returned a bare boolean; current ones
/// return `{success, remaining_seconds?, message?}`. Both are accepted here
/// and nowhere else.
fn parse_add_like(payload: serde_json::Value) -> LikeResult<SubmitOutcome> {
    match payload {
        serde_json::Value::Bool(true) => Ok(SubmitOutcome::Accepted),
        serde_json::Value::Bool(false) => Ok(SubmitOutcome::Throttled {
            remaining_seconds: 0,
        }),
        serde_json::Value::Object(_) => {
            let body: AddLikeBody = serde_json::from_value(payload)
                .map_err(|e| LikeError::Protocol(format!("malformed add_like body: {}", e)))?;

            if body.success {
                Ok(SubmitOutcome::Accepted)
            } else {
                if let Some(message) = &body.message {
                    tracing::debug!(message = %message, "add_like rejected");
                }
                Ok(SubmitOutcome::Throttled {
                    remaining_seconds: body.remaining_seconds.unwrap_or(0),
                })
            }
        }
        other => Err(LikeError::Protocol(format!(
            "unexpected add_like payload: {}",
            other
        ))),
    }
}

/// Total row count from a `Content-Range` header like `0-0/57` or `*/0`
fn parse_content_range(headers: &HeaderMap) -> LikeResult<u64> {
    let raw = headers
        .get("content-range")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| LikeError::Protocol("missing content-range header".to_string()))?;

    raw.rsplit('/')
        .next()
        .and_then(|total| total.parse::<u64>().ok())
        .ok_or_else(|| LikeError::Protocol(format!("unparseable content-range: {}", raw)))
}
