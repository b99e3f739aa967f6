//! HTTP client for the commerce REST API.
//!
//! Wraps `reqwest` with bearer-token handling, typed response
//! deserialization, and extraction of the server's human-readable error
//! message into [`ApiError::Status`].

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use storefront_core::{
    AppConfig, FulfillmentPoint, ItemId, NewReview, Region, Review, ReviewPage, SubRegion, User,
};

use crate::commerce::CommerceApi;
use crate::error::ApiError;
use crate::types::{
    EligibilityResponse, Envelope, ErrorBody, PointListResponse, ReviewListResponse,
};

/// Client for the commerce REST API.
///
/// Holds one pooled `reqwest::Client`; cheap to share by reference.
pub struct CommerceClient {
    client: Client,
    base_url: Url,
}

impl CommerceClient {
    /// Creates a client rooted at `base_url` (e.g. `https://api.example.com/v1`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`ApiError::InvalidBaseUrl`] if `base_url` is not
    /// an absolute hierarchical URL.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise to exactly one trailing slash so endpoint segments are
        // appended below the configured path instead of replacing its tail.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ApiError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: "URL cannot be used as a base".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Builds a client from the loaded application configuration.
    ///
    /// # Errors
    ///
    /// See [`CommerceClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Self::new(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot be used as a base".to_owned(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends the request and decodes a 2xx body as `T`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::Status`] on any non-2xx status, carrying the server's
    ///   message.
    /// - [`ApiError::Deserialize`] if a 2xx body does not match `T`.
    async fn send_json<T: DeserializeOwned>(
        request: RequestBuilder,
        context: &str,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: extract_message(&body, status),
            });
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

/// Picks the human-readable message out of an error body.
///
/// Prefers `message`, then `error`, then the canonical reason phrase for
/// the status code.
fn extract_message(body: &str, status: StatusCode) -> String {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    parsed
        .message
        .or(parsed.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_owned()
        })
}

impl CommerceApi for CommerceClient {
    async fn fulfillment_points(
        &self,
        region: &Region,
        sub_region: &SubRegion,
    ) -> Result<Vec<FulfillmentPoint>, ApiError> {
        let mut url = self.endpoint(&["fulfillment-points"])?;
        url.query_pairs_mut()
            .append_pair("region", region.as_str())
            .append_pair("sub_region", sub_region.as_str());

        let context = format!("fulfillment-points(region={region}, sub_region={sub_region})");
        match Self::send_json::<PointListResponse>(self.client.get(url), &context).await {
            Ok(list) => Ok(list.data),
            Err(ApiError::Status { status: 404, .. }) => {
                tracing::debug!(%region, %sub_region, "no fulfillment points for location");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    async fn review_eligibility(
        &self,
        user: &User,
        item: &ItemId,
    ) -> Result<EligibilityResponse, ApiError> {
        let url = self.endpoint(&["products", item.as_str(), "reviews", "eligibility"])?;
        let request = self.client.get(url).bearer_auth(user.access_token());
        let envelope: Envelope<EligibilityResponse> =
            Self::send_json(request, &format!("review-eligibility(item={item})")).await?;
        Ok(envelope.into_inner())
    }

    async fn create_review(
        &self,
        user: &User,
        item: &ItemId,
        review: &NewReview,
    ) -> Result<Review, ApiError> {
        let url = self.endpoint(&["products", item.as_str(), "reviews"])?;
        let request = self
            .client
            .post(url)
            .bearer_auth(user.access_token())
            .json(review);
        let envelope: Envelope<Review> =
            Self::send_json(request, &format!("create-review(item={item})")).await?;
        Ok(envelope.into_inner())
    }

    async fn list_reviews(
        &self,
        item: &ItemId,
        page: u32,
        limit: u32,
    ) -> Result<ReviewPage, ApiError> {
        let mut url = self.endpoint(&["products", item.as_str(), "reviews"])?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());

        let list: ReviewListResponse = Self::send_json(
            self.client.get(url),
            &format!("list-reviews(item={item}, page={page})"),
        )
        .await?;

        Ok(ReviewPage {
            reviews: list.data,
            pagination: list.pagination,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
