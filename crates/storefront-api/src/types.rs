//! Wire shapes for commerce API responses.
//!
//! Successful bodies usually wrap the payload in `{"data": ...}`; a few
//! endpoints return the payload bare. [`Envelope`] accepts either.

use serde::Deserialize;
use storefront_core::{FulfillmentPoint, Pagination, Review};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub(crate) fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } | Envelope::Bare(data) => data,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PointListResponse {
    #[serde(default)]
    pub data: Vec<FulfillmentPoint>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReviewListResponse {
    #[serde(default)]
    pub data: Vec<Review>,
    pub pagination: Pagination,
}

/// Raw eligibility verdict: `{ "canReview": bool, "reason"?: string }`.
///
/// `reason` is kept as free text; mapping it onto a closed set of codes is
/// the caller's job so unrecognised codes are not a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityResponse {
    pub can_review: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
