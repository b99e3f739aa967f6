use storefront_core::{FulfillmentPoint, ItemId, NewReview, Region, Review, ReviewPage, SubRegion, User};

use crate::error::ApiError;
use crate::types::EligibilityResponse;

/// Operations the storefront needs from the commerce backend.
///
/// Everything runs on a single cooperative task, so the returned futures
/// are not required to be `Send`.
#[allow(async_fn_in_trait)]
pub trait CommerceApi {
    /// Fulfillment points serving `(region, sub_region)`.
    ///
    /// "None found" is an empty list, not an error.
    async fn fulfillment_points(
        &self,
        region: &Region,
        sub_region: &SubRegion,
    ) -> Result<Vec<FulfillmentPoint>, ApiError>;

    /// Whether `user` may review `item`.
    async fn review_eligibility(
        &self,
        user: &User,
        item: &ItemId,
    ) -> Result<EligibilityResponse, ApiError>;

    async fn create_review(
        &self,
        user: &User,
        item: &ItemId,
        review: &NewReview,
    ) -> Result<Review, ApiError>;

    /// One page of reviews for `item`. `page` is 1-based.
    async fn list_reviews(
        &self,
        item: &ItemId,
        page: u32,
        limit: u32,
    ) -> Result<ReviewPage, ApiError>;
}
