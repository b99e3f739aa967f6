//! In-memory `CommerceApi` used by the unit tests in this crate.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use chrono::Utc;
use storefront_api::{ApiError, CommerceApi, EligibilityResponse};
use storefront_core::{
    FulfillmentPoint, ItemId, NewReview, Pagination, PointId, Region, Review, ReviewPage,
    SubRegion, User,
};

pub(crate) fn point(id: &str) -> FulfillmentPoint {
    FulfillmentPoint {
        id: PointId::new(id),
        name: format!("Point {id}"),
        address: "1 Test Rd".to_string(),
        city: "Test City".to_string(),
        phone: None,
        email: None,
        operating_hours: None,
        capacity: None,
    }
}

fn status_error(status: u16, message: &str) -> ApiError {
    ApiError::Status {
        status,
        message: message.to_string(),
    }
}

enum PointsReply {
    Points(Vec<FulfillmentPoint>),
    Fail(u16),
}

/// Behaves like a tiny commerce backend: a user may review an item once
/// they have purchased it, and only once.
#[derive(Default)]
pub(crate) struct FakeApi {
    points: RefCell<HashMap<(String, String), PointsReply>>,
    point_calls: Cell<usize>,
    purchased: Cell<bool>,
    eligibility_failure: Cell<Option<u16>>,
    eligibility_override: RefCell<Option<EligibilityResponse>>,
    eligibility_calls: Cell<usize>,
    create_failure: RefCell<Option<(u16, String)>>,
    create_calls: Cell<usize>,
    list_failure: Cell<Option<u16>>,
    list_calls: Cell<usize>,
    reviews: RefCell<Vec<Review>>,
    reviewed: RefCell<HashSet<(String, String)>>,
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_points(&self, region: &str, sub_region: &str, ids: &[&str]) {
        self.points.borrow_mut().insert(
            (region.to_string(), sub_region.to_string()),
            PointsReply::Points(ids.iter().map(|id| point(id)).collect()),
        );
    }

    pub(crate) fn fail_points(&self, region: &str, sub_region: &str, status: u16) {
        self.points.borrow_mut().insert(
            (region.to_string(), sub_region.to_string()),
            PointsReply::Fail(status),
        );
    }

    pub(crate) fn point_calls(&self) -> usize {
        self.point_calls.get()
    }

    pub(crate) fn set_purchased(&self, purchased: bool) {
        self.purchased.set(purchased);
    }

    pub(crate) fn fail_eligibility(&self, status: Option<u16>) {
        self.eligibility_failure.set(status);
    }

    pub(crate) fn override_eligibility(&self, response: EligibilityResponse) {
        *self.eligibility_override.borrow_mut() = Some(response);
    }

    pub(crate) fn eligibility_calls(&self) -> usize {
        self.eligibility_calls.get()
    }

    pub(crate) fn fail_create(&self, status: u16, message: &str) {
        *self.create_failure.borrow_mut() = Some((status, message.to_string()));
    }

    pub(crate) fn clear_create_failure(&self) {
        *self.create_failure.borrow_mut() = None;
    }

    pub(crate) fn create_calls(&self) -> usize {
        self.create_calls.get()
    }

    pub(crate) fn fail_list(&self, status: Option<u16>) {
        self.list_failure.set(status);
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.list_calls.get()
    }

    pub(crate) fn seed_review(&self, rating: u8) {
        let mut reviews = self.reviews.borrow_mut();
        let id = format!("seed-{}", reviews.len() + 1);
        reviews.push(Review {
            id,
            rating,
            comment: "seeded".to_string(),
            title: None,
            author: None,
            created_at: Some(Utc::now()),
        });
    }
}

impl CommerceApi for FakeApi {
    async fn fulfillment_points(
        &self,
        region: &Region,
        sub_region: &SubRegion,
    ) -> Result<Vec<FulfillmentPoint>, ApiError> {
        self.point_calls.set(self.point_calls.get() + 1);
        let key = (region.as_str().to_string(), sub_region.as_str().to_string());
        match self.points.borrow().get(&key) {
            Some(PointsReply::Points(points)) => Ok(points.clone()),
            Some(PointsReply::Fail(status)) => Err(status_error(*status, "lookup failed")),
            None => Ok(Vec::new()),
        }
    }

    async fn review_eligibility(
        &self,
        user: &User,
        item: &ItemId,
    ) -> Result<EligibilityResponse, ApiError> {
        self.eligibility_calls.set(self.eligibility_calls.get() + 1);
        if let Some(status) = self.eligibility_failure.get() {
            return Err(status_error(status, "eligibility unavailable"));
        }
        if let Some(response) = self.eligibility_override.borrow().clone() {
            return Ok(response);
        }
        let key = (user.id.clone(), item.as_str().to_string());
        let response = if !self.purchased.get() {
            EligibilityResponse {
                can_review: false,
                reason: Some("purchase_required".to_string()),
            }
        } else if self.reviewed.borrow().contains(&key) {
            EligibilityResponse {
                can_review: false,
                reason: Some("already_reviewed".to_string()),
            }
        } else {
            EligibilityResponse {
                can_review: true,
                reason: None,
            }
        };
        Ok(response)
    }

    async fn create_review(
        &self,
        user: &User,
        item: &ItemId,
        review: &NewReview,
    ) -> Result<Review, ApiError> {
        self.create_calls.set(self.create_calls.get() + 1);
        if let Some((status, message)) = self.create_failure.borrow().clone() {
            return Err(status_error(status, &message));
        }
        let created = Review {
            id: format!("r-{}", self.create_calls.get()),
            rating: review.rating,
            comment: review.comment.clone(),
            title: review.title.clone(),
            author: Some(user.id.clone()),
            created_at: Some(Utc::now()),
        };
        self.reviews.borrow_mut().push(created.clone());
        self.reviewed
            .borrow_mut()
            .insert((user.id.clone(), item.as_str().to_string()));
        Ok(created)
    }

    async fn list_reviews(
        &self,
        _item: &ItemId,
        page: u32,
        limit: u32,
    ) -> Result<ReviewPage, ApiError> {
        self.list_calls.set(self.list_calls.get() + 1);
        if let Some(status) = self.list_failure.get() {
            return Err(status_error(status, "reviews unavailable"));
        }
        let reviews = self.reviews.borrow();
        let skip = (page.saturating_sub(1) * limit) as usize;
        let data: Vec<Review> = reviews.iter().skip(skip).take(limit as usize).cloned().collect();
        let total = reviews.len() as u64;
        Ok(ReviewPage {
            reviews: data,
            pagination: Pagination {
                page,
                limit,
                total,
                total_pages: u32::try_from(total.div_ceil(u64::from(limit.max(1)))).unwrap_or(0),
            },
        })
    }
}
