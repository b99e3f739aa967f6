//! Integration tests for `CommerceClient` using wiremock HTTP mocks.

use serde_json::json;
use storefront_api::{ApiError, CommerceApi, CommerceClient};
use storefront_core::{ItemId, Region, ReviewDraft, SubRegion, User};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> CommerceClient {
    CommerceClient::new(base_url, 5, "storefront-test/0.1")
        .expect("client construction should not fail")
}

fn test_user() -> User {
    User::new("user-1", "test-token")
}

fn review_json(id: &str, rating: u8) -> serde_json::Value {
    json!({
        "id": id,
        "rating": rating,
        "comment": "Arrived on time",
        "title": null,
        "author": "Wanjiru",
        "createdAt": "2025-03-01T10:00:00Z"
    })
}

#[tokio::test]
async fn fulfillment_points_returns_parsed_points() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/fulfillment-points"))
        .and(query_param("region", "Nairobi"))
        .and(query_param("sub_region", "Westlands"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "id": "P1", "name": "Sarit Centre", "address": "Karuna Rd", "city": "Nairobi" },
                {
                    "id": "P2",
                    "name": "Westgate",
                    "address": "Mwanzi Rd",
                    "city": "Nairobi",
                    "phone": "+254700000000",
                    "operatingHours": { "monday": "08:00-18:00" },
                    "capacity": 40
                }
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let points = client
        .fulfillment_points(&Region::new("Nairobi"), &SubRegion::new("Westlands"))
        .await
        .expect("should parse points");

    assert_eq!(points.len(), 2);
    assert_eq!(points[0].id.as_str(), "P1");
    assert_eq!(points[1].capacity, Some(40));
}

#[tokio::test]
async fn fulfillment_points_not_found_is_empty_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/fulfillment-points"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "No pickup stations found" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let points = client
        .fulfillment_points(&Region::new("Turkana"), &SubRegion::new("Lodwar"))
        .await
        .expect("404 should map to an empty list");

    assert!(points.is_empty());
}

#[tokio::test]
async fn fulfillment_points_server_error_is_transient() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/fulfillment-points"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .fulfillment_points(&Region::new("Nairobi"), &SubRegion::new("Karen"))
        .await
        .expect_err("503 should be an error");

    assert!(err.is_transient(), "expected transient error, got: {err:?}");
}

#[tokio::test]
async fn fulfillment_points_malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/fulfillment-points"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .fulfillment_points(&Region::new("Nairobi"), &SubRegion::new("Karen"))
        .await
        .expect_err("garbage body should fail");

    assert!(matches!(err, ApiError::Deserialize { .. }), "got: {err:?}");
}

#[tokio::test]
async fn review_eligibility_sends_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/sku-9/reviews/eligibility"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "canReview": false,
            "reason": "purchase_required"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let verdict = client
        .review_eligibility(&test_user(), &ItemId::new("sku-9"))
        .await
        .expect("should parse eligibility");

    assert!(!verdict.can_review);
    assert_eq!(verdict.reason.as_deref(), Some("purchase_required"));
}

#[tokio::test]
async fn create_review_posts_validated_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/products/sku-9/reviews"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_json(json!({ "rating": 5, "comment": "Arrived on time" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "data": review_json("r-1", 5) })))
        .expect(1)
        .mount(&server)
        .await;

    let draft = ReviewDraft {
        rating: Some(5),
        comment: "  Arrived on time ".to_string(),
        title: None,
    };
    let payload = draft.validate().expect("draft is valid");

    let client = test_client(&server.uri());
    let created = client
        .create_review(&test_user(), &ItemId::new("sku-9"), &payload)
        .await
        .expect("should create review");

    assert_eq!(created.id, "r-1");
    assert_eq!(created.rating, 5);
}

#[tokio::test]
async fn create_review_accepts_echo_without_timestamp() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/products/sku-9/reviews"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": { "id": "r-2", "rating": 4, "comment": "Nice" }
        })))
        .mount(&server)
        .await;

    let draft = ReviewDraft {
        rating: Some(4),
        comment: "Nice".to_string(),
        title: None,
    };

    let client = test_client(&server.uri());
    let created = client
        .create_review(&test_user(), &ItemId::new("sku-9"), &draft.validate().unwrap())
        .await
        .expect("2xx without createdAt is still a created review");

    assert_eq!(created.id, "r-2");
    assert!(created.created_at.is_none());
}

#[tokio::test]
async fn create_review_surfaces_server_message_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/products/sku-9/reviews"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({ "message": "You can only review products you have purchased" })),
        )
        .mount(&server)
        .await;

    let draft = ReviewDraft {
        rating: Some(4),
        comment: "Nice".to_string(),
        title: Some("Good".to_string()),
    };

    let client = test_client(&server.uri());
    let err = client
        .create_review(&test_user(), &ItemId::new("sku-9"), &draft.validate().unwrap())
        .await
        .expect_err("403 should be an error");

    assert!(err.is_authorization());
    assert_eq!(
        err.user_message(),
        "You can only review products you have purchased"
    );
}

#[tokio::test]
async fn list_reviews_returns_page_and_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/sku-9/reviews"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [review_json("r-1", 5), review_json("r-2", 3)],
            "pagination": { "page": 1, "limit": 2, "total": 7, "totalPages": 4 }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let page = client
        .list_reviews(&ItemId::new("sku-9"), 1, 2)
        .await
        .expect("should parse review page");

    assert_eq!(page.reviews.len(), 2);
    assert_eq!(page.pagination.total, 7);
    assert_eq!(page.pagination.total_pages, 4);
    assert!(!page.is_complete());
}
