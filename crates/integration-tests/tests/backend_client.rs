//! `BackendClient` against a scripted shop backend.

#![allow(clippy::unwrap_used)]

use axum::http::{Method, StatusCode};
use secrecy::SecretString;
use serde_json::json;

use storedesk_admin::backend::{AdminApi, ApiError, BackendClient, Counter};
use storedesk_admin::models::{ImageUpload, ProductForm};
use storedesk_core::{CategoryId, CommentId, MessageId, Price, ProductId, ProductStatus};
use storedesk_integration_tests::{FakeBackend, fixtures};

fn client(backend: &FakeBackend) -> BackendClient {
    BackendClient::new(&backend.config()).unwrap()
}

#[tokio::test]
async fn test_lists_decode_from_their_envelopes() {
    let backend = FakeBackend::start().await;
    backend
        .respond(Method::GET, "/api/getAllProducts", StatusCode::OK, fixtures::products())
        .respond(
            Method::GET,
            "/api/comment-reports/comments-with-reports",
            StatusCode::OK,
            fixtures::comments(),
        )
        .respond(
            Method::GET,
            "/api/occasion/get-all",
            StatusCode::OK,
            json!({"data": [{"id": 1, "name": "Birthday"}]}),
        );
    let api = client(&backend);

    let products = api.list_products().await.unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name(), "Ceramic Mug");

    let comments = api.list_comments().await.unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[1].report_count(), 5);

    let occasions = api.list_occasions().await.unwrap();
    assert_eq!(occasions[0].name(), "Birthday");
}

#[tokio::test]
async fn test_unexpected_shapes_become_empty_lists() {
    let backend = FakeBackend::start().await;
    backend
        .respond(Method::GET, "/api/getAllProducts", StatusCode::OK, json!([{"id": 1}]))
        .respond(Method::GET, "/api/messages", StatusCode::OK, json!({"messages": []}))
        .respond(Method::GET, "/api/customers-users", StatusCode::OK, json!(null));
    let api = client(&backend);

    assert!(api.list_products().await.unwrap().is_empty());
    assert!(api.list_messages().await.unwrap().is_empty());
    assert!(api.list_customers().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_error_status_carries_backend_message() {
    let backend = FakeBackend::start().await;
    backend.respond(
        Method::DELETE,
        "/api/products-delete/9",
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"error": "constraint violation"}),
    );
    let api = client(&backend);

    let err = api.delete_product(ProductId::new(9)).await.unwrap_err();
    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("constraint violation"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_unscripted_route_is_an_error_not_an_empty_list() {
    let backend = FakeBackend::start().await;
    let api = client(&backend);

    let err = api.list_comments().await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_delete_comment_hits_moderation_endpoint() {
    let backend = FakeBackend::start().await;
    backend.respond(
        Method::DELETE,
        "/api/comment-reports/comment/11",
        StatusCode::OK,
        json!({"message": "deleted"}),
    );
    let api = client(&backend);

    api.delete_comment(CommentId::new(11)).await.unwrap();
    assert_eq!(
        backend
            .requests_to(&Method::DELETE, "/api/comment-reports/comment/11")
            .len(),
        1
    );
}

#[tokio::test]
async fn test_reply_is_sent_as_json() {
    let backend = FakeBackend::start().await;
    backend.respond(
        Method::POST,
        "/api/messages/3/reply",
        StatusCode::OK,
        json!({"success": true}),
    );
    let api = client(&backend);

    api.reply_to_message(MessageId::new(3), "Ships Monday")
        .await
        .unwrap();

    let requests = backend.requests_to(&Method::POST, "/api/messages/3/reply");
    assert_eq!(requests.len(), 1);
    assert!(
        requests[0]
            .content_type
            .as_deref()
            .unwrap()
            .starts_with("application/json")
    );
    assert_eq!(requests[0].json(), json!({"replyContent": "Ships Monday"}));
}

#[tokio::test]
async fn test_create_product_sends_multipart_with_image() {
    let backend = FakeBackend::start().await;
    backend.respond(
        Method::POST,
        "/api/create-products",
        StatusCode::CREATED,
        json!({"product": {"id": 42, "name": "Teapot", "price": "40.00", "stock": 2,
                           "status": "active", "image": "/uploads/teapot.png"}}),
    );
    let api = client(&backend);

    let form = ProductForm {
        name: "Teapot".to_owned(),
        description: "Cast iron".to_owned(),
        price: "40.00".parse::<Price>().unwrap(),
        stock: 2,
        status: ProductStatus::Active,
        image: Some(ImageUpload {
            file_name: "teapot.png".to_owned(),
            content_type: Some("image/png".to_owned()),
            bytes: vec![0x89, b'P', b'N', b'G'],
        }),
        category_id: Some(CategoryId::new(5)),
        occasion_id: None,
    };

    let product = api.create_product(&form).await.unwrap();
    assert_eq!(product.id, ProductId::new(42));

    let request = &backend.requests_to(&Method::POST, "/api/create-products")[0];
    assert!(
        request
            .content_type
            .as_deref()
            .unwrap()
            .starts_with("multipart/form-data")
    );
    let body = request.text();
    assert!(body.contains("name=\"name\""));
    assert!(body.contains("Teapot"));
    assert!(body.contains("name=\"categoryId\""));
    assert!(!body.contains("name=\"occasionId\""));
    assert!(body.contains("filename=\"teapot.png\""));
    assert!(body.contains("image/png"));
}

#[tokio::test]
async fn test_update_without_new_image_omits_image_part() {
    let backend = FakeBackend::start().await;
    backend.respond(
        Method::PUT,
        "/api/update-products/1",
        StatusCode::OK,
        json!({"product": {"id": 1, "name": "Mug", "price": "9.00", "stock": 1}}),
    );
    let api = client(&backend);

    let form = ProductForm {
        name: "Mug".to_owned(),
        description: String::new(),
        price: "9.00".parse::<Price>().unwrap(),
        stock: 1,
        status: ProductStatus::Inactive,
        image: None,
        category_id: None,
        occasion_id: None,
    };
    api.update_product(ProductId::new(1), &form).await.unwrap();

    let body = backend.requests_to(&Method::PUT, "/api/update-products/1")[0].text();
    assert!(body.contains("inactive"));
    assert!(!body.contains("name=\"image\""));
}

#[tokio::test]
async fn test_counts_fall_back_to_zero() {
    let backend = FakeBackend::start().await;
    backend
        .respond(Method::GET, "/api/customers/count", StatusCode::OK, json!({"count": 12}))
        .respond(Method::GET, "/api/count-products", StatusCode::OK, json!({"total": 3}))
        .respond(
            Method::GET,
            "/api/orders/count",
            StatusCode::SERVICE_UNAVAILABLE,
            json!({"error": "down"}),
        );
    let api = client(&backend);

    assert_eq!(api.count(Counter::Customers).await.unwrap(), 12);
    assert_eq!(api.count(Counter::Products).await.unwrap(), 0);
    assert!(api.count(Counter::Orders).await.is_err());
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let backend = FakeBackend::start().await;
    backend.respond(Method::GET, "/api/messages", StatusCode::OK, json!([]));

    let mut config = backend.config();
    config.api_token = Some(SecretString::from("s3cr3t-t0ken-value"));
    let api = BackendClient::new(&config).unwrap();

    api.list_messages().await.unwrap();
    assert_eq!(
        backend.requests()[0].authorization.as_deref(),
        Some("Bearer s3cr3t-t0ken-value")
    );
}
