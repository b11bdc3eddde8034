mod common;

use common::{ADMIN_TOKEN, OTHER_PRODUCT_ID, OTHER_TOKEN, OWNER_TOKEN, PRODUCT_ID};
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn create(
    client: &reqwest::Client,
    app: &common::TestApp,
    token: &str,
    body: Value,
) -> reqwest::Response {
    client
        .post(&format!("{}/feedback", &app.address))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request.")
}

async fn list(client: &reqwest::Client, app: &common::TestApp, product_id: i32) -> Vec<Value> {
    let response = client
        .get(&format!("{}/feedback?productId={}", &app.address, product_id))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(StatusCode::OK, response.status());

    let body: Value = response.json().await.unwrap();
    body["list"].as_array().cloned().unwrap_or_default()
}

#[tokio::test]
async fn feedback_lifecycle() {
    let app = common::spawn_app().await;
    let client = reqwest::Client::new();

    let response = create(
        &client,
        &app,
        OWNER_TOKEN,
        json!({"productId": PRODUCT_ID, "comment": "Great laptop!", "rating": 5}),
    )
    .await;
    assert_eq!(StatusCode::CREATED, response.status());
    let body: Value = response.json().await.unwrap();
    let id = body["id"].as_i64().unwrap();
    assert_eq!(body["item"]["userId"], 2);
    assert_eq!(body["item"]["productId"], PRODUCT_ID);
    assert_eq!(body["item"]["createdAt"], body["item"]["updatedAt"]);

    let feedbacks = list(&client, &app, PRODUCT_ID).await;
    assert_eq!(feedbacks.len(), 1);
    assert_eq!(feedbacks[0]["comment"], "Great laptop!");
    assert_eq!(feedbacks[0]["userEmail"], "owner@example.com");

    let response = client
        .put(&format!("{}/feedback/{}", &app.address, id))
        .bearer_auth(OWNER_TOKEN)
        .json(&json!({"comment": "Still great", "rating": 4}))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(StatusCode::OK, response.status());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["item"]["comment"], "Still great");
    assert_eq!(body["item"]["rating"], 4);
    assert_ne!(body["item"]["createdAt"], body["item"]["updatedAt"]);

    let response = client
        .delete(&format!("{}/feedback/{}", &app.address, id))
        .bearer_auth(OTHER_TOKEN)
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(StatusCode::FORBIDDEN, response.status());

    let response = client
        .delete(&format!("{}/feedback/{}", &app.address, id))
        .bearer_auth(OWNER_TOKEN)
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(StatusCode::NO_CONTENT, response.status());

    assert!(list(&client, &app, PRODUCT_ID).await.is_empty());
    assert_eq!(app.repository.len().await, 0);
}

#[tokio::test]
async fn create_requires_authentication() {
    let app = common::spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(&format!("{}/feedback", &app.address))
        .json(&json!({"productId": PRODUCT_ID, "comment": "Nice", "rating": 4}))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(StatusCode::UNAUTHORIZED, response.status());

    let response = create(
        &client,
        &app,
        "user-42",
        json!({"productId": PRODUCT_ID, "comment": "Nice", "rating": 4}),
    )
    .await;
    assert_eq!(StatusCode::UNAUTHORIZED, response.status());
    assert_eq!(app.repository.len().await, 0);
}

#[tokio::test]
async fn create_rejects_invalid_input() {
    let app = common::spawn_app().await;
    let client = reqwest::Client::new();

    let cases = vec![
        (json!({"productId": PRODUCT_ID, "comment": "Nice", "rating": 0}), "rating 0"),
        (json!({"productId": PRODUCT_ID, "comment": "Nice", "rating": 6}), "rating 6"),
        (json!({"productId": PRODUCT_ID, "comment": "", "rating": 3}), "empty comment"),
        (json!({"productId": PRODUCT_ID, "comment": "   ", "rating": 3}), "blank comment"),
        (json!({"productId": PRODUCT_ID, "comment": "x".repeat(1001), "rating": 3}), "long comment"),
        (json!({"productId": PRODUCT_ID, "rating": 3}), "missing comment"),
        (json!({"comment": "Nice", "rating": 3}), "missing product"),
    ];

    for (body, description) in cases {
        let response = create(&client, &app, OWNER_TOKEN, body).await;
        assert_eq!(
            StatusCode::BAD_REQUEST,
            response.status(),
            "The API did not fail with 400 Bad Request when the payload was {}.",
            description
        );
    }
    assert_eq!(app.repository.len().await, 0);
}

#[tokio::test]
async fn create_for_unknown_product_is_not_found() {
    let app = common::spawn_app().await;
    let client = reqwest::Client::new();

    let response = create(
        &client,
        &app,
        OWNER_TOKEN,
        json!({"productId": 999, "comment": "Nice", "rating": 4}),
    )
    .await;
    assert_eq!(StatusCode::NOT_FOUND, response.status());
}

#[tokio::test]
async fn second_feedback_for_same_product_conflicts() {
    let app = common::spawn_app().await;
    let client = reqwest::Client::new();
    let body = json!({"productId": PRODUCT_ID, "comment": "Nice", "rating": 4});

    let response = create(&client, &app, OWNER_TOKEN, body.clone()).await;
    assert_eq!(StatusCode::CREATED, response.status());

    let response = create(&client, &app, OWNER_TOKEN, body.clone()).await;
    assert_eq!(StatusCode::CONFLICT, response.status());

    // other product and other user are unaffected
    let response = create(
        &client,
        &app,
        OWNER_TOKEN,
        json!({"productId": OTHER_PRODUCT_ID, "comment": "Nice", "rating": 4}),
    )
    .await;
    assert_eq!(StatusCode::CREATED, response.status());
    let response = create(&client, &app, OTHER_TOKEN, body).await;
    assert_eq!(StatusCode::CREATED, response.status());

    assert_eq!(app.repository.len().await, 3);
}

#[tokio::test]
async fn repeated_feedback_allowed_when_policy_disabled() {
    let app = common::spawn_app_with_policy(false).await;
    let client = reqwest::Client::new();
    let body = json!({"productId": PRODUCT_ID, "comment": "Nice", "rating": 4});

    for _ in 0..2 {
        let response = create(&client, &app, OWNER_TOKEN, body.clone()).await;
        assert_eq!(StatusCode::CREATED, response.status());
    }

    assert_eq!(list(&client, &app, PRODUCT_ID).await.len(), 2);
}

#[tokio::test]
async fn list_orders_newest_first_and_filters_by_product() {
    let app = common::spawn_app().await;
    let client = reqwest::Client::new();

    for (token, product_id, comment) in [
        (OWNER_TOKEN, PRODUCT_ID, "first"),
        (OTHER_TOKEN, PRODUCT_ID, "second"),
        (OWNER_TOKEN, OTHER_PRODUCT_ID, "elsewhere"),
    ] {
        let response = create(
            &client,
            &app,
            token,
            json!({"productId": product_id, "comment": comment, "rating": 3}),
        )
        .await;
        assert_eq!(StatusCode::CREATED, response.status());
    }

    let feedbacks = list(&client, &app, PRODUCT_ID).await;
    let comments: Vec<&str> = feedbacks
        .iter()
        .map(|item| item["comment"].as_str().unwrap())
        .collect();
    assert_eq!(comments, vec!["second", "first"]);

    assert!(list(&client, &app, 999).await.is_empty());
}

#[tokio::test]
async fn list_without_product_is_admin_only() {
    let app = common::spawn_app().await;
    let client = reqwest::Client::new();

    let response = create(
        &client,
        &app,
        OWNER_TOKEN,
        json!({"productId": PRODUCT_ID, "comment": "Nice", "rating": 4}),
    )
    .await;
    assert_eq!(StatusCode::CREATED, response.status());

    let response = client
        .get(&format!("{}/feedback", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(StatusCode::BAD_REQUEST, response.status());

    let response = client
        .get(&format!("{}/feedback?productId=abc", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(StatusCode::BAD_REQUEST, response.status());

    let response = client
        .get(&format!("{}/feedback", &app.address))
        .bearer_auth(ADMIN_TOKEN)
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(StatusCode::OK, response.status());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["list"][0]["productTitle"], "Sample Laptop");
    assert_eq!(body["list"][0]["userEmail"], "owner@example.com");
}

#[tokio::test]
async fn get_single_feedback() {
    let app = common::spawn_app().await;
    let client = reqwest::Client::new();

    let response = create(
        &client,
        &app,
        OWNER_TOKEN,
        json!({"productId": PRODUCT_ID, "comment": "Nice", "rating": 4}),
    )
    .await;
    let id = response.json::<Value>().await.unwrap()["id"].as_i64().unwrap();

    let response = client
        .get(&format!("{}/feedback/{}", &app.address, id))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(StatusCode::OK, response.status());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["item"]["comment"], "Nice");

    let response = client
        .get(&format!("{}/feedback/{}", &app.address, id + 100))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(StatusCode::NOT_FOUND, response.status());
}

#[tokio::test]
async fn update_checks_existence_then_ownership() {
    let app = common::spawn_app().await;
    let client = reqwest::Client::new();

    let response = create(
        &client,
        &app,
        OWNER_TOKEN,
        json!({"productId": PRODUCT_ID, "comment": "Nice", "rating": 4}),
    )
    .await;
    let id = response.json::<Value>().await.unwrap()["id"].as_i64().unwrap();

    let response = client
        .put(&format!("{}/feedback/{}", &app.address, id + 100))
        .bearer_auth(OWNER_TOKEN)
        .json(&json!({"rating": 2}))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(StatusCode::NOT_FOUND, response.status());

    let response = client
        .put(&format!("{}/feedback/{}", &app.address, id))
        .bearer_auth(OTHER_TOKEN)
        .json(&json!({"rating": 2}))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(StatusCode::FORBIDDEN, response.status());

    // malformed input never reaches the store
    let response = client
        .put(&format!("{}/feedback/{}", &app.address, id))
        .bearer_auth(OTHER_TOKEN)
        .json(&json!({"rating": 9}))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(StatusCode::BAD_REQUEST, response.status());

    let response = client
        .put(&format!("{}/feedback/{}", &app.address, id))
        .bearer_auth(OWNER_TOKEN)
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(StatusCode::BAD_REQUEST, response.status());

    let response = client
        .put(&format!("{}/feedback/{}", &app.address, id))
        .json(&json!({"rating": 2}))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(StatusCode::UNAUTHORIZED, response.status());

    let response = client
        .put(&format!("{}/feedback/{}", &app.address, id))
        .bearer_auth(OWNER_TOKEN)
        .json(&json!({"rating": 9}))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(StatusCode::BAD_REQUEST, response.status());

    let response = client
        .put(&format!("{}/feedback/{}", &app.address, id))
        .bearer_auth(ADMIN_TOKEN)
        .json(&json!({"rating": 1}))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(StatusCode::OK, response.status());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["item"]["rating"], 1);
    assert_eq!(body["item"]["comment"], "Nice");
    assert_eq!(body["item"]["userId"], 2);
}

#[tokio::test]
async fn delete_missing_feedback_is_not_found() {
    let app = common::spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .delete(&format!("{}/feedback/{}", &app.address, 12345))
        .bearer_auth(ADMIN_TOKEN)
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(StatusCode::NOT_FOUND, response.status());
}

#[tokio::test]
async fn admin_can_delete_any_feedback() {
    let app = common::spawn_app().await;
    let client = reqwest::Client::new();

    let response = create(
        &client,
        &app,
        OTHER_TOKEN,
        json!({"productId": PRODUCT_ID, "comment": "Meh", "rating": 2}),
    )
    .await;
    let id = response.json::<Value>().await.unwrap()["id"].as_i64().unwrap();

    let response = client
        .delete(&format!("{}/feedback/{}", &app.address, id))
        .bearer_auth(ADMIN_TOKEN)
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(StatusCode::NO_CONTENT, response.status());
    assert_eq!(app.repository.len().await, 0);
}

#[tokio::test]
async fn administrators_cannot_create_feedback() {
    let app = common::spawn_app().await;
    let client = reqwest::Client::new();

    let response = create(
        &client,
        &app,
        ADMIN_TOKEN,
        json!({"productId": PRODUCT_ID, "comment": "Looks fine", "rating": 5}),
    )
    .await;
    assert_eq!(StatusCode::FORBIDDEN, response.status());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Only customers can create feedback");
    assert_eq!(app.repository.len().await, 0);
}

#[tokio::test]
async fn comment_length_ignores_surrounding_whitespace() {
    let app = common::spawn_app().await;
    let client = reqwest::Client::new();
    let comment = format!("{}  ", "x".repeat(1000));

    let response = create(
        &client,
        &app,
        OWNER_TOKEN,
        json!({"productId": PRODUCT_ID, "comment": comment, "rating": 4}),
    )
    .await;
    assert_eq!(StatusCode::CREATED, response.status());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["item"]["comment"].as_str().unwrap().len(), 1000);
}

#[tokio::test]
async fn api_ignores_access_token_cookie() {
    let app = common::spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(&format!("{}/feedback", &app.address))
        .header(reqwest::header::COOKIE, format!("access_token={}", OWNER_TOKEN))
        .json(&json!({"productId": PRODUCT_ID, "comment": "Nice", "rating": 4}))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(StatusCode::UNAUTHORIZED, response.status());
    assert_eq!(app.repository.len().await, 0);
}
