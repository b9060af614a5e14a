//! End-to-end tests of the HTTP API over the in-memory repository

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    use customer_service::auth::hash_password;
    use customer_service::build_router;
    use customer_service::customer::{CustomerRepository, InMemoryCustomerRepository};
    use customer_service::middleware::{RateLimiter, REQUEST_ID_HEADER};
    use customer_service::models::{CustomerRole, MaritalStatus, NewCustomer};
    use customer_service::state::AppState;

    const SECRET: &str = "integration-test-secret";
    const TEST_COST: u32 = 4;
    const PASSWORD: &str = "correct-horse-battery";

    fn test_app_with_ttl(ttl_seconds: i64) -> (Router, InMemoryCustomerRepository) {
        let repo = InMemoryCustomerRepository::new();
        let state = AppState::with_auth_settings(
            Arc::new(repo.clone()),
            SECRET.to_string(),
            ttl_seconds,
            TEST_COST,
        );
        (build_router(state, RateLimiter::new(1000)), repo)
    }

    fn test_app() -> (Router, InMemoryCustomerRepository) {
        test_app_with_ttl(3600)
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    fn registration(username: &str) -> Value {
        json!({
            "name": "Jane Doe",
            "username": username,
            "password": PASSWORD,
            "age": 34,
            "address": "12 Harbour Road",
            "gender": false,
            "marital_status": "single"
        })
    }

    async fn register(app: &Router, username: &str) {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/customer/auth/register",
            None,
            Some(registration(username)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
    }

    async fn login(app: &Router, username: &str) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/customer/auth/login",
            None,
            Some(json!({ "username": username, "password": PASSWORD })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["data"]["token"].as_str().unwrap().to_string()
    }

    async fn register_and_login(app: &Router, username: &str) -> String {
        register(app, username).await;
        login(app, username).await
    }

    async fn seed_staff(app: &Router, repo: &InMemoryCustomerRepository, username: &str) -> String {
        repo.insert_customer(NewCustomer {
            username: username.to_string(),
            password_hash: hash_password(PASSWORD, TEST_COST).unwrap(),
            name: "Staff Member".to_string(),
            age: 40,
            address: "Head Office".to_string(),
            gender: true,
            marital_status: MaritalStatus::Married,
            role: CustomerRole::Admin,
        })
        .await
        .unwrap();
        login(app, username).await
    }

    #[tokio::test]
    async fn test_register_login_and_me() {
        let (app, _) = test_app();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/customer/auth/register",
            None,
            Some(registration("jane")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["username"], "jane");
        assert_eq!(body["data"]["role"], "customer");
        assert!(body["data"].get("password_hash").is_none());

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/customer/auth/login",
            None,
            Some(json!({ "username": "jane", "password": PASSWORD })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["token_type"], "Bearer");
        assert_eq!(body["data"]["expires_in"], 3600);
        let token = body["data"]["token"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            Method::GET,
            "/api/v1/customer/auth/me",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "Jane Doe");
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflicts() {
        let (app, _) = test_app();
        register(&app, "jane").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/customer/auth/register",
            None,
            Some(registration("jane")),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_body() {
        let (app, _) = test_app();

        let mut short_password = registration("jane");
        short_password["password"] = json!("short");
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/customer/auth/register",
            None,
            Some(short_password),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/customer/auth/register",
            None,
            Some(json!({ "username": "jane" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let (app, _) = test_app();
        register(&app, "jane").await;

        let (wrong_status, wrong_body) = send(
            &app,
            Method::POST,
            "/api/v1/customer/auth/login",
            None,
            Some(json!({ "username": "jane", "password": "not-the-password" })),
        )
        .await;
        let (unknown_status, unknown_body) = send(
            &app,
            Method::POST,
            "/api/v1/customer/auth/login",
            None,
            Some(json!({ "username": "nobody", "password": PASSWORD })),
        )
        .await;

        assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_body, unknown_body);
    }

    #[tokio::test]
    async fn test_bearer_token_is_required() {
        let (app, _) = test_app();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/customer/get/jane")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );

        let (status, body) = send(
            &app,
            Method::GET,
            "/api/v1/customer/auth/me",
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "MISSING_TOKEN");

        let (status, body) = send(
            &app,
            Method::GET,
            "/api/v1/customer/auth/me",
            Some("not.a.jwt"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "INVALID_TOKEN");
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let (app, _) = test_app_with_ttl(-120);
        let token = register_and_login(&app, "jane").await;

        let (status, body) = send(
            &app,
            Method::GET,
            "/api/v1/customer/auth/me",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "TOKEN_EXPIRED");
    }

    #[tokio::test]
    async fn test_get_customer_details() {
        let (app, _) = test_app();
        let token = register_and_login(&app, "jane").await;

        let (status, body) = send(
            &app,
            Method::GET,
            "/api/v1/customer/get/jane",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["user"]["username"], "jane");
        assert_eq!(body["data"]["user"]["marital_status"], "single");
        assert_eq!(body["data"]["wallet"]["customer_id"], "jane");
        assert_eq!(body["data"]["wallet"]["amount"].as_f64(), Some(0.0));
    }

    #[tokio::test]
    async fn test_customers_cannot_touch_other_records() {
        let (app, _) = test_app();
        register(&app, "bob").await;
        let token = register_and_login(&app, "jane").await;

        let (status, body) = send(
            &app,
            Method::GET,
            "/api/v1/customer/get/bob",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["code"], "FORBIDDEN");

        let (status, _) = send(
            &app,
            Method::PUT,
            "/api/v1/customer/wallet/bob/charge",
            Some(&token),
            Some(json!(10.0)),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(
            &app,
            Method::DELETE,
            "/api/v1/customer/delete/bob",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_list_customers_requires_staff() {
        let (app, repo) = test_app();
        let token = register_and_login(&app, "jane").await;
        register(&app, "bob").await;

        let (status, _) = send(&app, Method::GET, "/api/v1/customer/get", Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let admin = seed_staff(&app, &repo, "root").await;
        let (status, body) = send(&app, Method::GET, "/api/v1/customer/get", Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);

        let listed = body["data"].as_array().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0]["bob"]["username"], "bob");
        assert_eq!(listed[1]["jane"]["username"], "jane");
    }

    #[tokio::test]
    async fn test_update_customer() {
        let (app, _) = test_app();
        let token = register_and_login(&app, "jane").await;

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/v1/customer/update/jane",
            Some(&token),
            Some(json!({ "name": "Jane Smith", "marital_status": "married" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "Jane Smith");
        assert_eq!(body["data"]["marital_status"], "married");
        assert_eq!(body["data"]["age"], 34);

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/v1/customer/update/jane",
            Some(&token),
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::ACCEPTED);
        assert!(body.get("data").is_none());

        let (status, _) = send(
            &app,
            Method::PUT,
            "/api/v1/customer/update/jane",
            Some(&token),
            Some(json!({ "age": -1 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_missing_customer_is_not_found_even_when_empty() {
        let (app, repo) = test_app();
        let admin = seed_staff(&app, &repo, "root").await;

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/v1/customer/update/ghost",
            Some(&admin),
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_delete_customer_removes_wallet() {
        let (app, repo) = test_app();
        let token = register_and_login(&app, "jane").await;
        let admin = seed_staff(&app, &repo, "root").await;

        let (status, _) = send(
            &app,
            Method::DELETE,
            "/api/v1/customer/delete/jane",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(repo.find_wallet("jane").await.unwrap().is_none());

        let (status, _) = send(
            &app,
            Method::GET,
            "/api/v1/customer/get/jane",
            Some(&admin),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            Method::DELETE,
            "/api/v1/customer/delete/jane",
            Some(&admin),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_wallet_charge_and_deduct() {
        let (app, _) = test_app();
        let token = register_and_login(&app, "jane").await;

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/v1/customer/wallet/jane/charge",
            Some(&token),
            Some(json!(100.0)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["new_balance"].as_f64(), Some(100.0));
        assert_eq!(
            body["message"],
            "Wallet for customer 'jane' charged with 100.0"
        );

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/v1/customer/wallet/jane/deduct",
            Some(&token),
            Some(json!(30.0)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["new_balance"].as_f64(), Some(70.0));
        assert_eq!(body["message"], "30.0 deducted from wallet for customer 'jane'");

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/v1/customer/wallet/jane/deduct",
            Some(&token),
            Some(json!(100.0)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INSUFFICIENT_FUNDS");

        let (_, body) = send(
            &app,
            Method::GET,
            "/api/v1/customer/get/jane",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(body["data"]["wallet"]["amount"].as_f64(), Some(70.0));
    }

    #[tokio::test]
    async fn test_wallet_rejects_negative_amount() {
        let (app, _) = test_app();
        let token = register_and_login(&app, "jane").await;

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/v1/customer/wallet/jane/charge",
            Some(&token),
            Some(json!(-5.0)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_wallet_body_must_be_a_number() {
        let (app, _) = test_app();
        let token = register_and_login(&app, "jane").await;

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/v1/customer/wallet/jane/charge",
            Some(&token),
            Some(json!({ "amount": 5.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_charge_cannot_overflow_balance() {
        let (app, _) = test_app();
        let token = register_and_login(&app, "jane").await;

        let (status, _) = send(
            &app,
            Method::PUT,
            "/api/v1/customer/wallet/jane/charge",
            Some(&token),
            Some(json!(1.7e308)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/v1/customer/wallet/jane/charge",
            Some(&token),
            Some(json!(1.7e308)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");

        let (_, body) = send(
            &app,
            Method::GET,
            "/api/v1/customer/get/jane",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(body["data"]["wallet"]["amount"].as_f64(), Some(1.7e308));
    }

    #[tokio::test]
    async fn test_wallet_of_missing_customer() {
        let (app, repo) = test_app();
        let admin = seed_staff(&app, &repo, "root").await;

        let (status, _) = send(
            &app,
            Method::PUT,
            "/api/v1/customer/wallet/ghost/charge",
            Some(&admin),
            Some(json!(5.0)),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health_check() {
        let (app, _) = test_app();
        register(&app, "jane").await;

        let (status, _) = send(&app, Method::GET, "/api/v1/customer/health", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "OK");
        assert_eq!(body["db_status"], "connected");
        assert_eq!(body["customers_count"], 1);
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_responses_carry_security_and_request_id_headers() {
        let (app, _) = test_app();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(REQUEST_ID_HEADER, "req-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(headers.get(header::X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
        assert_eq!(headers.get(header::X_FRAME_OPTIONS).unwrap(), "DENY");
        assert_eq!(headers.get(header::CACHE_CONTROL).unwrap(), "no-store");
        assert_eq!(headers.get(REQUEST_ID_HEADER).unwrap(), "req-123");
    }

    #[tokio::test]
    async fn test_rate_limit_returns_429() {
        let repo = InMemoryCustomerRepository::new();
        let state = AppState::with_auth_settings(
            Arc::new(repo),
            SECRET.to_string(),
            3600,
            TEST_COST,
        );
        let app = build_router(state, RateLimiter::new(1));

        // burst of two, then throttled
        for _ in 0..2 {
            let (status, _) =
                send(&app, Method::GET, "/health", None, None).await;
            assert_eq!(status, StatusCode::OK);
        }

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers().get(header::RETRY_AFTER).unwrap(), "1");
    }
}
