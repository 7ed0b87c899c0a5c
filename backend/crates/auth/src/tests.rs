//! Crate-level tests for the auth module
//! Use cases against in-memory adapters, HTTP flows through the router.

#[cfg(test)]
mod support {
    use std::sync::Arc;

    use crate::application::config::AuthConfig;
    use crate::infra::{JwtTokenService, MemoryAuthRepository};
    use crate::presentation::AuthAppState;

    pub const PRIVATE_PEM: &str = include_str!("../testdata/jwt_private.pem");
    pub const PUBLIC_PEM: &str = include_str!("../testdata/jwt_public.pem");

    pub type TestState = AuthAppState<MemoryAuthRepository, MemoryAuthRepository, JwtTokenService>;

    pub fn jwt() -> Arc<JwtTokenService> {
        Arc::new(
            JwtTokenService::from_rsa_pem(PRIVATE_PEM.as_bytes(), PUBLIC_PEM.as_bytes()).unwrap(),
        )
    }

    pub fn state() -> TestState {
        let repo = Arc::new(MemoryAuthRepository::new());
        AuthAppState::new(repo.clone(), repo, jwt(), AuthConfig::development())
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;

    use super::support::*;
    use crate::application::{
        LoginInput, LoginUseCase, RefreshTokenUseCase, RegisterInput, RegisterUseCase,
        VerifyTokenUseCase,
    };
    use crate::domain::value_object::email::Email;
    use crate::domain::repository::CredentialStore;
    use crate::error::AuthError;

    fn register_input(email: &str) -> RegisterInput {
        RegisterInput {
            name: "Alice".into(),
            email: email.into(),
            password: "pw123".into(),
        }
    }

    fn login_input(email: &str, password: &str) -> LoginInput {
        LoginInput {
            email: email.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn test_register_persists_user() {
        let state = state();
        let use_case = RegisterUseCase::new(state.store.clone(), state.coordinator.clone());

        let output = use_case.execute(register_input("A@X.com")).await.unwrap();

        let user = state
            .store
            .find_by_email(&Email::new("a@x.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.id, output.user_id);
        assert_eq!(user.name.as_str(), "Alice");
        assert!(user.password.as_phc_string().starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_register_twice_fails() {
        let state = state();
        let use_case = RegisterUseCase::new(state.store.clone(), state.coordinator.clone());

        use_case.execute(register_input("a@x.com")).await.unwrap();
        let err = use_case.execute(register_input("a@x.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::EmailAlreadyExists));
    }

    #[tokio::test]
    async fn test_concurrent_registration_yields_one_user() {
        let state = state();
        let use_case = Arc::new(RegisterUseCase::new(
            state.store.clone(),
            state.coordinator.clone(),
        ));

        let a = tokio::spawn({
            let use_case = use_case.clone();
            async move { use_case.execute(register_input("race@x.com")).await }
        });
        let b = tokio::spawn({
            let use_case = use_case.clone();
            async move { use_case.execute(register_input("race@x.com")).await }
        });

        let results = [a.await.unwrap(), b.await.unwrap()];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(
            results
                .iter()
                .any(|r| matches!(r, Err(AuthError::EmailAlreadyExists)))
        );
    }

    #[tokio::test]
    async fn test_register_validates_input() {
        let state = state();
        let use_case = RegisterUseCase::new(state.store.clone(), state.coordinator.clone());

        for input in [
            RegisterInput {
                name: "  ".into(),
                ..register_input("a@x.com")
            },
            register_input("not-an-email"),
            RegisterInput {
                password: String::new(),
                ..register_input("a@x.com")
            },
        ] {
            let err = use_case.execute(input).await.unwrap_err();
            assert!(matches!(err, AuthError::InvalidParam(_)));
        }
    }

    #[tokio::test]
    async fn test_login_flow() {
        let state = state();
        RegisterUseCase::new(state.store.clone(), state.coordinator.clone())
            .execute(register_input("a@x.com"))
            .await
            .unwrap();
        let login = LoginUseCase::new(
            state.store.clone(),
            state.tokens.clone(),
            state.config.clone(),
        );

        let output = login.execute(login_input("a@x.com", "pw123")).await.unwrap();
        assert_eq!(output.user.email.as_str(), "a@x.com");

        let verify = VerifyTokenUseCase::new(state.tokens.clone());
        assert_eq!(verify.execute(&output.access_token).unwrap(), output.user.id);
        assert_eq!(verify.execute(&output.refresh_token).unwrap(), output.user.id);
    }

    #[tokio::test]
    async fn test_login_wrong_password_always_fails() {
        let state = state();
        RegisterUseCase::new(state.store.clone(), state.coordinator.clone())
            .execute(register_input("a@x.com"))
            .await
            .unwrap();
        let login = LoginUseCase::new(
            state.store.clone(),
            state.tokens.clone(),
            state.config.clone(),
        );

        let too_long = "x".repeat(200);
        for wrong in ["wrong", "PW123", "pw1234", " pw123", too_long.as_str()] {
            let err = login.execute(login_input("a@x.com", wrong)).await.unwrap_err();
            assert!(
                matches!(err, AuthError::InvalidPassword),
                "{wrong:?} gave {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let state = state();
        let login = LoginUseCase::new(
            state.store.clone(),
            state.tokens.clone(),
            state.config.clone(),
        );

        let err = login
            .execute(login_input("nobody@x.com", "pw"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailNotFound));
    }

    #[tokio::test]
    async fn test_login_soft_deleted_user_is_not_found() {
        let state = state();
        let output = RegisterUseCase::new(state.store.clone(), state.coordinator.clone())
            .execute(register_input("a@x.com"))
            .await
            .unwrap();
        state.store.soft_delete(output.user_id).await.unwrap();

        let err = LoginUseCase::new(
            state.store.clone(),
            state.tokens.clone(),
            state.config.clone(),
        )
        .execute(login_input("a@x.com", "pw123"))
        .await
        .unwrap_err();
        assert!(matches!(err, AuthError::EmailNotFound));
    }

    #[tokio::test]
    async fn test_refresh_issues_access_token_for_same_subject() {
        let state = state();
        let user_id = RegisterUseCase::new(state.store.clone(), state.coordinator.clone())
            .execute(register_input("a@x.com"))
            .await
            .unwrap()
            .user_id;
        let tokens = LoginUseCase::new(
            state.store.clone(),
            state.tokens.clone(),
            state.config.clone(),
        )
        .execute(login_input("a@x.com", "pw123"))
        .await
        .unwrap();

        let refresh = RefreshTokenUseCase::new(state.tokens.clone(), state.config.clone());
        let output = refresh.execute(&tokens.refresh_token).unwrap();

        let verify = VerifyTokenUseCase::new(state.tokens.clone());
        assert_eq!(verify.execute(&output.access_token).unwrap(), user_id);
        // the refresh token stays usable
        assert!(refresh.execute(&tokens.refresh_token).is_ok());
    }

    #[test]
    fn test_refresh_failures_are_invalid_token() {
        use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

        let state = state();
        let refresh = RefreshTokenUseCase::new(state.tokens.clone(), state.config.clone());

        assert!(matches!(
            refresh.execute("garbage"),
            Err(AuthError::InvalidToken)
        ));

        let hs256 = encode(
            &Header::new(Algorithm::HS256),
            &serde_json::json!({"dat": {"id": 1}, "iat": 0, "nbf": 0, "exp": i64::MAX}),
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();
        assert!(matches!(
            refresh.execute(&hs256),
            Err(AuthError::InvalidToken)
        ));
    }
}

#[cfg(test)]
mod http_tests {
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::middleware::from_fn_with_state;
    use axum::response::Response;
    use axum::routing::get;
    use tower::ServiceExt;

    use super::support::*;
    use crate::infra::JwtTokenService;
    use crate::presentation::{AuthenticatedUser, auth_router, require_access_token};

    fn app() -> Router {
        let state = state();
        let gate = state.gate();

        let protected = Router::new()
            .route(
                "/me",
                get(|user: AuthenticatedUser| async move { user.user_id.to_string() }),
            )
            .route_layer(from_fn_with_state(gate, require_access_token::<JwtTokenService>));

        auth_router(state).merge(protected)
    }

    fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn set_cookies(response: &Response) -> Vec<String> {
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    /// `NAME=value` pair from a Set-Cookie header
    fn cookie_pair(set_cookie: &str) -> String {
        set_cookie.split(';').next().unwrap().to_string()
    }

    async fn register(app: &Router, name: &str, email: &str, password: &str) -> Response {
        app.clone()
            .oneshot(json_request(
                "/register",
                serde_json::json!({"name": name, "email": email, "password": password}),
            ))
            .await
            .unwrap()
    }

    async fn login(app: &Router, email: &str, password: &str) -> Response {
        app.clone()
            .oneshot(json_request(
                "/login",
                serde_json::json!({"email": email, "password": password}),
            ))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_register_and_login_scenario() {
        let app = app();

        let response = register(&app, "Alice", "a@x.com", "pw123").await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["success"], true);
        assert!(body["data"]["id"].as_i64().unwrap() > 0);
        assert!(body["timestamp"].is_string());

        let response = login(&app, "a@x.com", "pw123").await;
        assert_eq!(response.status(), StatusCode::OK);
        let cookies = set_cookies(&response);
        assert_eq!(cookies.len(), 2);
        assert!(cookies.iter().any(|c| c.starts_with("AUTHORIZATION=")
            && c.contains("HttpOnly")
            && c.contains("Max-Age=600")));
        assert!(cookies.iter().any(|c| c.starts_with("REFRESH_TOKEN=")
            && c.contains("Max-Age=604800")));
        let body = json_body(response).await;
        assert_eq!(body["data"]["email"], "a@x.com");
        assert_eq!(body["data"]["name"], "Alice");
        assert!(body["data"].get("password_hash").is_none());
        assert!(body["data"].get("password").is_none());

        let response = login(&app, "a@x.com", "wrong").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Invalid password");

        let response = login(&app, "nobody@x.com", "pw").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["message"], "Email not found");
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_bad_request() {
        let app = app();
        register(&app, "Alice", "a@x.com", "pw123").await;

        let response = register(&app, "Alice Again", "a@x.com", "other").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["message"], "Email already exists");
    }

    #[tokio::test]
    async fn test_missing_field_is_invalid_param() {
        let app = app();

        let response = app
            .clone()
            .oneshot(json_request(
                "/register",
                serde_json::json!({"name": "Alice", "email": "a@x.com"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["message"], "Invalid parameter");
    }

    #[tokio::test]
    async fn test_refresh_sets_only_access_cookie() {
        let app = app();
        register(&app, "Alice", "a@x.com", "pw123").await;
        let cookies = set_cookies(&login(&app, "a@x.com", "pw123").await);
        let refresh = cookies
            .iter()
            .find(|c| c.starts_with("REFRESH_TOKEN="))
            .map(|c| cookie_pair(c))
            .unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/refresh-token")
                    .header(header::COOKIE, refresh)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let cookies = set_cookies(&response);
        assert_eq!(cookies.len(), 1);
        assert!(cookies[0].starts_with("AUTHORIZATION="));
        assert!(json_body(response).await["data"].is_null());
    }

    #[tokio::test]
    async fn test_refresh_without_cookie_is_unauthorized() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/refresh-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["message"], "Invalid token");
    }

    #[tokio::test]
    async fn test_gate_attaches_subject() {
        let app = app();
        let id = json_body(register(&app, "Alice", "a@x.com", "pw123").await).await["data"]["id"]
            .as_i64()
            .unwrap();
        let cookies = set_cookies(&login(&app, "a@x.com", "pw123").await);
        let access = cookies
            .iter()
            .find(|c| c.starts_with("AUTHORIZATION="))
            .map(|c| cookie_pair(c))
            .unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/me")
                    .header(header::COOKIE, access)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(String::from_utf8(bytes.to_vec()).unwrap(), id.to_string());
    }

    #[tokio::test]
    async fn test_gate_rejects_missing_empty_and_bad_tokens() {
        let app = app();

        for cookie in [None, Some("AUTHORIZATION="), Some("AUTHORIZATION=abc.def.ghi")] {
            let mut builder = Request::builder().uri("/me");
            if let Some(cookie) = cookie {
                builder = builder.header(header::COOKIE, cookie);
            }
            let response = app
                .clone()
                .oneshot(builder.body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{cookie:?}");
            assert_eq!(json_body(response).await["success"], false);
        }
    }
}
