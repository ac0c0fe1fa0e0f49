use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tubesum_api::endpoints::VideoId;
use tubesum_auth::{
    AuthError, AuthenticatedClient, FileSessionStore, MemorySessionStore, ServerAuthClient,
    SessionStore, SessionToken, UserIdentity,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn identity() -> UserIdentity {
    UserIdentity {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        channel_id: "UC123".to_string(),
    }
}

fn videos_body() -> serde_json::Value {
    json!({
        "videos": [
            {
                "title": "Launch day",
                "videoId": "vid-1",
                "thumbnail": "https://img.example/vid-1.jpg",
                "description": "We launched"
            }
        ]
    })
}

fn client_for(
    server: &MockServer,
    token: &str,
) -> (AuthenticatedClient<Arc<MemorySessionStore>>, Arc<MemorySessionStore>) {
    let store = Arc::new(MemorySessionStore::with_session(
        identity(),
        SessionToken::new(token),
    ));
    let auth_client = ServerAuthClient::new(server.uri()).unwrap();
    (AuthenticatedClient::new(store.clone(), auth_client), store)
}

fn stored_token(store: &MemorySessionStore) -> Option<String> {
    store
        .load()
        .unwrap()
        .map(|(_, token)| token.expose().to_string())
}

#[tokio::test]
async fn test_valid_token_returns_videos_unchanged() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/videos"))
        .and(header("authorization", "Bearer good"))
        .respond_with(ResponseTemplate::new(200).set_body_json(videos_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/refresh_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "x"})))
        .expect(0)
        .mount(&server)
        .await;

    let (client, store) = client_for(&server, "good");
    let videos = client.fetch_videos().await.unwrap();

    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].video_id, "vid-1");
    assert_eq!(videos[0].title, "Launch day");
    assert_eq!(videos[0].thumbnail_url, "https://img.example/vid-1.jpg");
    assert_eq!(stored_token(&store).as_deref(), Some("good"));
}

#[tokio::test]
async fn test_expired_token_refreshes_once_and_persists() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/videos"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid token"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/refresh_token"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "fresh"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/videos"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(videos_body()))
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = client_for(&server, "stale");
    let videos = client.fetch_videos().await.unwrap();

    assert_eq!(videos.len(), 1);
    assert_eq!(stored_token(&store).as_deref(), Some("fresh"));
    let (stored_identity, _) = store.load().unwrap().unwrap();
    assert_eq!(stored_identity, identity());
}

#[tokio::test]
async fn test_failed_refresh_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/videos"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid token"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/refresh_token"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Token refresh failed"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = client_for(&server, "stale");
    let err = client.fetch_videos().await.unwrap_err();

    assert!(matches!(err, AuthError::RefreshFailed(_)));
    assert!(err.requires_login());
    assert_eq!(stored_token(&store).as_deref(), Some("stale"));
}

#[tokio::test]
async fn test_second_unauthorized_fails_without_another_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/videos"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid token"})))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/refresh_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "fresh"})))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _store) = client_for(&server, "stale");
    let err = client.fetch_videos().await.unwrap_err();

    match &err {
        AuthError::SessionRejected(api_err) => assert!(api_err.is_unauthorized()),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.requires_login());
}

#[tokio::test]
async fn test_missing_token_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(videos_body()))
        .expect(0)
        .mount(&server)
        .await;

    let auth_client = ServerAuthClient::new(server.uri()).unwrap();
    let client = AuthenticatedClient::new(MemorySessionStore::new(), auth_client);

    let err = client.fetch_videos().await.unwrap_err();
    assert!(matches!(err, AuthError::NotLoggedIn));
}

#[tokio::test]
async fn test_server_error_is_surfaced_without_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/videos"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/refresh_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "x"})))
        .expect(0)
        .mount(&server)
        .await;

    let (client, store) = client_for(&server, "good");
    let err = client.fetch_videos().await.unwrap_err();

    assert!(!err.requires_login());
    assert!(store.load().unwrap().is_some());
}

#[tokio::test]
async fn test_logout_clears_session_when_server_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/logout"))
        .and(header("authorization", "Bearer good"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Logged out successfully"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = client_for(&server, "good");
    client.logout().await.unwrap();

    assert!(store.load().unwrap().is_none());
}

#[tokio::test]
async fn test_logout_clears_session_when_server_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = FileSessionStore::in_dir(dir.path()).unwrap();
    store.save(&identity(), &SessionToken::new("good")).unwrap();

    let auth_client = ServerAuthClient::new(server.uri()).unwrap();
    let client = AuthenticatedClient::new(store, auth_client);
    client.logout().await.unwrap();

    assert!(client.store().load().unwrap().is_none());
    assert!(!dir.path().join("user_data.json").exists());
    assert!(!dir.path().join("access_token").exists());
}

#[tokio::test]
async fn test_logout_clears_session_when_server_unreachable() {
    let auth_client = ServerAuthClient::new("http://127.0.0.1:9").unwrap();
    let store = MemorySessionStore::with_session(identity(), SessionToken::new("good"));
    let client = AuthenticatedClient::new(store, auth_client);

    client.logout().await.unwrap();
    assert!(client.store().load().unwrap().is_none());
}

#[tokio::test]
async fn test_insufficient_scope_clears_session_for_any_prompt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/summarize_comments"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "detail": "Insufficient authentication scopes. Please log in again."
        })))
        .mount(&server)
        .await;

    for prompt in ["Summarize", "What do people dislike?", "¿Qué opinan?", " "] {
        let (client, store) = client_for(&server, "good");
        let err = client
            .summarize_comments(&VideoId::from("vid-1"), prompt)
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InsufficientScope(_)), "prompt {prompt:?}");
        assert!(err.requires_login());
        assert!(store.load().unwrap().is_none(), "prompt {prompt:?}");
    }
}

#[tokio::test]
async fn test_summarize_returns_summary() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/summarize_comments"))
        .and(header("authorization", "Bearer good"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"summary": "Viewers love the intro."})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = client_for(&server, "good");
    let summary = client
        .summarize_comments(&VideoId::from("vid-1"), "What do people like?")
        .await
        .unwrap();

    assert_eq!(summary, "Viewers love the intro.");
    assert!(store.load().unwrap().is_some());
}

#[tokio::test]
async fn test_summarize_generic_error_keeps_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/summarize_comments"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "detail": "OpenAI API error: rate limited"
        })))
        .mount(&server)
        .await;

    let (client, store) = client_for(&server, "good");
    let err = client
        .summarize_comments(&VideoId::from("vid-1"), "Summarize")
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::Api(_)));
    assert!(store.load().unwrap().is_some());
}

#[tokio::test]
async fn test_fetch_user_and_comments() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "channel_id": "UC123"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/video/vid-1/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"comments": ["Nice"]})))
        .mount(&server)
        .await;

    let (client, _store) = client_for(&server, "good");

    assert_eq!(client.fetch_user().await.unwrap(), identity());
    assert_eq!(
        client.list_comments(&VideoId::from("vid-1")).await.unwrap(),
        vec!["Nice".to_string()]
    );
}

#[tokio::test]
async fn test_unauthorized_summary_keeps_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/summarize_comments"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid token"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/refresh_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "x"})))
        .expect(0)
        .mount(&server)
        .await;

    let (client, store) = client_for(&server, "stale");
    let err = client
        .summarize_comments(&VideoId::from("vid-1"), "Summarize")
        .await
        .unwrap_err();

    assert!(err.is_expired_token());
    assert!(!err.requires_login());
    assert_eq!(stored_token(&store).as_deref(), Some("stale"));
}

#[tokio::test]
async fn test_slow_api_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/videos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(videos_body())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/summarize_comments"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"summary": "late"}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let (client, store) = client_for(&server, "good");
    let client = client.with_request_timeout(Duration::from_millis(100));

    let err = client.fetch_videos().await.unwrap_err();
    assert!(matches!(err, AuthError::RequestTimeout(_)));
    assert!(!err.requires_login());

    let err = client
        .summarize_comments(&VideoId::from("vid-1"), "Summarize")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::RequestTimeout(_)));
    assert_eq!(stored_token(&store).as_deref(), Some("good"));
}
