// SecureBlog - A security-minded blog client built with Rust
// Copyright (C) 2025 SecureBlog Project Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! End-to-end behaviour of the API client against a mock backend

use mockito::{Matcher, Server};
use pretty_assertions::assert_eq;
use secureblog_client::{check_auth, check_route, get_server_session, ApiClient};
use secureblog_core::guard::{GuardState, RouteRequirements};
use secureblog_core::models::{
    CommentDraft, CreateCommentRequest, CreatePostRequest, LoginRequest, RegisterPayload, Role,
    Session, UpdateUserRequest,
};
use secureblog_core::ErrorKind;
use serde_json::json;
use std::time::Duration;
use tokio::net::TcpListener;

/// An address nothing listens on
const DEAD_BACKEND: &str = "http://127.0.0.1:1";

const USER_JSON: &str = r#"{"id":"u1","name":"Alice","email":"alice@example.com","role":"USER","createdAt":"2024-01-01T00:00:00Z"}"#;
const ADMIN_JSON: &str = r#"{"id":"a1","name":"Root","email":"root@example.com","role":"ADMIN","createdAt":"2024-01-01T00:00:00Z"}"#;

fn session_body(user_json: &str) -> String {
    format!(r#"{{"user":{},"authenticated":true}}"#, user_json)
}

fn post_json(id: &str, author_id: &str, created_at: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Title {}", id),
        "content": "Body",
        "authorId": author_id,
        "author": { "id": author_id, "name": "Author", "email": "author@example.com" },
        "comments": [
            {
                "id": format!("{}-c1", id),
                "content": "first",
                "authorId": "u1",
                "author": { "id": "u1", "name": "Alice" },
                "postId": id,
                "createdAt": created_at,
                "updatedAt": created_at
            }
        ],
        "createdAt": created_at,
        "updatedAt": created_at
    })
}

#[tokio::test]
async fn test_get_session_authenticated() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/auth/session")
        .with_status(200)
        .with_header("content-type", "application/json; charset=utf-8")
        .with_body(session_body(USER_JSON))
        .create_async()
        .await;

    let client = ApiClient::new(&server.url()).unwrap();
    let session = client.auth().session().await.unwrap();

    assert!(session.authenticated);
    assert_eq!(session.user.unwrap().role, Role::User);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_session_network_failure_is_anonymous() {
    let client = ApiClient::new(DEAD_BACKEND).unwrap();

    let strict = client.auth().fetch_session().await.unwrap_err();
    assert_eq!(strict.status, Some(0));
    assert_eq!(strict.kind(), ErrorKind::Network);

    let session = client.auth().session().await.unwrap();
    assert_eq!(session, Session::anonymous());
}

#[tokio::test]
async fn test_get_session_http_error_propagates() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/auth/session")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Database unavailable"}"#)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url()).unwrap();
    let error = client.auth().session().await.unwrap_err();

    assert_eq!(error.status, Some(500));
    assert_eq!(error.message, "Database unavailable");
}

#[tokio::test]
async fn test_session_helpers_collapse_errors() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/auth/session")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create_async()
        .await;

    let client = ApiClient::new(&server.url()).unwrap();
    assert_eq!(get_server_session(&client).await, Session::anonymous());
    assert!(check_auth(&client).await.is_none());
}

#[tokio::test]
async fn test_check_auth_returns_user() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/auth/session")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(session_body(ADMIN_JSON))
        .create_async()
        .await;

    let client = ApiClient::new(&server.url()).unwrap();
    let user = check_auth(&client).await.unwrap();
    assert_eq!(user.id, "a1");
}

#[tokio::test]
async fn test_csrf_cookie_is_echoed_as_header() {
    let mut server = Server::new_async().await;
    let session = server
        .mock("GET", "/auth/session")
        .match_header("x-csrf-token", Matcher::Missing)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_header("set-cookie", "csrf-token=tok%20en; Path=/")
        .with_body(r#"{"user":null,"authenticated":false}"#)
        .create_async()
        .await;
    let logout = server
        .mock("POST", "/auth/logout")
        .match_header("x-csrf-token", "tok en")
        .match_header("content-type", "application/json")
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Logged out"}"#)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url()).unwrap();
    client.auth().session().await.unwrap();
    assert_eq!(client.csrf_token().as_deref(), Some("tok en"));

    let response = client.auth().logout().await.unwrap();
    assert_eq!(response.message.as_deref(), Some("Logged out"));

    session.assert_async().await;
    logout.assert_async().await;
}

#[tokio::test]
async fn test_seeded_csrf_cookie_and_json_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/posts")
        .match_header("x-csrf-token", "seeded")
        .match_body(Matcher::Json(json!({ "title": "Hello", "content": "World" })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(post_json("p1", "u1", "2024-01-01").to_string())
        .create_async()
        .await;

    let client = ApiClient::new(&server.url()).unwrap();
    let url = url::Url::parse(&format!("{}/", server.url())).unwrap();
    client.cookie_jar().add_cookie_str("csrf-token=seeded; Path=/", &url);

    let post = client
        .posts()
        .create(&CreatePostRequest {
            title: "Hello".to_string(),
            content: "World".to_string(),
            image_url: None,
        })
        .await
        .unwrap();

    assert_eq!(post.id, "p1");
    assert!(post.check_integrity().is_ok());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_http_error_with_field_errors() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/auth/register")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Validation failed","errors":{"email":["Email already registered"]}}"#)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url()).unwrap();
    let payload = RegisterPayload {
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        password: "Correct-Horse-42".to_string(),
        consent_given: true,
    };
    let error = client.auth().register(&payload).await.unwrap_err();

    assert_eq!(error.status, Some(400));
    assert_eq!(error.message, "Validation failed");
    assert_eq!(
        error.first_field_error("email"),
        Some("Email already registered")
    );
}

#[tokio::test]
async fn test_http_error_without_message_uses_status() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/users")
        .with_status(403)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create_async()
        .await;

    let client = ApiClient::new(&server.url()).unwrap();
    let error = client.users().list().await.unwrap_err();
    assert_eq!(error.message, "Error 403: Forbidden");
    assert_eq!(error.kind(), ErrorKind::Http);
}

#[tokio::test]
async fn test_non_json_success_is_empty_object() {
    let mut server = Server::new_async().await;
    server
        .mock("DELETE", "/posts/p1")
        .with_status(204)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url()).unwrap();
    let response = client.posts().delete("p1").await.unwrap();
    assert!(response.message.is_none());
}

#[tokio::test]
async fn test_non_json_failure_carries_status() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/posts")
        .with_status(502)
        .with_header("content-type", "text/html")
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let client = ApiClient::new(&server.url()).unwrap();
    let error = client.posts().list().await.unwrap_err();
    assert_eq!(error.status, Some(502));
    assert_eq!(error.message, "HTTP error 502: Bad Gateway");
}

#[tokio::test]
async fn test_network_failure_message_names_backend() {
    let client = ApiClient::new(DEAD_BACKEND).unwrap();
    let error = client.posts().list().await.unwrap_err();
    assert_eq!(error.status, Some(0));
    assert!(error.message.contains("127.0.0.1:1"));
}

#[tokio::test]
async fn test_create_comment_normalizes_author() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/posts/post-1/comments")
        .match_body(Matcher::Json(json!({ "content": "hi" })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"id":"c1","content":"hi","authorId":"u1","postId":"post-1","author":{"id":"u1"},"createdAt":"2024-01-01"}"#,
        )
        .create_async()
        .await;

    let client = ApiClient::new(&server.url()).unwrap();
    let request = CreateCommentRequest {
        content: "hi".to_string(),
    };
    let comment = client.comments().create("post-1", &request).await.unwrap();

    assert_eq!(comment.author.name, "Utilisateur");
    assert_eq!(comment.author.id, "u1");
    assert_eq!(comment.post_id.as_deref(), Some("post-1"));
    assert_eq!(comment.updated_at, "2024-01-01");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_comment_sends_sanitized_content() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/posts/p1/comments")
        .match_body(Matcher::Json(json!({ "content": "<p>Hello </p>" })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"c9","content":"<p>Hello </p>","authorId":"u1","author":{"id":"u1","name":"Alice"},"createdAt":"2024-01-01"}"#)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url()).unwrap();
    let request = CreateCommentRequest {
        content: "<p>Hello <img src=x onerror=alert(1)></p>".to_string(),
    };
    let comment = client.comments().create("p1", &request).await.unwrap();

    assert_eq!(comment.author.name, "Alice");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_comment_from_draft() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/posts/p1/comments")
        .match_body(Matcher::Json(json!({ "content": "Great read" })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"c2","content":"Great read","authorId":"u1","author":{"id":"u1","name":"Alice"},"createdAt":"2024-01-01"}"#)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url()).unwrap();
    let request = CommentDraft::new("  Great read  ").unwrap().into_request();
    let comment = client.comments().create("p1", &request).await.unwrap();

    assert_eq!(comment.content, "Great read");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_login_and_update_user() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/auth/login")
        .match_body(Matcher::Json(json!({ "email": "alice@example.com", "password": "pw" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_header("set-cookie", "access_token=jwt; Path=/; HttpOnly")
        .with_body(format!(r#"{{"user":{},"message":"Welcome"}}"#, USER_JSON))
        .create_async()
        .await;
    let update = server
        .mock("PATCH", "/users/u1")
        .match_header("cookie", Matcher::Regex("access_token=jwt".to_string()))
        .match_body(Matcher::Json(json!({ "name": "Alicia" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(USER_JSON.replace("Alice", "Alicia"))
        .create_async()
        .await;

    let client = ApiClient::new(&server.url()).unwrap();
    let response = client
        .auth()
        .login(&LoginRequest {
            email: "alice@example.com".to_string(),
            password: "pw".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(response.user.unwrap().id, "u1");

    let profile = client
        .users()
        .update(
            "u1",
            &UpdateUserRequest {
                name: Some("Alicia".to_string()),
                email: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(profile.name, "Alicia");
    update.assert_async().await;
}

#[tokio::test]
async fn test_register_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let client = ApiClient::new(&format!("http://{}", addr)).unwrap();
    let payload = RegisterPayload {
        name: "Slow".to_string(),
        email: "slow@example.com".to_string(),
        password: "Correct-Horse-42".to_string(),
        consent_given: true,
    };

    let error = client
        .auth()
        .register_with_timeout(&payload, Duration::from_millis(200))
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Timeout);
    assert!(error.status.is_none());
}

#[tokio::test]
async fn test_register_within_timeout() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/auth/register")
        .match_body(Matcher::PartialJson(json!({ "consentGiven": true })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Account created"}"#)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url()).unwrap();
    let payload = RegisterPayload {
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        password: "Correct-Horse-42".to_string(),
        consent_given: true,
    };
    let response = client
        .auth()
        .register_with_timeout(&payload, Duration::from_secs(10))
        .await
        .unwrap();
    assert_eq!(response.message.as_deref(), Some("Account created"));
}

#[tokio::test]
async fn test_guard_redirects_to_login_on_401() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/auth/session")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Unauthorized","statusCode":401}"#)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url()).unwrap();
    let guard = check_route(&client, RouteRequirements::authenticated()).await;
    assert_eq!(guard.state(), &GuardState::RedirectLogin);
}

#[tokio::test]
async fn test_unreadable_json_error_keeps_status() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/auth/session")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body("")
        .create_async()
        .await;

    let client = ApiClient::new(&server.url()).unwrap();
    let error = client.auth().fetch_session().await.unwrap_err();
    assert_eq!(error.status, Some(401));
    assert_eq!(error.message, "Error 401: Unauthorized");

    let guard = check_route(&client, RouteRequirements::authenticated()).await;
    assert_eq!(guard.state(), &GuardState::RedirectLogin);
}

#[tokio::test]
async fn test_unreadable_json_success_is_network_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/posts")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[{\"id\":")
        .create_async()
        .await;

    let client = ApiClient::new(&server.url()).unwrap();
    let error = client.posts().list().await.unwrap_err();
    assert_eq!(error.status, Some(0));
    assert!(error.message.starts_with("Invalid JSON response"));
}

#[tokio::test]
async fn test_guard_stays_checking_on_network_failure() {
    let client = ApiClient::new(DEAD_BACKEND).unwrap();
    let guard = check_route(&client, RouteRequirements::authenticated()).await;
    assert_eq!(guard.state(), &GuardState::Checking);
    assert!(guard.state().redirect_path().is_none());
}

#[tokio::test]
async fn test_guard_admin_route() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/auth/session")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(session_body(USER_JSON))
        .create_async()
        .await;

    let client = ApiClient::new(&server.url()).unwrap();
    let admin_guard = check_route(&client, RouteRequirements::admin()).await;
    assert_eq!(admin_guard.state(), &GuardState::RedirectHome);

    let user_guard = check_route(&client, RouteRequirements::authenticated()).await;
    assert!(user_guard.state().should_render());
}

#[tokio::test]
async fn test_admin_dashboard() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/users")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!("[{},{}]", USER_JSON, ADMIN_JSON))
        .create_async()
        .await;
    server
        .mock("GET", "/posts")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                post_json("p1", "u1", "2024-01-01T00:00:00Z"),
                post_json("p2", "a1", "2024-05-01T00:00:00Z"),
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let client = ApiClient::new(&server.url()).unwrap();
    let stats = secureblog_client::dashboard::load_admin_dashboard(&client)
        .await
        .unwrap();

    assert_eq!(stats.total_users, 2);
    assert_eq!(stats.total_posts, 2);
    assert_eq!(stats.total_comments, 2);
    assert_eq!(stats.recent_activity[0].message, "New post: \"Title p2\"");
}

#[tokio::test]
async fn test_user_dashboard() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/posts")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                post_json("p1", "u1", "2024-01-01"),
                post_json("p2", "a1", "2024-01-02"),
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let client = ApiClient::new(&server.url()).unwrap();
    let user = serde_json::from_str(USER_JSON).unwrap();
    let dashboard = secureblog_client::dashboard::load_user_dashboard(&client, &user)
        .await
        .unwrap();

    assert_eq!(dashboard.posts.len(), 1);
    assert_eq!(dashboard.stats.my_posts, 1);
    assert_eq!(dashboard.stats.my_comments, 2);
}

#[tokio::test]
async fn test_request_timeout_from_configuration() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let mut config = secureblog_client::Configuration::with_base_url(&format!("http://{}", addr));
    config.api.request_timeout_secs = Some(1);
    let client = ApiClient::from_configuration(&config).unwrap();

    let error = client.posts().list().await.unwrap_err();
    assert!(error.is_network());
}
