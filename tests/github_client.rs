use serde_json::json;
use url::Url;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

use showcase::github::{ApiError, GithubClient};

fn client_for(mock_server: &MockServer, token: Option<&str>) -> GithubClient {
    GithubClient::new(
        Url::parse(&mock_server.uri()).unwrap(),
        token.map(str::to_string),
    )
}

#[tokio::test]
async fn test_repo_details_sends_versioned_accept_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/alice/widget"))
        .and(header("accept", "application/vnd.github.v3+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "name": "widget",
            "full_name": "alice/widget",
            "stargazers_count": 3
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, None);
    let details = client.repo_details("alice", "widget").await.unwrap();

    assert_eq!(details.name, "widget");
    assert_eq!(details.stargazers_count, 3);
}

#[tokio::test]
async fn test_bearer_token_is_attached_when_configured() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/alice/widget"))
        .and(header("authorization", "Bearer t0k3n"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "name": "widget"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Some("t0k3n"));
    assert!(client.repo_details("alice", "widget").await.is_ok());
}

#[tokio::test]
async fn test_not_found_maps_to_http_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/alice/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, None);
    let result = client.repo_details("alice", "missing").await;

    match result {
        Err(ApiError::Http { status }) => assert_eq!(status.as_u16(), 404),
        other => panic!("Expected HTTP 404 error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_body_maps_to_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/alice/widget"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html>definitely not json</html>")
                .insert_header("Content-Type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, None);
    let result = client.repo_details("alice", "widget").await;

    assert!(matches!(result, Err(ApiError::MalformedBody(_))));
}

#[tokio::test]
async fn test_languages_are_ordered_most_bytes_first() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/alice/widget/languages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Rust": 10,
            "C": 300,
            "Shell": 50
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, None);
    let languages = client
        .languages(&format!("{}/repos/alice/widget/languages", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(languages, ["C", "Shell", "Rust"]);
}

#[tokio::test]
async fn test_readme_resource_decodes_base64_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/alice/widget/readme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            // "# Widget\n" wrapped the way GitHub wraps payloads
            "content": "IyBXaWRn\nZXQK\n",
            "encoding": "base64"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, None);
    let resource = client.readme("alice", "widget").await.unwrap();

    assert_eq!(resource.decode().as_deref(), Some("# Widget\n"));
}
