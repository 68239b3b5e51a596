//! Integration tests for the HTTP metadata source.
//!
//! Each test stands up a mock model hub and GitHub API and checks that the
//! source decodes their responses into the facts metrics are computed from.

use core::time::Duration;
use serde_json::json;
use trustscore_lib::facts::{HttpSource, HttpSourceOptions, MetadataSource};
use trustscore_lib::resources::{HubId, RepoSpec};
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn source(server: &MockServer) -> HttpSource {
    HttpSource::new(&HttpSourceOptions {
        hub_base_url: server.uri(),
        github_api_url: server.uri(),
        hub_token: Some("hf-secret".to_string()),
        github_token: None,
        request_timeout: Duration::from_secs(5),
        max_concurrent_requests: 4,
    })
    .unwrap()
}

fn repo(url: &str) -> RepoSpec {
    RepoSpec::parse(&Url::parse(url).unwrap()).unwrap()
}

#[tokio::test]
async fn test_model_info_decodes_card_and_files() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/models/google/gemma-2b"))
        .and(query_param("blobs", "true"))
        .and(header("authorization", "Bearer hf-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "downloads": 12_345,
            "likes": 67,
            "tags": ["transformers", "license:apache-2.0"],
            "cardData": { "model-index": [{ "name": "gemma" }] },
            "siblings": [
                { "rfilename": "config.json", "size": 512 },
                { "rfilename": "model.safetensors", "lfs": { "size": 5_000_000_000_u64 } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let info = source(&server).model_info(&HubId::new(Some("google"), "gemma-2b")).await.unwrap();

    assert_eq!(info.license.as_deref(), Some("apache-2.0"));
    assert!(info.has_eval_results);
    assert_eq!(info.files.len(), 2);
    assert_eq!(info.files[1].path, "model.safetensors");
    assert_eq!(info.files[1].size, Some(5_000_000_000));
}

#[tokio::test]
async fn test_missing_model_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/models/org/ghost"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = source(&server).model_info(&HubId::new(Some("org"), "ghost")).await.unwrap_err();
    assert!(err.to_string().contains("not found"), "{err}");
}

#[tokio::test]
async fn test_missing_readme_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/org/model/raw/main/README.md"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let readme = source(&server).model_readme(&HubId::new(Some("org"), "model")).await.unwrap();
    assert!(readme.is_empty());
}

#[tokio::test]
async fn test_readme_text_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bert-base-uncased/raw/main/README.md"))
        .respond_with(ResponseTemplate::new(200).set_body_string("# BERT\n\nUsage: see below."))
        .mount(&server)
        .await;

    let readme = source(&server).model_readme(&HubId::new(None, "bert-base-uncased")).await.unwrap();
    assert_eq!(readme, "# BERT\n\nUsage: see below.");
}

#[tokio::test]
async fn test_model_activity_counts_distinct_authors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/models/org/model/commits/main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "authors": [{ "user": "alice" }], "date": "2025-03-01T12:00:00.000Z" },
            { "authors": [{ "user": "bob" }, { "user": "alice" }], "date": "2025-01-01T00:00:00.000Z" }
        ])))
        .mount(&server)
        .await;

    let activity = source(&server).model_activity(&HubId::new(Some("org"), "model")).await.unwrap();
    assert_eq!(activity.contributors, 2);
    assert_eq!(activity.last_activity.unwrap().to_rfc3339(), "2025-03-01T12:00:00+00:00");
}

#[tokio::test]
async fn test_dataset_info() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/datasets/stanfordnlp/imdb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "downloads": 98_765, "likes": 321 })))
        .mount(&server)
        .await;

    let info = source(&server).dataset_info(&HubId::new(Some("stanfordnlp"), "imdb")).await.unwrap();
    assert_eq!(info.downloads, 98_765);
}

#[tokio::test]
async fn test_repo_activity_joins_repository_and_contributors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/org/code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pushed_at": "2025-06-01T00:00:00Z",
            "default_branch": "main"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/org/code/contributors"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "login": "a", "contributions": 50 },
            { "login": "b", "contributions": 20 },
            { "login": "c", "contributions": 1 }
        ])))
        .mount(&server)
        .await;

    let activity = source(&server).repo_activity(&repo("https://github.com/org/code")).await.unwrap();
    assert_eq!(activity.contributors, 3);
    assert!(activity.last_activity.is_some());
}

#[tokio::test]
async fn test_repo_files_lists_blobs() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/org/code/git/trees/HEAD"))
        .and(query_param("recursive", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tree": [
                { "path": "tests", "type": "tree" },
                { "path": "tests/test_io.py", "type": "blob" },
                { "path": "setup.cfg", "type": "blob" }
            ],
            "truncated": false
        })))
        .mount(&server)
        .await;

    let files = source(&server).repo_files(&repo("https://github.com/org/code.git")).await.unwrap();
    assert_eq!(files, ["tests/test_io.py", "setup.cfg"]);
}

#[tokio::test]
async fn test_unsupported_code_host_is_an_error() {
    let server = MockServer::start().await;

    let err = source(&server).repo_files(&repo("https://gitlab.com/org/code")).await.unwrap_err();
    assert!(err.to_string().contains("gitlab.com"), "{err}");
}

#[tokio::test]
async fn test_exhausted_rate_limit_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/org/code/git/trees/HEAD"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-ratelimit-remaining", "0")
                .insert_header("x-ratelimit-reset", "0"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = source(&server).repo_files(&repo("https://github.com/org/code")).await.unwrap_err();
    assert!(err.to_string().contains("rate limited"), "{err}");
}

#[tokio::test]
async fn test_malformed_body_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/datasets/org/data"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let _ = source(&server).dataset_info(&HubId::new(Some("org"), "data")).await.unwrap_err();
}
