// Tests for fetching route documents over HTTP

use topoviz_core::{Fetcher, TopologyError, TopologyGraph};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TWO_ROUTES: &str = r#"{
    "r1": {"Path": [{"Name":"A"},{"Name":"B"},{"Name":"C"}]},
    "r2": {"Path": [{"Name":"B"},{"Name":"C"}]}
}"#;

async fn serve(status: u16, body: &str) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(status)
                .insert_header("content-type", "application/json")
                .set_body_string(body),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    mock_server
}

#[tokio::test]
async fn test_fetch_document() {
    let mock_server = serve(200, TWO_ROUTES).await;

    let fetcher = Fetcher::new().unwrap();
    let document = fetcher.fetch_document_str(&mock_server.uri()).await.unwrap();

    assert_eq!(document.len(), 2);
    let graph = TopologyGraph::from_routes(&document);
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);
}

#[tokio::test]
async fn test_fetch_empty_document() {
    let mock_server = serve(200, "{}").await;

    let document = Fetcher::new()
        .unwrap()
        .fetch_document_str(&mock_server.uri())
        .await
        .unwrap();
    assert!(document.is_empty());
}

#[tokio::test]
async fn test_fetch_non_success_status() {
    let mock_server = serve(503, "{}").await;

    let result = Fetcher::new()
        .unwrap()
        .fetch_document_str(&mock_server.uri())
        .await;
    match result {
        Err(TopologyError::StatusError { status, url }) => {
            assert_eq!(status, 503);
            assert!(url.starts_with(&mock_server.uri()));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_malformed_json() {
    let mock_server = serve(200, "<html>not json</html>").await;

    let result = Fetcher::new()
        .unwrap()
        .fetch_document_str(&mock_server.uri())
        .await;
    assert!(matches!(result, Err(TopologyError::JsonError(_))));
}

#[tokio::test]
async fn test_fetch_invalid_utf8_body() {
    let mock_server = MockServer::start().await;
    let body = b"{\"r1\":{\"Path\":[{\"Name\":\"A\"},{\"Name\":\"B\xff\"},{\"Name\":\"B\xfe\"}]}}".to_vec();
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .set_body_bytes(body),
        )
        .mount(&mock_server)
        .await;

    let result = Fetcher::new()
        .unwrap()
        .fetch_document_str(&mock_server.uri())
        .await;
    assert!(matches!(result, Err(TopologyError::JsonError(_))));
}

#[tokio::test]
async fn test_fetch_schema_error() {
    let mock_server = serve(200, r#"{"r1": {"Path": [{"name": "lowercase"}]}}"#).await;

    let err = Fetcher::new()
        .unwrap()
        .fetch_document_str(&mock_server.uri())
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Route 'r1': node #0 in `Path` is missing field `Name`"
    );
}

#[tokio::test]
async fn test_fetch_invalid_url() {
    let result = Fetcher::new().unwrap().fetch_document_str("not a url").await;
    assert!(matches!(result, Err(TopologyError::InvalidUrl(_))));
}

#[tokio::test]
async fn test_fetch_unreachable_host() {
    // Bind then drop a listener so the port is known to be closed
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let result = Fetcher::new().unwrap().fetch_document_str(&uri).await;
    assert!(matches!(result, Err(TopologyError::HttpError(_))));
}
