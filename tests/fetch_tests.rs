use bytes::Bytes;
use hyperleda::fetch::{FetchError, Fetcher, HttpFetcher};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_http_fetcher_returns_body_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<table></table>"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new().unwrap();
    let body = fetcher.get(&format!("{}/page", server.uri())).await.unwrap();
    assert_eq!(body, Bytes::from("<table></table>"));
}

#[tokio::test]
async fn test_http_fetcher_sends_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("user-agent", "leda-test/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::with_user_agent("leda-test/1.0").unwrap();
    fetcher.get(&server.uri()).await.unwrap();
}

#[tokio::test]
async fn test_http_fetcher_non_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new().unwrap();
    let result = fetcher.get(&format!("{}/missing", server.uri())).await;

    match result {
        Err(FetchError::Status { status, url }) => {
            assert_eq!(status, 404);
            assert!(url.ends_with("/missing"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_fetcher_unreachable_host() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let fetcher = HttpFetcher::new().unwrap();
    let result = fetcher
        .get(&format!("http://127.0.0.1:{port}/ledacat.cgi?o=M31"))
        .await;
    assert!(matches!(result, Err(FetchError::Transport { .. })));
}
