//! Runs the generator against a one-shot HTTP server on localhost.

use camino::Utf8PathBuf;
use easylist_gen::{fetch_filter_list, generate, GenerateError};
use pretty_assertions::assert_eq;
use selector_list::SelectorArtifact;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const FILTER_LIST: &str = "[Adblock Plus 2.0]\r\n\
! Title: EasyList\r\n\
###AC_ad\r\n\
##.AD-POST\r\n\
##.adsbygoogle\r\n\
##[data-ad-slot]\r\n\
##[href*=\"ads.com\"]\r\n\
##amp-ad\r\n\
example.com##.site-only\r\n";

/// Serves a single request with `status` and `body`, returning the URL.
async fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 1024];
        let _ = socket.read(&mut request).await;
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });

    format!("http://{addr}/easylist.txt")
}

#[tokio::test]
async fn generates_artifact_from_served_list() {
    let url = serve_once("200 OK", FILTER_LIST).await;
    let dir = tempfile::tempdir().unwrap();
    let output = Utf8PathBuf::from_path_buf(dir.path().join("selectors.json")).unwrap();

    let buckets = generate(&url, &output).await.unwrap();
    assert_eq!(buckets.simple_attributes, vec!["[data-ad-slot]"]);
    assert_eq!(buckets.complex_attributes, vec![r#"[href*="ads.com"]"#]);
    assert_eq!(buckets.elements, vec!["amp-ad"]);

    let artifact = SelectorArtifact::read(&output).unwrap();
    assert_eq!(artifact.id, vec!["AC_ad"]);
    assert_eq!(artifact.class, vec!["AD-POST", "adsbygoogle"]);
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        r#"{"id":["AC_ad"],"class":["AD-POST","adsbygoogle"]}"#
    );
}

#[tokio::test]
async fn error_status_is_transport_error() {
    let url = serve_once("404 Not Found", "missing").await;
    let err = fetch_filter_list(&url).await.unwrap_err();
    assert!(matches!(err, GenerateError::Transport { .. }));
}

#[tokio::test]
async fn failed_fetch_leaves_existing_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let output = Utf8PathBuf::from_path_buf(dir.path().join("selectors.json")).unwrap();
    std::fs::write(&output, r#"{"id":["keep"],"class":[]}"#).unwrap();

    let url = serve_once("500 Internal Server Error", "").await;
    assert!(generate(&url, &output).await.is_err());
    assert_eq!(SelectorArtifact::read(&output).unwrap().id, vec!["keep"]);
}
