use rama::http::{
    BodyExtractExt as _, StatusCode,
    header::{CONTENT_TYPE, SERVER},
    service::client::HttpClientExt as _,
};

use super::runtime;

#[tokio::test]
#[tracing_test::traced_test]
async fn test_endpoints() {
    let runtime = runtime::spawn_with_args(&["--scenario", "calm"]).await;

    tokio::join!(
        test_endpoint_root(&runtime),
        test_endpoint_health(&runtime, "/health"),
        test_endpoint_health(&runtime, "/healthz"),
        test_endpoint_not_found(&runtime),
    );
}

async fn test_endpoint_root(runtime: &runtime::Runtime) {
    let resp = runtime
        .client()
        .get(runtime.url("/"))
        .send()
        .await
        .unwrap();

    assert_eq!(StatusCode::OK, resp.status());
    assert!(
        resp.headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("text/html"))
    );

    let body = resp.try_into_string().await.unwrap();
    assert!(body.contains("<!doctype html>"));
    assert!(body.contains(env!("CARGO_PKG_VERSION")));
}

async fn test_endpoint_health(runtime: &runtime::Runtime, path: &str) {
    let resp = runtime
        .client()
        .get(runtime.url(path))
        .send()
        .await
        .unwrap();

    assert_eq!(StatusCode::OK, resp.status(), "path: {path}");
    assert!(
        resp.headers()
            .get(SERVER)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("chaos-edge/")),
        "path: {path}"
    );

    let body = resp.try_into_string().await.unwrap();
    assert!(
        body.contains(r#""status":"healthy""#),
        "path: {path}; body: {body}"
    );
    assert!(body.contains(r#""timestamp":""#), "path: {path}");
    assert!(body.contains(r#""hostname":""#), "path: {path}");
}

async fn test_endpoint_not_found(runtime: &runtime::Runtime) {
    let resp = runtime
        .client()
        .get(runtime.url("/nope"))
        .send()
        .await
        .unwrap();
    assert_eq!(StatusCode::NOT_FOUND, resp.status());
}
