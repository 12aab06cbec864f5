mod runtime;

mod test_meta;

#[tokio::test]
#[tracing_test::traced_test]
async fn test_runtime_spawn() {
    // simple test to ensure that spawning the app works,
    // outside of any other things that might otherwise go wrong
    let runtime = self::runtime::spawn_with_args(&["--scenario", "calm"]).await;
    assert!(runtime.http_socket_addr().ip_addr.is_loopback());
    assert_ne!(0, runtime.http_socket_addr().port);
    assert!(runtime.data_dir().join("http.addr.txt").is_file());
}
