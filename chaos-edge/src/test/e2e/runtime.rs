use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Arc, OnceLock},
    time::Duration,
};

use clap::Parser;
use rama::{
    Layer as _, Service,
    error::BoxError,
    http::{Request, Response, client::EasyHttpWebClient},
    layer::TimeoutLayer,
    net::address::SocketAddress,
    rt::Executor,
};
use tempfile::TempDir;

use crate::Args;

#[derive(Debug, Clone)]
pub(super) struct Runtime {
    data_dir: Arc<TempDir>,
    http_addr: SocketAddress,
}

impl Runtime {
    #[inline(always)]
    pub fn http_socket_addr(&self) -> SocketAddress {
        self.http_addr
    }

    #[inline(always)]
    pub fn data_dir(&self) -> &Path {
        self.data_dir.path()
    }

    /// Absolute url for the given path on the spawned http server.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.http_addr)
    }

    pub fn client(&self) -> impl Service<Request, Output = Response, Error = BoxError> {
        let inner_http_client = EasyHttpWebClient::connector_builder()
            .with_default_transport_connector()
            .without_tls_proxy_support()
            .without_proxy_support()
            .without_tls_support()
            .with_default_http_connector(Executor::default())
            .try_with_default_connection_pool()
            .expect("create connection pool for e2e web client")
            .build_client();

        // make timeouts large enough for slow CI machines
        TimeoutLayer::new(Duration::from_secs(180)).into_layer(inner_http_client)
    }
}

/// Spawn a chaos edge app with the given extra arguments
/// and wait until its http server is bound.
pub(super) async fn spawn_with_args(extra_args: &[&str]) -> Runtime {
    let data_dir = spawn_chaos_edge_app_with_args(extra_args);

    let http_addr = tokio::time::timeout(
        Duration::from_secs(180),
        read_file_or_wait(data_dir.path().join("http.addr.txt")),
    )
    .await
    .unwrap();

    let runtime = Runtime {
        data_dir: Arc::new(data_dir),
        http_addr,
    };

    assert!(runtime.http_socket_addr().ip_addr.is_loopback());

    runtime
}

async fn read_file_or_wait(path: PathBuf) -> SocketAddress {
    loop {
        match tokio::fs::read_to_string(&path).await {
            Ok(s) => {
                let s = s.trim();
                if s.is_empty() {
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    continue;
                }
                match s.parse() {
                    Ok(addr) => return addr,
                    Err(err) => {
                        eprintln!("unexpected error parsing socket addr (content={s:?}): {err}");
                        tokio::time::sleep(Duration::from_millis(50)).await;
                    }
                }
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            Err(err) => panic!("unexpected error: {err}"),
        }
    }
}

fn spawn_chaos_edge_app_with_args(extra_args: &[&str]) -> TempDir {
    let data_dir = tempfile::Builder::new()
        .prefix("chaos_edge_app_e2e")
        .tempdir()
        .unwrap();
    eprintln!("chaos_edge_app_e2e all data stored under: {:?}", data_dir.path());

    let data_dir_str = data_dir.path().display().to_string();

    let mut argv: Vec<&str> = vec![
        "chaos-edge",
        "--bind",
        "127.0.0.1:0",
        "--data",
        &data_dir_str,
        "--graceful",
        "0.42",
    ];
    argv.extend(extra_args);

    let args = Args::try_parse_from(argv).unwrap();

    let wait_server_ready = Arc::new(OnceLock::new());
    let notify_server_ready = wait_server_ready.clone();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .unwrap();

        let server_future = crate::run_with_args(std::future::pending::<()>(), args);

        notify_server_ready.set(()).expect("waiter to be notified");

        rt.block_on(server_future).expect("serve without errors");
    });

    wait_server_ready.wait();

    data_dir
}
