use std::{path::Path, sync::Arc};

use rama::{
    Layer as _,
    error::{BoxError, ErrorContext as _},
    graceful::ShutdownGuard,
    http::{
        HeaderValue,
        layer::{required_header::AddRequiredResponseHeadersLayer, trace::TraceLayer},
        server::HttpServer,
    },
    layer::TimeoutLayer,
    net::{address::SocketAddress, socket::Interface},
    rt::Executor,
    tcp::server::TcpListener,
    telemetry::tracing,
};

use chaos_edge_lib::{
    fault::FaultInjector,
    http::service::{ServiceInfo, new_app_http_svc},
    utils::env::network_service_identifier,
};

pub async fn run_http_server(
    guard: ShutdownGuard,
    bind: Interface,
    data: &Path,
    injector: FaultInjector,
    info: ServiceInfo,
) -> Result<(), BoxError> {
    let conn_timeout = crate::config::connection_timeout(injector.policy());

    let http_svc = (
        TraceLayer::new_for_http(),
        AddRequiredResponseHeadersLayer::new()
            .with_server_header_value(HeaderValue::from_static(network_service_identifier())),
    )
        .into_layer(new_app_http_svc(injector, info.clone()));

    let exec = Executor::graceful(guard);
    let http_server = HttpServer::auto(exec.clone()).service(Arc::new(http_svc));

    let tcp_svc = TimeoutLayer::new(conn_timeout).into_layer(http_server);

    let tcp_listener = TcpListener::bind(bind, exec)
        .await
        .context("bind chaos edge http server")?;

    let http_addr = tcp_listener
        .local_addr()
        .context("get bound address for chaos edge http server")?;

    tracing::info!(
        "🚀 Starting Chaos Edge App v{} on {http_addr} (host: {})",
        info.version,
        info.hostname,
    );
    write_server_socket_address_as_file(data, "http", http_addr.into()).await?;

    tcp_listener.serve(tcp_svc).await;

    Ok(())
}

async fn write_server_socket_address_as_file(
    dir: &Path,
    name: &str,
    addr: SocketAddress,
) -> Result<(), BoxError> {
    let path = dir.join(format!("{name}.addr.txt"));
    tokio::fs::write(&path, addr.to_string())
        .await
        .context("write server's socket address to file")
        .context_field("address", addr)
        .with_context_debug_field("path", || path.to_owned())
}
