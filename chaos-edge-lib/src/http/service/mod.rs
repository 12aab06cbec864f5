//! Http services of chaos-edge.
//!
//! All routes are registered explicitly in [`new_app_http_svc`],
//! which is built once at startup and handed to the server.

use std::{convert::Infallible, sync::Arc};

use rama::{
    Service,
    http::{Request, Response, service::web::Router},
};

use crate::fault::FaultInjector;

pub mod chaos;
pub mod health;
pub mod index;


pub use self::health::{HealthResponse, ServiceInfo};

/// State shared by all route handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub injector: FaultInjector,
    pub info: ServiceInfo,
}

pub fn new_app_http_svc(
    injector: FaultInjector,
    info: ServiceInfo,
) -> impl Service<Request, Output = Response, Error = Infallible> + Clone {
    Arc::new(
        Router::new_with_state(AppState { injector, info })
            .with_get("/", self::index::index)
            .with_get("/health", self::health::health)
            .with_get("/healthz", self::health::health)
            .with_get("/chaos/latency", self::chaos::latency)
            .with_get("/chaos/fail", self::chaos::fail),
    )
}
