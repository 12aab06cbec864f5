use rama::http::{Response, service::web::extract::State};

use super::AppState;

pub(super) async fn latency(State(AppState { injector, .. }): State<AppState>) -> Response {
    injector.handle_latency_injection().await
}

pub(super) async fn fail(State(AppState { injector, .. }): State<AppState>) -> Response {
    injector.handle_failure_injection()
}
