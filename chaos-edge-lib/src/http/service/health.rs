use std::time::SystemTime;

use rama::{
    http::service::web::{
        extract::State,
        response::{IntoResponse, Json},
    },
    utils::str::arcstr::ArcStr,
};
use serde::Serialize;

use crate::utils;

use super::AppState;

/// Static metadata about this service instance.
#[derive(Debug, Clone)]
pub struct ServiceInfo {
    pub version: ArcStr,
    pub hostname: ArcStr,
}

impl ServiceInfo {
    /// Resolve the info of the current process and host.
    pub fn detect() -> Self {
        Self {
            version: ArcStr::from(utils::env::project_version()),
            hostname: ArcStr::from(utils::os::hostname()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// RFC 3339 timestamp at which the response was created
    pub timestamp: String,
    pub version: ArcStr,
    pub hostname: ArcStr,
}

impl HealthResponse {
    pub fn healthy(info: &ServiceInfo) -> Self {
        Self {
            status: "healthy",
            timestamp: humantime::format_rfc3339_millis(SystemTime::now()).to_string(),
            version: info.version.clone(),
            hostname: info.hostname.clone(),
        }
    }
}

pub(super) async fn health(State(AppState { info, .. }): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse::healthy(&info))
}
