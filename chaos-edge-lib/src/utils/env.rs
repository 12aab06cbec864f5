const PROJECT_NAME: &str = "chaos-edge";

pub const fn project_name() -> &'static str {
    PROJECT_NAME
}

pub const fn project_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Identifier used as `Server` header value for all http responses.
pub const fn network_service_identifier() -> &'static str {
    concat!("chaos-edge", "/", env!("CARGO_PKG_VERSION"))
}
