//! Library for chaos-edge containing the fault injection core
//! as well as the http services built on top of it.
//!
//! The binary only wires these services to a listener.

#![cfg_attr(
    not(test),
    warn(clippy::print_stdout, clippy::dbg_macro),
    deny(clippy::unwrap_used, clippy::expect_used)
)]

pub mod fault;
pub mod http;
pub mod utils;
