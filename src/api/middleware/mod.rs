//! HTTP middleware applied ahead of routing.
//!
//! Registration order is load-bearing: security headers, then CORS, then
//! access logging; body parsing happens last, at the handler boundary.

pub mod access_log;
pub mod cors;
pub mod security;
