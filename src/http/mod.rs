//! HTTP client and status handling.

mod client;
mod status;

pub use client::HttpClient;
pub use status::{check_status, describe_status, transport_error};
