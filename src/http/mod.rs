//! HTTP client module
//!
//! Single-shot HTTP transport over reqwest.
//!
//! # Overview
//!
//! The client owns base-URL resolution, default headers, cookies, the user
//! agent and timeout, and consults the installed fetch policy before every
//! request. Every call is one network round trip; a non-2xx status is a
//! transport error. There is no retry loop here; the bounded-retry wrapper
//! lives on `fetcher::ApiClient`.

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
