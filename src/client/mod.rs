//! HTTP implementation of the backend contract

mod http;

pub use http::HttpApiClient;
