//! HTTP adapters for the catalog and mockup services.
//!
//! Both services sit behind the same base URL and the same hosting proxy, so
//! they share [`ServiceConfig`](visualfabric_core::config::ServiceConfig) and
//! the proxy bypass header.

pub mod catalog_client;
pub mod config;
mod http;
pub mod mockup_client;

#[cfg(test)]
mod test_support;

pub use catalog_client::HttpCatalogService;
pub use http::{PROXY_WARNING_HEADER, PROXY_WARNING_VALUE};
pub use mockup_client::HttpMockupService;
