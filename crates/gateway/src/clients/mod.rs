//! HTTP clients for calling the backing services.

mod catalog;
mod service_client;

pub use catalog::{InventoryLookup, ProductCatalog};
#[cfg(test)]
pub use catalog::{MockInventoryLookup, MockProductCatalog};
pub use service_client::{build_http_client, ServiceClient, UpstreamResponse};
