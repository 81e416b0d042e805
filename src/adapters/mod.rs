// Adapters layer: concrete implementations for external systems (http, local files).

pub mod http;
pub mod storage;

pub use http::RetryingClient;
pub use storage::LocalStorage;
