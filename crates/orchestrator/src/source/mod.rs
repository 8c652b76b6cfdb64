//! Data source adapter for the disease.sh statistics API.

mod bundle;
mod client;
mod endpoint;
mod fallback;
mod retry;
mod transport;

pub use bundle::{Current, DashboardBundle};
pub use client::ApiClient;
pub use endpoint::{Endpoint, Lookback, Scope};
pub use fallback::FallbackDataset;
pub use retry::with_backoff;
pub use transport::{HttpTransport, Transport};
