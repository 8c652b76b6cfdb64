pub mod date;
mod error;
pub mod format;
mod lenient;
mod metric;
pub mod model;
pub mod transform;

pub use date::DateRange;
pub use error::Error;
pub use metric::Metric;
