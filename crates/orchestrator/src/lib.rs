#![forbid(unsafe_code)]

pub mod clock;
pub mod engine;
mod error;
pub mod source;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use engine::{ControlEvent, DashboardEngine, RefreshReport};
pub use error::{Error, FetchError};
