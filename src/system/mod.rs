//! System-level modules
//!
//! - Logging initialization
//! - Process-wide background tasks (periodic sync / refresh)

pub mod background;
pub mod logging;

pub use background::BackgroundTask;
pub use logging::init_logging;
