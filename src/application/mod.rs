//! Application layer: session, scenario loading and report rendering
//!
//! This layer orchestrates domain logic and owns the only file input.

pub mod error;
pub mod error_ext;
pub mod report;
pub mod scenario;
pub mod session;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use scenario::{open_session, LoadStats, Scenario};
pub use session::Session;
