// Hosted Search Core - Domain Logic & Ports
// NO transport dependencies: HTTP lives behind the SearchApi port

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{Result, SearchError};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
