// Hosted Search Infrastructure - REST Adapter
// Implements: SearchApi over HTTPS with separate read and write hosts

mod connection;
mod search_api;

pub use connection::{parse_host, HttpSettings, API_KEY_HEADER, APPLICATION_ID_HEADER};
pub use search_api::HttpSearchApi;
