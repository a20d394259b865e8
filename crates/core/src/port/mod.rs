// Port Layer - Interface toward the hosted service

pub mod in_memory; // Offline backend and test double
pub mod search_api;

// Re-exports
pub use in_memory::InMemorySearchApi;
pub use search_api::SearchApi;

#[cfg(test)]
pub use search_api::MockSearchApi;
