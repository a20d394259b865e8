// Application Layer - Client services built on the SearchApi port

pub mod browse;
pub mod constants;
pub mod index;
pub mod keys;
pub mod task_tracker;

// Re-exports
pub use browse::BrowseCursor;
pub use index::Index;
pub use keys::KeyService;
pub use task_tracker::{PollState, TaskTracker, WaitPolicy};
