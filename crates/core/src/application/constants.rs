// Client constants (no magic values)
use std::time::Duration;

/// Status checks before a task wait gives up (120 checks, about two minutes)
pub const DEFAULT_WAIT_MAX_ATTEMPTS: u32 = 120;

/// Pause between two status checks (1s)
pub const DEFAULT_WAIT_DELAY: Duration = Duration::from_secs(1);

/// Records requested per browse page
pub const BROWSE_PAGE_SIZE: usize = 1000;

/// Wire name of the browse page size parameter
pub const HITS_PER_PAGE_PARAM: &str = "hitsPerPage";

/// Synonym search defaults
pub const DEFAULT_SYNONYM_HITS_PER_PAGE: usize = 100;
