//! Application-level configuration constants.

// Results server API, relative to the page
pub const API_ROOT: &str = "api/v1";
pub const RACE_PATH: &str = "race";
pub const STATUS_PATH: &str = "updated_time";
pub const SHUTDOWN_PATH: &str = "shutdown";

// Polling
pub const POLL_INTERVAL_MS: u32 = 5_000;

// Layout offsets (px) subtracted from the viewport height
pub const GROUP_LIST_OFFSET_PX: f64 = 110.0;
pub const RESULTS_OFFSET_PX: f64 = 110.0;

pub const LOG_LEVEL: log::Level = log::Level::Info;
