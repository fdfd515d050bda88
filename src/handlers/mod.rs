pub mod analytics;
pub mod thresholds;
pub mod utils;
