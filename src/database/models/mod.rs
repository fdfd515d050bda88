pub mod assessment;
pub mod threshold;
