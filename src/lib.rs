pub mod analysis;
pub mod config;
pub mod format;
pub mod report;
pub mod system;
pub mod term;
