//! JSON configuration files for the command-line tools.

pub mod batch;
pub mod report;
