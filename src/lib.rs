pub mod analyzers;
pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod output;
pub mod report;
pub mod source;
pub mod stats;
