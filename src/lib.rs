pub mod analyzers;
pub mod dataset;
pub mod error;
pub mod output;
