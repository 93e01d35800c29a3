//! Resume ranker library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod llm;
pub mod output;

pub use error::{Result, RankerError};
pub use config::Config;
pub use processing::record::AnalysisRecord;
