pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod graph;
pub mod language;
pub mod logging;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod query;
pub mod resolver;
pub mod source;
pub mod walker;
