pub mod config;
pub mod defaults;
pub mod error_utils;
pub mod graph;
pub mod output;
pub mod validation;
