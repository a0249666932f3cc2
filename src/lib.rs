//! bcfuzz-eval - statistics for fuzzing campaign results
//!
//! This library provides rounded sample means, the Mann-Whitney U rank-sum
//! test used to compare fuzzer configurations, the built-in campaign
//! reports, TOML experiment files, and a bar chart with error bars.

pub mod chart;
pub mod cli;
pub mod config;
pub mod csv_output;
pub mod datasets;
pub mod json_output;
pub mod ranksum;
pub mod report;
pub mod stats;
