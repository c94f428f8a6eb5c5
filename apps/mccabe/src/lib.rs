//! # mccabe
//!
//! Library half of the `mccabe` binary: configuration, data loading,
//! reporting and the CLI command tree. The numeric work lives in
//! `mccabe-core`.

pub mod cli;
pub mod config;
pub mod input;
pub mod report;
