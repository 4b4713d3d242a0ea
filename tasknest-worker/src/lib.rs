//! # TaskNest Worker Library
//!
//! This library provides the daily deadline reminder job for TaskNest.
//!
//! ## Modules
//!
//! - `config`: Configuration management
//! - `reminder`: The deadline scan and per-task reminder delivery
//! - `scheduler`: Fixed-time daily trigger with cooperative shutdown

pub mod config;
pub mod reminder;
pub mod scheduler;
