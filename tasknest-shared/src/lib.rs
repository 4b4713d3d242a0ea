//! # TaskNest Shared Library
//!
//! Types and business logic shared between the TaskNest API server and the
//! reminder worker.
//!
//! ## Module Organization
//!
//! - `models`: database models (users, categories, tasks)
//! - `auth`: credential hashing, verification tokens, session tokens, and
//!   the pre-shared API key check
//! - `db`: connection pool and migrations
//! - `mail`: the `Mailer` trait, SMTP implementation, and email templates

pub mod auth;
pub mod db;
pub mod mail;
pub mod models;

/// Current version of the TaskNest shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
