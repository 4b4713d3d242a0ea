/// Database layer
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool with startup health check
/// - `migrations`: embedded migration runner
///
/// Models live in the `models` module at the crate root.
pub mod migrations;
pub mod pool;
