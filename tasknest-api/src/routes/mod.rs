/// Route handlers for the API server
///
/// - `health`: liveness/database probe (public)
/// - `auth`: identity lifecycle (register, verify, login, password change,
///   session token check)
/// - `category`: per-user category CRUD
/// - `task`: per-user task CRUD and completion toggle
pub mod auth;
pub mod category;
pub mod health;
pub mod task;
