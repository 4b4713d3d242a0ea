/// Database models
///
/// # Models
///
/// - `user`: accounts with the inactive → active verification lifecycle
/// - `category`: per-user color-coded task labels
/// - `task`: tasks with optional category, deadline, and completion flag
///
/// All models are plain structs with associated `async` CRUD functions that
/// take a `PgPool`; there is no repository layer in between.
pub mod category;
pub mod task;
pub mod user;
