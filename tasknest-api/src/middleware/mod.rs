/// Middleware for the API server
///
/// - `gate`: pre-shared API key enforcement for all `/v1` routes
pub mod gate;
