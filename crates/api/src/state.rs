/// Shared application state available to all Axum handlers via
/// `State<AppState>`. Cheaply cloneable (the pool is an `Arc` inside).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: facerate_db::DbPool,
}
