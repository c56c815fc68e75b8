use std::sync::Arc;

use crate::db::{DbPool, OrmConn, orm_from_pool};
use crate::uploads::FileStorage;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub storage: Arc<dyn FileStorage>,
    pub jwt_secret: Arc<str>,
}

impl AppState {
    /// The ORM connection shares the sqlx pool.
    pub fn new(pool: DbPool, storage: Arc<dyn FileStorage>, jwt_secret: &str) -> Self {
        Self {
            orm: orm_from_pool(pool.clone()),
            pool,
            storage,
            jwt_secret: Arc::from(jwt_secret),
        }
    }
}
