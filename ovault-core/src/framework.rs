//! Database access plumbing for the kanau `Processor` pattern.
//!
//! Every query in `entities` is a message struct processed by
//! [`DatabaseProcessor`], which keeps SQL in one place per entity and lets
//! handlers stay free of connection management.

use sqlx::PgPool;

/// Processes query/command messages against the connection pool.
pub struct DatabaseProcessor {
    pub pool: PgPool,
}

impl DatabaseProcessor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}
