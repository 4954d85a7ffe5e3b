use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::time::Duration;

use crate::services::AccountRecordStore;

/// A store whose pool points at a port nothing listens on, so any statement
/// that slips past validation surfaces as a connection error.
pub fn offline_store() -> AccountRecordStore {
    let options = PgConnectOptions::new()
        .host("127.0.0.1")
        .port(1)
        .username("nobody")
        .database("nowhere");
    AccountRecordStore::from_pool(
        PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(250))
            .connect_lazy_with(options),
    )
}
