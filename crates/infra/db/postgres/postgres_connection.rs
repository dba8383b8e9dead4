use anyhow::Result;
use diesel::{
    PgConnection,
    r2d2::{ConnectionManager, Pool},
};
use std::time::Duration;

pub type PgPoolSquad = Pool<ConnectionManager<PgConnection>>;

const POOL_MAX_SIZE: u32 = 10;
const POOL_CONNECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Opens the process-wide pool. Callers share it through `Arc<PgPoolSquad>`;
/// connections are released when the last handle is dropped at shutdown.
pub fn establish_connection(database_url: &str) -> Result<PgPoolSquad> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder()
        .max_size(POOL_MAX_SIZE)
        .connection_timeout(POOL_CONNECTION_TIMEOUT)
        .build(manager)?;
    Ok(pool)
}
