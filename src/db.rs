use std::path::Path;

use rusqlite::Connection;

use crate::error::ImportError;

/// Open the target database. Any failure here is a connection error,
/// surfaced before a transaction ever starts.
pub fn connect(path: &Path) -> Result<Connection, ImportError> {
    let conn = Connection::open(path)
        .map_err(|source| ImportError::Connection { source })?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")
        .map_err(|source| ImportError::Connection { source })?;
    Ok(conn)
}
