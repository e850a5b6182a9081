//! Database initialization for the application.

use rusqlite::Connection;

use crate::{entry::create_entry_table, user::create_user_table};

/// Create the application's tables if they do not already exist.
///
/// # Errors
/// Returns an error if a table cannot be created or if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.pragma_update(None, "foreign_keys", "ON")?;

    create_user_table(connection)?;
    create_entry_table(connection)?;

    Ok(())
}
