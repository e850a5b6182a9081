//! Defines the core data models and database queries for entries.

use std::str::FromStr;

use rusqlite::{
    Connection, Row,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};
use time::Date;

use crate::{Error, user::UserID};

/// Alias for the integer type used for entry IDs.
pub type EntryId = i64;

/// Alias for the number of rows affected by an update or delete.
pub type RowsAffected = usize;

/// The spending category an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Food,
    Transport,
    Entertainment,
    Other,
}

impl Category {
    /// All categories, in the order they appear in forms.
    pub const ALL: [Category; 4] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Other,
    ];

    /// The value stored in the database and submitted by forms.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Entertainment => "entertainment",
            Category::Other => "other",
        }
    }

    /// The human readable name shown in the UI.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Other => "Other",
        }
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "food" => Ok(Category::Food),
            "transport" => Ok(Category::Transport),
            "entertainment" => Ok(Category::Entertainment),
            "other" => Ok(Category::Other),
            _ => Err(()),
        }
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|_| FromSqlError::InvalidType)
    }
}

/// Whether an entry records money earned or money spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    Income,
    Expense,
}

impl EntryType {
    /// All entry types, in the order they appear in forms.
    pub const ALL: [EntryType; 2] = [EntryType::Income, EntryType::Expense];

    /// The value stored in the database and submitted by forms.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Income => "income",
            EntryType::Expense => "expense",
        }
    }

    /// The human readable name shown in the UI.
    pub fn label(&self) -> &'static str {
        match self {
            EntryType::Income => "Income",
            EntryType::Expense => "Expense",
        }
    }
}

impl FromStr for EntryType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(EntryType::Income),
            "expense" => Ok(EntryType::Expense),
            _ => Err(()),
        }
    }
}

impl ToSql for EntryType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for EntryType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|_| FromSqlError::InvalidType)
    }
}

/// The account the money for an entry moved through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bank {
    Bank1,
    Bank2,
    Cash,
}

impl Bank {
    /// All banks, in the order they appear in forms.
    pub const ALL: [Bank; 3] = [Bank::Bank1, Bank::Bank2, Bank::Cash];

    /// The value stored in the database and submitted by forms.
    pub fn as_str(&self) -> &'static str {
        match self {
            Bank::Bank1 => "bank1",
            Bank::Bank2 => "bank2",
            Bank::Cash => "cash",
        }
    }

    /// The human readable name shown in the UI.
    pub fn label(&self) -> &'static str {
        match self {
            Bank::Bank1 => "Bank 1",
            Bank::Bank2 => "Bank 2",
            Bank::Cash => "Cash",
        }
    }
}

impl FromStr for Bank {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bank1" => Ok(Bank::Bank1),
            "bank2" => Ok(Bank::Bank2),
            "cash" => Ok(Bank::Cash),
            _ => Err(()),
        }
    }
}

impl ToSql for Bank {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Bank {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|_| FromSqlError::InvalidType)
    }
}

/// An income or expense record owned by a user.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// The ID of the entry.
    pub id: EntryId,
    /// The user the entry belongs to.
    pub user_id: UserID,
    /// A short name for the entry, e.g. "Groceries".
    pub title: String,
    /// The amount of money earned or spent.
    pub amount: f64,
    /// When the income or expense happened.
    pub date: Date,
    /// The spending category of the entry.
    pub category: Category,
    /// Whether money was earned or spent.
    pub entry_type: EntryType,
    /// The account the money moved through.
    pub bank: Bank,
    /// Optional free text with more detail.
    pub description: String,
}

/// The validated field values for a new or updated entry, before an owner has
/// been assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub title: String,
    pub amount: f64,
    pub date: Date,
    pub category: Category,
    pub entry_type: EntryType,
    pub bank: Bank,
    pub description: String,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create the entry table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_entry_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS entry (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                title TEXT NOT NULL,
                amount REAL NOT NULL,
                date TEXT NOT NULL,
                category TEXT NOT NULL,
                entry_type TEXT NOT NULL,
                bank TEXT NOT NULL DEFAULT 'cash',
                description TEXT NOT NULL DEFAULT '',
                FOREIGN KEY(user_id) REFERENCES user(id) ON DELETE CASCADE
                )",
        (),
    )?;

    // Composite index used by the list, chart and report queries.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_entry_user_date ON entry(user_id, date);",
        (),
    )?;

    Ok(())
}

/// Create a new entry in the database from a validated draft.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn create_entry(
    draft: EntryDraft,
    user_id: UserID,
    connection: &Connection,
) -> Result<Entry, Error> {
    let entry = connection
        .prepare(
            "INSERT INTO entry (user_id, title, amount, date, category, entry_type, bank, description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             RETURNING id, user_id, title, amount, date, category, entry_type, bank, description",
        )?
        .query_row(
            (
                user_id.as_i64(),
                draft.title,
                draft.amount,
                draft.date,
                draft.category,
                draft.entry_type,
                draft.bank,
                draft.description,
            ),
            map_entry_row,
        )?;

    Ok(entry)
}

/// Retrieve an entry owned by `user_id` from the database by its `id`.
///
/// Entries belonging to other users are reported as missing so that a request
/// for another user's entry looks the same as a request for an entry that does
/// not exist.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to an entry owned by `user_id`,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_entry(id: EntryId, user_id: UserID, connection: &Connection) -> Result<Entry, Error> {
    let entry = connection
        .prepare(
            "SELECT id, user_id, title, amount, date, category, entry_type, bank, description
             FROM entry WHERE id = ?1 AND user_id = ?2",
        )?
        .query_row((id, user_id.as_i64()), map_entry_row)?;

    Ok(entry)
}

/// Overwrite the editable fields of the entry `id` owned by `user_id`.
///
/// Returns the number of rows affected: zero means no entry owned by `user_id`
/// has the ID `id`.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn update_entry(
    id: EntryId,
    user_id: UserID,
    draft: EntryDraft,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    let rows_affected = connection.execute(
        "UPDATE entry
         SET title = ?1, amount = ?2, date = ?3, category = ?4, entry_type = ?5, bank = ?6, description = ?7
         WHERE id = ?8 AND user_id = ?9",
        (
            draft.title,
            draft.amount,
            draft.date,
            draft.category,
            draft.entry_type,
            draft.bank,
            draft.description,
            id,
            user_id.as_i64(),
        ),
    )?;

    Ok(rows_affected)
}

/// Delete the entry `id` owned by `user_id`.
///
/// Returns the number of rows affected: zero means no entry owned by `user_id`
/// has the ID `id`.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn delete_entry(
    id: EntryId,
    user_id: UserID,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    let rows_affected = connection.execute(
        "DELETE FROM entry WHERE id = ?1 AND user_id = ?2",
        (id, user_id.as_i64()),
    )?;

    Ok(rows_affected)
}

/// Map a database row to an Entry.
pub fn map_entry_row(row: &Row) -> Result<Entry, rusqlite::Error> {
    Ok(Entry {
        id: row.get(0)?,
        user_id: UserID::new(row.get(1)?),
        title: row.get(2)?,
        amount: row.get(3)?,
        date: row.get(4)?,
        category: row.get(5)?,
        entry_type: row.get(6)?,
        bank: row.get(7)?,
        description: row.get(8)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
