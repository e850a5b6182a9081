//! Entry management for the expense tracking application.
//!
//! This module contains everything related to income and expense entries:
//! - The `Entry` model, its enums and database functions
//! - Form parsing and validation shared by the create and edit pages
//! - Query helpers for the filtered entry list
//! - View handlers for the entry-related web pages

pub(crate) mod core;
mod create_endpoint;
mod create_page;
mod delete_endpoint;
mod delete_page;
mod edit_endpoint;
mod edit_page;
mod form;
mod list_page;
mod query;

pub use core::{Bank, Category, Entry, EntryType, create_entry_table};
pub use create_endpoint::create_entry_endpoint;
pub use create_page::get_new_entry_page;
pub use delete_endpoint::delete_entry_endpoint;
pub use delete_page::get_delete_entry_page;
pub use edit_endpoint::edit_entry_endpoint;
pub use edit_page::get_edit_entry_page;
pub use list_page::get_entry_list_page;
pub use query::{EntryFilter, get_entries};
