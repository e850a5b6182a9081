//! Pure aggregation functions over a user's entries.
//!
//! These operate on entry slices already fetched from the database so the
//! same numbers can back the list page totals, the charts and the report
//! table without re-querying.

use time::Date;

use crate::entry::{Bank, Category, Entry, EntryType};

/// Income and expense sums for a set of entries.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
}

impl Totals {
    /// The net balance, income less expenses.
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

/// Sums the incomes and expenses of `entries`.
///
/// An empty slice produces zero totals.
pub fn totals(entries: &[Entry]) -> Totals {
    entries.iter().fold(Totals::default(), |mut acc, entry| {
        match entry.entry_type {
            EntryType::Income => acc.income += entry.amount,
            EntryType::Expense => acc.expense += entry.amount,
        }

        acc
    })
}

/// Sums income amounts per bank.
///
/// Banks are returned in declaration order and banks without any income are
/// omitted.
pub fn bank_income_totals(entries: &[Entry]) -> Vec<(Bank, f64)> {
    Bank::ALL
        .iter()
        .filter_map(|&bank| {
            let total: f64 = entries
                .iter()
                .filter(|entry| entry.entry_type == EntryType::Income && entry.bank == bank)
                .map(|entry| entry.amount)
                .sum();

            (total > 0.0).then_some((bank, total))
        })
        .collect()
}

/// Sums expense amounts per category.
///
/// Categories are returned in declaration order and categories without any
/// expenses are omitted.
pub fn category_expense_totals(entries: &[Entry]) -> Vec<(Category, f64)> {
    Category::ALL
        .iter()
        .filter_map(|&category| {
            let total: f64 = entries
                .iter()
                .filter(|entry| {
                    entry.entry_type == EntryType::Expense && entry.category == category
                })
                .map(|entry| entry.amount)
                .sum();

            (total > 0.0).then_some((category, total))
        })
        .collect()
}

/// Sums amounts per category, split by entry type.
///
/// Used by the grouped bar chart. Categories without any entries are omitted.
pub fn category_totals_by_type(entries: &[Entry]) -> Vec<(Category, Totals)> {
    Category::ALL
        .iter()
        .filter_map(|&category| {
            let category_totals = entries
                .iter()
                .filter(|entry| entry.category == category)
                .fold(Totals::default(), |mut acc, entry| {
                    match entry.entry_type {
                        EntryType::Income => acc.income += entry.amount,
                        EntryType::Expense => acc.expense += entry.amount,
                    }

                    acc
                });

            (category_totals.income > 0.0 || category_totals.expense > 0.0)
                .then_some((category, category_totals))
        })
        .collect()
}

/// One row of the pivoted report table.
#[derive(Debug, Clone, PartialEq)]
pub struct DateRow {
    pub date: Date,
    pub income: f64,
    pub expense: f64,
}

/// Groups `entries` by date and sums amounts per entry type.
///
/// Rows come back sorted by date ascending with zeroes where a date has no
/// entries of one type.
pub fn pivot_by_date(entries: &[Entry]) -> Vec<DateRow> {
    let mut rows: Vec<DateRow> = Vec::new();

    for entry in entries {
        let row = match rows.iter_mut().find(|row| row.date == entry.date) {
            Some(row) => row,
            None => {
                rows.push(DateRow {
                    date: entry.date,
                    income: 0.0,
                    expense: 0.0,
                });

                // Just pushed, cannot be empty.
                rows.last_mut().unwrap()
            }
        };

        match entry.entry_type {
            EntryType::Income => row.income += entry.amount,
            EntryType::Expense => row.expense += entry.amount,
        }
    }

    rows.sort_by_key(|row| row.date);
    rows
}
