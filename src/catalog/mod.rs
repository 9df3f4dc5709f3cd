//! Catalog Module
//!
//! Value records tracked by the library.
//!
//! ## Entities
//! - `Book`: bibliographic data, keyed (loosely) by ISBN
//! - `Loan`: a book on loan to a patron until a promised date
//! - `Patron`: a borrower, identified by name only
//!
//! ## Row Format
//! Books and loans render as one fixed-width table row:
//! ```text
//! | Name         | Author       | Category     | Language     | Publication Date | ISBN            |
//! ```
//! A loan renders its embedded book; the patron is not shown.

mod book;
mod loan;
mod patron;

pub use book::{parse_date, Book};
pub use loan::Loan;
pub use patron::Patron;

/// Column headers, in row order
pub const COLUMNS: [&str; 6] = [
    "Name",
    "Author",
    "Category",
    "Language",
    "Publication Date",
    "ISBN",
];

/// Total width of a rendered row (and of the table rules)
pub const ROW_WIDTH: usize = 98;

/// Format six cells into one pipe-delimited row
pub(crate) fn format_row(cells: [&str; 6]) -> String {
    format!(
        "| {:<12} | {:<12} | {:<12} | {:<12} | {:<16} | {:<15} |",
        cells[0], cells[1], cells[2], cells[3], cells[4], cells[5]
    )
}
