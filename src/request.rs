//! Request definitions
//!
//! The finite set of operations the shell can ask of the engine, and what
//! comes back. The shell gathers a `Request` from the console (or gives up
//! with `Answer::Cancelled`), the engine executes it, the shell renders the
//! `Response`.

use crate::catalog::{Book, Loan};
use crate::engine::Filter;

/// Request kinds, one per main menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
    AddBook,
    TakeBook,
    ReturnBook,
    ListBooks,
    DeleteBook,
}

/// A fully gathered request
#[derive(Debug, Clone)]
pub enum Request {
    /// Add a book to the catalog
    AddBook(Book),

    /// Record a loan for the session's patron
    TakeBook(Loan),

    /// End one of the session patron's loans
    ReturnBook(Loan),

    /// List books matching a filter
    ListBooks(Filter),

    /// Delete a book, available or loaned
    DeleteBook(Book),
}

/// Outcome of an executed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// The book was appended to the catalog
    Added,

    /// `applied` is false when the take was silently ignored
    Taken { applied: bool },

    /// `late` is only meaningful when `applied`
    Returned { applied: bool, late: bool },

    /// Matching books, in collection order
    Listing(Vec<Book>),

    /// `applied` is false when the book was in neither collection
    Deleted { applied: bool },
}
