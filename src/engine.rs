//! Engine Module
//!
//! The lending engine: queries and mutations over the two collections.
//!
//! ## Responsibilities
//! - Answer business-rule queries (loan cap, ISBN lookups, late returns)
//! - Move books between the available collection and active loans
//! - Re-save every collection a mutation touches, in full
//!
//! ## Invariant
//! A book value sits either in `books` or inside exactly one loan, never
//! both. Mutations move it, they never copy it into a second place. The two
//! documents are saved one after the other, so a crash between the saves can
//! leave the store out of step with this invariant; that is not repaired.

use std::path::Path;

use chrono::{Local, NaiveDateTime};

use crate::catalog::{Book, Loan, Patron};
use crate::config::Config;
use crate::error::Result;
use crate::request::{Request, Response};
use crate::storage::Store;

// =============================================================================
// Filters
// =============================================================================

/// How `filter_books` selects books
///
/// Field filters compare with exact string equality, case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Author(String),
    Category(String),
    Language(String),
    Isbn(String),
    Name(String),

    /// Books currently on loan, in loan order
    Loaned,

    /// Every available book, unfiltered
    Available,
}

impl Filter {
    /// Build a filter from a numbered criterion and its query
    ///
    /// "1" author, "2" category, "3" language, "4" ISBN, "5" name,
    /// "6" loaned; anything else lists available books.
    pub fn from_criterion(criterion: &str, query: &str) -> Self {
        let query = query.to_string();
        match criterion {
            "1" => Filter::Author(query),
            "2" => Filter::Category(query),
            "3" => Filter::Language(query),
            "4" => Filter::Isbn(query),
            "5" => Filter::Name(query),
            "6" => Filter::Loaned,
            _ => Filter::Available,
        }
    }

    /// Does `book` pass this field filter
    ///
    /// `Loaned` and `Available` select by collection, not by field, so every
    /// book passes.
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            Filter::Author(q) => book.author == *q,
            Filter::Category(q) => book.category == *q,
            Filter::Language(q) => book.language == *q,
            Filter::Isbn(q) => book.isbn == *q,
            Filter::Name(q) => book.name == *q,
            Filter::Loaned | Filter::Available => true,
        }
    }
}

// =============================================================================
// Late Returns
// =============================================================================

/// Has the promised return date passed
pub fn is_returned_late(promised_return_date: NaiveDateTime) -> bool {
    is_returned_late_at(promised_return_date, Local::now().naive_local())
}

/// Has the promised return date passed, as of `now`
///
/// Returning exactly at the deadline is on time.
pub fn is_returned_late_at(promised_return_date: NaiveDateTime, now: NaiveDateTime) -> bool {
    now > promised_return_date
}

// =============================================================================
// State
// =============================================================================

/// The whole database: available books and active loans
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryState {
    /// Books on the shelf, in insertion order
    pub books: Vec<Book>,

    /// Active loans, in the order they were taken
    pub loans: Vec<Loan>,
}

impl LibraryState {
    pub fn new(books: Vec<Book>, loans: Vec<Loan>) -> Self {
        Self { books, loans }
    }

    /// Number of loans held by `patron`
    pub fn loans_held_by(&self, patron: &Patron) -> usize {
        self.loans.iter().filter(|loan| loan.is_held_by(patron)).count()
    }

    /// True if `patron` holds at least one loan
    pub fn has_any_books_taken(&self, patron: &Patron) -> bool {
        self.loans.iter().any(|loan| loan.is_held_by(patron))
    }

    /// Loans held by `patron`, in loan order
    pub fn loans_of<'a>(&'a self, patron: &'a Patron) -> impl Iterator<Item = &'a Loan> + 'a {
        self.loans.iter().filter(move |loan| loan.is_held_by(patron))
    }

    /// First available book with this exact ISBN
    pub fn book_by_isbn(&self, isbn: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.isbn == isbn)
    }

    /// First loan of this ISBN held by `patron`
    pub fn loan_by_isbn_and_patron(&self, patron: &Patron, isbn: &str) -> Option<&Loan> {
        self.loans
            .iter()
            .find(|loan| loan.book.isbn == isbn && loan.is_held_by(patron))
    }

    /// First book with this ISBN, looking on the shelf before the loans
    pub fn find_anywhere(&self, isbn: &str) -> Option<&Book> {
        self.book_by_isbn(isbn).or_else(|| {
            self.loans
                .iter()
                .find(|loan| loan.book.isbn == isbn)
                .map(|loan| &loan.book)
        })
    }

    /// Select books according to `filter`, preserving collection order
    pub fn filter_books(&self, filter: &Filter) -> Vec<Book> {
        match filter {
            Filter::Loaned => self.loans.iter().map(|loan| loan.book.clone()).collect(),
            Filter::Available => self.books.clone(),
            field => self
                .books
                .iter()
                .filter(|book| field.matches(book))
                .cloned()
                .collect(),
        }
    }
}

// =============================================================================
// Library
// =============================================================================

/// The lending engine
///
/// Owns the in-memory state and the store it is flushed to. Every mutation
/// that changes a collection saves that whole collection before returning.
///
/// Rule violations in `take_book` and `return_book` are not errors: the call
/// does nothing and returns `Ok(false)`. Callers are expected to check the
/// rules first (the shell does).
#[derive(Debug)]
pub struct Library {
    /// Engine configuration
    config: Config,

    /// Backing documents
    store: Store,

    /// Both collections
    state: LibraryState,
}

impl Library {
    /// Open the library described by `config`
    ///
    /// Loads both collections. A missing document is an empty collection; a
    /// malformed one fails with `Deserialization`.
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;

        let store = Store::open(&config.data_dir)?;
        let loans = store.load::<Loan>()?;
        let books = store.load::<Book>()?;

        tracing::info!(
            books = books.len(),
            loans = loans.len(),
            data_dir = %config.data_dir.display(),
            "library opened"
        );

        Ok(Self {
            config,
            store,
            state: LibraryState::new(books, loans),
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the given data directory
    pub fn open_path(path: &Path) -> Result<Self> {
        let config = Config::builder().data_dir(path).build();
        Self::open(config)
    }

    /// Resolve a patron by name
    ///
    /// Reuses the patron recorded on an existing loan, otherwise starts a new
    /// one for this session. Patrons are not stored on their own.
    pub fn find_patron(&self, name: &str) -> Patron {
        self.state
            .loans
            .iter()
            .find(|loan| loan.patron.name == name)
            .map(|loan| loan.patron.clone())
            .unwrap_or_else(|| Patron::new(name))
    }

    // =========================================================================
    // Rules
    // =========================================================================

    /// True if `patron` holds fewer loans than the cap
    pub fn can_take_book(&self, patron: &Patron) -> bool {
        self.state.loans_held_by(patron) < self.config.max_books
    }

    /// True if `patron` holds at least one loan
    pub fn has_any_books_taken(&self, patron: &Patron) -> bool {
        self.state.has_any_books_taken(patron)
    }

    /// First available book with this exact ISBN
    pub fn book_by_isbn(&self, isbn: &str) -> Option<&Book> {
        self.state.book_by_isbn(isbn)
    }

    /// First loan of this ISBN held by `patron`
    pub fn loan_by_isbn_and_patron(&self, patron: &Patron, isbn: &str) -> Option<&Loan> {
        self.state.loan_by_isbn_and_patron(patron, isbn)
    }

    /// Select books according to `filter`
    pub fn filter_books(&self, filter: &Filter) -> Vec<Book> {
        self.state.filter_books(filter)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Execute a request on behalf of `patron`
    ///
    /// Routes requests to the matching operation
    pub fn execute(&mut self, request: Request, patron: &Patron) -> Result<Response> {
        match request {
            Request::AddBook(book) => {
                self.add_new_book(book)?;
                Ok(Response::Added)
            }
            Request::TakeBook(loan) => {
                let applied = self.take_book(loan, patron)?;
                Ok(Response::Taken { applied })
            }
            Request::ReturnBook(loan) => {
                let late = is_returned_late(loan.promised_return_date);
                let applied = self.return_book(&loan, patron)?;
                Ok(Response::Returned { applied, late })
            }
            Request::ListBooks(filter) => Ok(Response::Listing(self.filter_books(&filter))),
            Request::DeleteBook(book) => {
                let applied = self.delete_book(&book)?;
                Ok(Response::Deleted { applied })
            }
        }
    }

    /// Append a book to the catalog and save the catalog
    pub fn add_new_book(&mut self, book: Book) -> Result<()> {
        tracing::info!(isbn = %book.isbn, name = %book.name, "adding book");

        self.state.books.push(book);
        self.store.save(&self.state.books)
    }

    /// Lend a book
    ///
    /// Does nothing unless `patron` is under the cap and is the patron named
    /// on `loan`. Otherwise records the loan, takes the book off the shelf and
    /// saves both collections.
    ///
    /// Returns whether the loan was recorded.
    pub fn take_book(&mut self, loan: Loan, patron: &Patron) -> Result<bool> {
        if !self.can_take_book(patron) || !loan.is_held_by(patron) {
            tracing::debug!(patron = %patron.name, isbn = %loan.book.isbn, "take ignored");
            return Ok(false);
        }

        if let Some(pos) = self.state.books.iter().position(|b| *b == loan.book) {
            self.state.books.remove(pos);
        }

        tracing::info!(
            patron = %patron.name,
            isbn = %loan.book.isbn,
            until = %loan.promised_return_date,
            "book taken"
        );
        self.state.loans.push(loan);

        self.store.save(&self.state.loans)?;
        self.store.save(&self.state.books)?;
        Ok(true)
    }

    /// Take back a loaned book
    ///
    /// Does nothing unless `patron` holds any loans, is the patron named on
    /// `loan`, and `loan` is active. Otherwise puts the book back on the
    /// shelf, drops the loan and saves both collections.
    ///
    /// Returns whether the return was recorded.
    pub fn return_book(&mut self, loan: &Loan, patron: &Patron) -> Result<bool> {
        if !self.has_any_books_taken(patron) || !loan.is_held_by(patron) {
            tracing::debug!(patron = %patron.name, isbn = %loan.book.isbn, "return ignored");
            return Ok(false);
        }

        let Some(pos) = self.state.loans.iter().position(|l| l == loan) else {
            tracing::debug!(patron = %patron.name, isbn = %loan.book.isbn, "no such loan");
            return Ok(false);
        };

        let returned = self.state.loans.remove(pos);
        if is_returned_late(returned.promised_return_date) {
            tracing::warn!(
                patron = %patron.name,
                isbn = %returned.book.isbn,
                promised = %returned.promised_return_date,
                "late return"
            );
        }
        tracing::info!(patron = %patron.name, isbn = %returned.book.isbn, "book returned");
        self.state.books.push(returned.book);

        self.store.save(&self.state.loans)?;
        self.store.save(&self.state.books)?;
        Ok(true)
    }

    /// Delete a book from wherever it is
    ///
    /// The shelf is searched first; only if the book is not there is the
    /// first loan carrying it dropped. Only the collection that changed is
    /// saved.
    ///
    /// Returns whether anything was deleted.
    pub fn delete_book(&mut self, book: &Book) -> Result<bool> {
        if let Some(pos) = self.state.books.iter().position(|b| b == book) {
            self.state.books.remove(pos);
            tracing::info!(isbn = %book.isbn, "deleted available book");
            self.store.save(&self.state.books)?;
            return Ok(true);
        }

        if let Some(pos) = self.state.loans.iter().position(|l| l.book == *book) {
            let loan = self.state.loans.remove(pos);
            tracing::info!(isbn = %book.isbn, patron = %loan.patron.name, "deleted loaned book");
            self.store.save(&self.state.loans)?;
            return Ok(true);
        }

        tracing::debug!(isbn = %book.isbn, "delete found nothing");
        Ok(false)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Both collections
    pub fn state(&self) -> &LibraryState {
        &self.state
    }

    /// Available books
    pub fn books(&self) -> &[Book] {
        &self.state.books
    }

    /// Active loans
    pub fn loans(&self) -> &[Loan] {
        &self.state.loans
    }

    /// Give up the store and keep the collections
    pub fn into_state(self) -> LibraryState {
        self.state
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
