//! Tests for Store
//!
//! These tests verify:
//! - Opening/creating the data directory
//! - Missing documents load as empty collections
//! - Whole-collection overwrite on save
//! - Malformed documents fail with a deserialization error
//! - On-disk JSON shape (dates, embedded book and patron)

use std::fs;
use std::path::PathBuf;

use booklend::catalog::{Book, Loan, Patron};
use booklend::storage::{CollectionKind, Store};
use booklend::LibraryError;
use chrono::NaiveDate;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_store() -> (TempDir, Store) {
    let temp_dir = TempDir::new().unwrap();
    let store = Store::open(temp_dir.path()).unwrap();
    (temp_dir, store)
}

fn book(isbn: &str) -> Book {
    let date = NaiveDate::from_ymd_opt(2001, 9, 11).unwrap();
    Book::new(format!("name-{isbn}"), "author", "category", "language", date, isbn)
}

fn loan(isbn: &str, patron: &str) -> Loan {
    let due = NaiveDate::from_ymd_opt(2030, 6, 1)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();
    Loan::new(book(isbn), due, Patron::new(patron))
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_open_creates_directory_but_no_documents() {
    let temp_dir = TempDir::new().unwrap();
    let path: PathBuf = temp_dir.path().join("library");

    assert!(!path.exists());

    let store = Store::open(&path).unwrap();

    assert!(path.is_dir());
    assert_eq!(store.data_dir(), path.as_path());
    assert!(!store.path_of(CollectionKind::Books).exists());
    assert!(!store.path_of(CollectionKind::Loans).exists());
}

#[test]
fn test_document_names() {
    assert_eq!(CollectionKind::Books.file_name(), "books.json");
    assert_eq!(CollectionKind::Loans.file_name(), "loans.json");
    assert_eq!(CollectionKind::Books.to_string(), "books");
    assert_eq!(CollectionKind::Loans.to_string(), "loans");
}

// =============================================================================
// Load Tests
// =============================================================================

#[test]
fn test_load_missing_document_is_empty() {
    let (_temp, store) = setup_temp_store();

    let books: Vec<Book> = store.load().unwrap();
    let loans: Vec<Loan> = store.load().unwrap();

    assert!(books.is_empty());
    assert!(loans.is_empty());
    assert!(!store.path_of(CollectionKind::Books).exists());
}

#[test]
fn test_load_malformed_document_fails() {
    let (_temp, store) = setup_temp_store();
    fs::write(store.path_of(CollectionKind::Books), "{ not json").unwrap();

    let err = store.load::<Book>().unwrap_err();

    assert!(matches!(
        err,
        LibraryError::Deserialization {
            kind: CollectionKind::Books,
            ..
        }
    ));
    assert!(!err.is_recoverable());
}

#[test]
fn test_load_wrong_shape_fails() {
    let (_temp, store) = setup_temp_store();
    fs::write(store.path_of(CollectionKind::Loans), r#"[{"name": "x"}]"#).unwrap();

    let err = store.load::<Loan>().unwrap_err();

    assert!(matches!(
        err,
        LibraryError::Deserialization {
            kind: CollectionKind::Loans,
            ..
        }
    ));
}

// =============================================================================
// Save Tests
// =============================================================================

#[test]
fn test_save_then_load_preserves_order() {
    let (_temp, store) = setup_temp_store();
    let books = vec![book("b"), book("a"), book("c"), book("a")];

    store.save(&books).unwrap();
    let loaded: Vec<Book> = store.load().unwrap();

    assert_eq!(loaded, books);
}

#[test]
fn test_save_overwrites_whole_collection() {
    let (_temp, store) = setup_temp_store();

    store.save(&[book("1"), book("2"), book("3")]).unwrap();
    store.save(&[book("9")]).unwrap();

    let loaded: Vec<Book> = store.load().unwrap();
    assert_eq!(loaded, vec![book("9")]);
}

#[test]
fn test_save_empty_collection() {
    let (_temp, store) = setup_temp_store();

    store.save(&[book("1")]).unwrap();
    store.save::<Book>(&[]).unwrap();

    let loaded: Vec<Book> = store.load().unwrap();
    assert!(loaded.is_empty());
    assert!(store.path_of(CollectionKind::Books).exists());
}

#[test]
fn test_collections_are_independent() {
    let (_temp, store) = setup_temp_store();

    store.save(&[book("shelf")]).unwrap();
    store.save(&[loan("lent", "Alice")]).unwrap();

    let books: Vec<Book> = store.load().unwrap();
    let loans: Vec<Loan> = store.load().unwrap();
    assert_eq!(books, vec![book("shelf")]);
    assert_eq!(loans, vec![loan("lent", "Alice")]);
}

// =============================================================================
// Format Tests
// =============================================================================

#[test]
fn test_loan_document_embeds_book_and_patron() {
    let (_temp, store) = setup_temp_store();
    store.save(&[loan("42", "Alice")]).unwrap();

    let raw = fs::read_to_string(store.path_of(CollectionKind::Loans)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let first = &json[0];
    assert_eq!(first["book"]["isbn"], "42");
    assert_eq!(first["book"]["publication_date"], "2001-09-11");
    assert_eq!(first["patron"]["name"], "Alice");
    assert_eq!(first["promised_return_date"], "2030-06-01T09:30:00");
}

#[test]
fn test_load_handwritten_document() {
    let (_temp, store) = setup_temp_store();
    let raw = r#"[
        {
            "name": "Dune",
            "author": "Herbert",
            "category": "SciFi",
            "language": "English",
            "publication_date": "1965-08-01",
            "isbn": "978-0441013593"
        }
    ]"#;
    fs::write(store.path_of(CollectionKind::Books), raw).unwrap();

    let books: Vec<Book> = store.load().unwrap();

    assert_eq!(books.len(), 1);
    assert_eq!(books[0].author, "Herbert");
    assert_eq!(
        books[0].publication_date,
        NaiveDate::from_ymd_opt(1965, 8, 1).unwrap()
    );
}
