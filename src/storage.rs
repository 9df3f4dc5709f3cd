//! Storage Module
//!
//! Persistence gateway for the two library collections.
//!
//! ## Responsibilities
//! - Load a whole collection from its backing document
//! - Overwrite a whole collection on every save (no appends, no partial writes)
//! - Treat a missing document as an empty collection
//!
//! ## Layout
//! ```text
//! {data_dir}/
//!   ├── books.json    JSON array of Book
//!   └── loans.json    JSON array of Loan (book and patron embedded by value)
//! ```
//!
//! The two documents are written independently. There is no transaction
//! spanning them.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::catalog::{Book, Loan};
use crate::error::{LibraryError, Result};

/// The collections the store knows how to persist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Books,
    Loans,
}

impl CollectionKind {
    /// Name of the backing document inside the data directory
    pub fn file_name(self) -> &'static str {
        match self {
            CollectionKind::Books => "books.json",
            CollectionKind::Loans => "loans.json",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionKind::Books => f.write_str("books"),
            CollectionKind::Loans => f.write_str("loans"),
        }
    }
}

/// A record type stored as one collection
pub trait Collection: Serialize + DeserializeOwned {
    const KIND: CollectionKind;
}

impl Collection for Book {
    const KIND: CollectionKind = CollectionKind::Books;
}

impl Collection for Loan {
    const KIND: CollectionKind = CollectionKind::Loans;
}

/// Reads and writes collection documents under one directory
#[derive(Debug, Clone)]
pub struct Store {
    /// Directory holding the documents
    data_dir: PathBuf,
}

impl Store {
    /// Open or create a store rooted at `path`
    ///
    /// Creates the directory. Documents are only created by `save`.
    pub fn open(path: &Path) -> Result<Self> {
        fs::create_dir_all(path)?;

        Ok(Self {
            data_dir: path.to_path_buf(),
        })
    }

    /// Load a whole collection
    ///
    /// Returns:
    /// - `Ok(vec![])` if the document does not exist yet
    /// - `Err(Deserialization)` if it exists but is malformed
    pub fn load<T: Collection>(&self) -> Result<Vec<T>> {
        let kind = T::KIND;
        let path = self.path_of(kind);

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(%kind, "no backing document, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let items: Vec<T> = serde_json::from_str(&contents)
            .map_err(|source| LibraryError::Deserialization { kind, source })?;

        tracing::info!(%kind, count = items.len(), "loaded collection");
        Ok(items)
    }

    /// Overwrite a whole collection
    pub fn save<T: Collection>(&self, items: &[T]) -> Result<()> {
        let kind = T::KIND;
        let encoded = serde_json::to_string_pretty(items)
            .map_err(|source| LibraryError::Serialization { kind, source })?;

        fs::write(self.path_of(kind), encoded)?;

        tracing::debug!(%kind, count = items.len(), "saved collection");
        Ok(())
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Full path of a collection's document
    pub fn path_of(&self, kind: CollectionKind) -> PathBuf {
        self.data_dir.join(kind.file_name())
    }
}
