//! Configuration for booklend
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{LibraryError, Result};

/// Default cap on concurrent loans per patron
pub const MAX_BOOKS: usize = 3;

/// Default upper bound on a loan's duration, in months
pub const MAX_MONTHS: u32 = 2;

/// Main configuration for a library instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for the backing store documents
    /// Internal structure:
    ///   {data_dir}/
    ///     ├── books.json   (available books)
    ///     └── loans.json   (active loans)
    pub data_dir: PathBuf,

    // -------------------------------------------------------------------------
    // Lending Rules
    // -------------------------------------------------------------------------
    /// Max loans a single patron may hold at once
    pub max_books: usize,

    /// Longest loan a patron may promise, in months
    pub max_months: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./booklend_data"),
            max_books: MAX_BOOKS,
            max_months: MAX_MONTHS,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reject limits that would make lending impossible
    pub fn validate(&self) -> Result<()> {
        if self.max_books == 0 {
            return Err(LibraryError::Config("max_books must be at least 1".to_string()));
        }
        if self.max_months == 0 {
            return Err(LibraryError::Config("max_months must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (root for both documents)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the per-patron loan cap
    pub fn max_books(mut self, count: usize) -> Self {
        self.config.max_books = count;
        self
    }

    /// Set the longest allowed loan duration (in months)
    pub fn max_months(mut self, months: u32) -> Self {
        self.config.max_months = months;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
