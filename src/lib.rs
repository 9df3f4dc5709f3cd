//! # booklend
//!
//! A console book lending tracker for a small library:
//! - Add, lend, return, list and delete books
//! - At most three concurrent loans per patron
//! - Whole-collection JSON persistence between runs
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Interactive Shell                        │
//! │            (menu, prompts, -1 cancels, tables)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Request / Response
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Library Engine                          │
//! │         (loan cap, ISBN lookups, filters, moves)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ whole-collection save
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ books.json  │          │ loans.json  │
//!   │ (available) │          │  (active)   │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod catalog;
pub mod storage;
pub mod request;
pub mod engine;
pub mod shell;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{LibraryError, Result};
pub use config::Config;
pub use catalog::{Book, Loan, Patron};
pub use engine::{Filter, Library, LibraryState};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of booklend
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
