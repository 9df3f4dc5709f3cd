//! Shell Module
//!
//! The interactive console front end.
//!
//! ## Flow
//! ```text
//!   menu choice ──► gather (prompts) ──► Answer::Value(Request) ──► Library::execute
//!                        │                                                │
//!                        └──► Answer::Cancelled (nothing changes)         ▼
//!                                                                  render Response
//! ```
//!
//! Every prompt accepts `-1` to abandon the current operation. End of input
//! counts as `-1` too, and at the main menu it exits.

mod prompt;
mod session;

use std::fmt::Display;

use crate::catalog::{format_row, COLUMNS, ROW_WIDTH};
use crate::request::RequestType;

pub use prompt::{Answer, Prompter, CANCEL};
pub use session::{ask_patron, Session};

// =============================================================================
// Main Menu
// =============================================================================

/// Text of the main menu, numbered as `MenuCommand::parse` expects
pub const MAIN_MENU: &str = "1. Add a new book\n\
2. Take a book from the library\n\
3. Return a book\n\
4. List all the filtered books\n\
5. Delete a book";

/// A recognised main menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    /// Start gathering a request of this type
    Open(RequestType),

    /// Leave the shell
    Exit,
}

impl MenuCommand {
    /// Parse a menu selection; `None` means "no such option"
    pub fn parse(input: &str) -> Option<Self> {
        let command = match input.trim() {
            "1" => MenuCommand::Open(RequestType::AddBook),
            "2" => MenuCommand::Open(RequestType::TakeBook),
            "3" => MenuCommand::Open(RequestType::ReturnBook),
            "4" => MenuCommand::Open(RequestType::ListBooks),
            "5" => MenuCommand::Open(RequestType::DeleteBook),
            CANCEL => MenuCommand::Exit,
            _ => return None,
        };
        Some(command)
    }
}

// =============================================================================
// Tables
// =============================================================================

/// Printed in place of a table with no rows
pub const EMPTY_TABLE: &str =
    "There are no books yet or no books fitting this criteria.\nPlease create or return one.";

/// Render rows under the column header, framed by dashed rules
///
/// Each row is rendered with its `Display` impl, which for books and loans
/// is the fixed-width row format.
pub fn render_table<T: Display>(rows: &[T]) -> String {
    if rows.is_empty() {
        return format!("\n{EMPTY_TABLE}\n");
    }

    let rule = "-".repeat(ROW_WIDTH);
    let mut out = String::new();

    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format_row(COLUMNS));
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    for row in rows {
        out.push_str(&row.to_string());
        out.push('\n');
    }
    out.push_str(&rule);
    out.push('\n');

    out
}
