//! Book definition and date input parsing

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{LibraryError, Result};

use super::format_row;

/// Date layouts accepted from the console
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

/// Timestamp layouts accepted from the console (time part is dropped)
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// A book in the catalog
///
/// No field is validated: empty strings and duplicate ISBNs are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub name: String,
    pub author: String,
    pub category: String,
    pub language: String,
    pub publication_date: NaiveDate,
    pub isbn: String,
}

impl Book {
    pub fn new(
        name: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
        language: impl Into<String>,
        publication_date: NaiveDate,
        isbn: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            author: author.into(),
            category: category.into(),
            language: language.into(),
            publication_date,
            isbn: isbn.into(),
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self.publication_date.format("%Y-%m-%d").to_string();
        f.write_str(&format_row([
            &self.name,
            &self.author,
            &self.category,
            &self.language,
            &date,
            &self.isbn,
        ]))
    }
}

/// Parse a user-supplied date
///
/// "2000-02-15", "2000/02/15", "2000.02.15" and "2000-02-15 10:30:00" all
/// yield 2000-02-15.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            return Ok(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(stamp.date());
        }
    }

    Err(LibraryError::InputFormat(
        "Enter a valid datetime, like this: 2000-02-15".to_string(),
    ))
}
