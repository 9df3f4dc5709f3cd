//! Loan definition
//!
//! A loan embeds its book and patron by value. The same book value leaves the
//! available collection when the loan is created and goes back when it ends.

use std::fmt;

use chrono::{Months, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};

use super::{Book, Patron};

/// A book lent to a patron
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    /// The book on loan
    pub book: Book,

    /// When the patron promised to bring it back
    pub promised_return_date: NaiveDateTime,

    /// Who holds it
    pub patron: Patron,
}

impl Loan {
    pub fn new(book: Book, promised_return_date: NaiveDateTime, patron: Patron) -> Self {
        Self {
            book,
            promised_return_date,
            patron,
        }
    }

    /// Loan lasting `months` calendar months from `now`
    ///
    /// Day-of-month is clamped to the end of shorter months (Jan 31 + 1 month
    /// is the last day of February). Sub-second precision is dropped.
    /// Saturates at the maximum representable timestamp.
    pub fn for_months(book: Book, patron: Patron, months: u32, now: NaiveDateTime) -> Self {
        let promised = now
            .trunc_subsecs(0)
            .checked_add_months(Months::new(months))
            .unwrap_or(NaiveDateTime::MAX);
        Self::new(book, promised, patron)
    }

    /// True if the loan is held by `patron`
    pub fn is_held_by(&self, patron: &Patron) -> bool {
        self.patron.name == patron.name
    }
}

impl fmt::Display for Loan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.book, f)
    }
}
