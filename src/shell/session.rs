//! Interactive session
//!
//! Runs the main menu for one patron until they exit.

use std::io::{BufRead, Write};

use chrono::Local;

use crate::catalog::{Book, Loan, Patron};
use crate::engine::{Filter, Library};
use crate::error::{LibraryError, Result};
use crate::request::{Request, RequestType, Response};

use super::{render_table, Answer, MenuCommand, Prompter, CANCEL, MAIN_MENU};

/// Filtering sub-menu
const FILTER_MENU: &str = "1. Author\n2. Category\n3. Language\n4. ISBN\n5. Name\n6. Taken or available books";

/// Taken-or-available sub-menu
const SHELF_MENU: &str = "1. Taken books\n2. Available books";

/// Ask who is using the library and greet them
///
/// The name is resolved against existing loans, so a returning patron gets
/// their loans back.
pub fn ask_patron<R: BufRead, W: Write>(
    library: &Library,
    prompter: &mut Prompter<R, W>,
) -> Result<Answer<Patron>> {
    let name = match prompter.ask("What's your name? ")? {
        Answer::Value(name) => name,
        Answer::Cancelled => return Ok(Answer::Cancelled),
    };

    let patron = library.find_patron(&name);
    prompter.blank()?;
    prompter.say(format!("Hello, {}", patron.name))?;
    prompter.blank()?;

    Ok(Answer::Value(patron))
}

/// One patron's console session over a library
pub struct Session<R, W> {
    library: Library,
    patron: Patron,
    prompter: Prompter<R, W>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(library: Library, patron: Patron, prompter: Prompter<R, W>) -> Self {
        Self {
            library,
            patron,
            prompter,
        }
    }

    /// Run the main menu until the patron exits or input ends
    ///
    /// Validation and input errors are printed and the menu continues. I/O
    /// and store errors end the session.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.prompter
                .say("Enter a number of an action you would like to perform or -1 to exit: ")?;
            self.prompter.blank()?;
            self.prompter.say(MAIN_MENU)?;
            self.prompter.blank()?;

            let Some(line) = self.prompter.read_choice()? else {
                tracing::debug!("input closed, leaving session");
                return Ok(());
            };

            match MenuCommand::parse(&line) {
                Some(MenuCommand::Exit) => {
                    self.prompter.blank()?;
                    self.prompter.say("Returning...")?;
                    return Ok(());
                }
                Some(MenuCommand::Open(request_type)) => {
                    self.prompter.blank()?;
                    match self.handle(request_type) {
                        Ok(()) => {}
                        Err(e) if e.is_recoverable() => self.prompter.report(&e)?,
                        Err(e) => return Err(e),
                    }
                }
                None => {
                    self.prompter.blank()?;
                    self.prompter.say("No such option")?;
                }
            }
        }
    }

    /// Gather, execute and render one request
    pub fn handle(&mut self, request_type: RequestType) -> Result<()> {
        let answer = match request_type {
            RequestType::AddBook => self.gather_book()?.map(Request::AddBook),
            RequestType::TakeBook => self.gather_loan()?.map(Request::TakeBook),
            RequestType::ReturnBook => self.gather_return()?.map(Request::ReturnBook),
            RequestType::ListBooks => self.gather_filter()?.map(Request::ListBooks),
            RequestType::DeleteBook => self.gather_deletion()?.map(Request::DeleteBook),
        };

        let Answer::Value(request) = answer else {
            return Ok(());
        };

        let response = self.library.execute(request, &self.patron)?;
        self.render(response)
    }

    // =========================================================================
    // Gathering
    // =========================================================================

    fn gather_book(&mut self) -> Result<Answer<Book>> {
        let p = &mut self.prompter;

        let Answer::Value(name) = p.ask("Enter the book's name: ")? else {
            return Ok(Answer::Cancelled);
        };
        let Answer::Value(author) = p.ask("Enter the author: ")? else {
            return Ok(Answer::Cancelled);
        };
        let Answer::Value(category) = p.ask("Enter the category: ")? else {
            return Ok(Answer::Cancelled);
        };
        let Answer::Value(language) = p.ask("Enter the language: ")? else {
            return Ok(Answer::Cancelled);
        };
        let Answer::Value(published) = p.ask_date("Enter the publication date or -1 to go back: ")?
        else {
            return Ok(Answer::Cancelled);
        };
        let Answer::Value(isbn) = p.ask("Enter the ISBN: ")? else {
            return Ok(Answer::Cancelled);
        };

        Ok(Answer::Value(Book::new(
            name, author, category, language, published, isbn,
        )))
    }

    fn gather_loan(&mut self) -> Result<Answer<Loan>> {
        if self.library.books().is_empty() {
            return Err(LibraryError::NoBooksAvailable);
        }
        if !self.library.can_take_book(&self.patron) {
            return Err(LibraryError::LoanLimitReached {
                max: self.library.config().max_books,
            });
        }

        self.prompter
            .say("What book do you want to take? (ISBN code).\nEnter -1 to go back.")?;
        self.prompter.say(render_table(self.library.books()))?;

        let book = loop {
            let Answer::Value(isbn) = self.prompter.ask("ISBN: ")? else {
                return Ok(Answer::Cancelled);
            };
            match self.library.book_by_isbn(&isbn) {
                Some(book) => break book.clone(),
                None => self.invalid_isbn()?,
            }
        };

        let max = self.library.config().max_months;
        let Answer::Value(months) = self.prompter.ask_months(max)? else {
            return Ok(Answer::Cancelled);
        };

        let now = Local::now().naive_local();
        Ok(Answer::Value(Loan::for_months(
            book,
            self.patron.clone(),
            months,
            now,
        )))
    }

    fn gather_return(&mut self) -> Result<Answer<Loan>> {
        if !self.library.has_any_books_taken(&self.patron) {
            return Err(LibraryError::NoLoansHeld);
        }

        self.prompter
            .say("Enter an ISBN of the book you want to return.\nEnter -1 to go back")?;
        let held: Vec<&Loan> = self.library.state().loans_of(&self.patron).collect();
        self.prompter.say(render_table(&held))?;

        loop {
            let Answer::Value(isbn) = self.prompter.ask("ISBN: ")? else {
                return Ok(Answer::Cancelled);
            };
            match self.library.loan_by_isbn_and_patron(&self.patron, &isbn) {
                Some(loan) => return Ok(Answer::Value(loan.clone())),
                None => self.invalid_isbn()?,
            }
        }
    }

    fn gather_filter(&mut self) -> Result<Answer<Filter>> {
        loop {
            self.prompter
                .say("Choose filtering method by entering a digit or -1 to exit:")?;
            self.prompter.say(FILTER_MENU)?;
            self.prompter.blank()?;

            let Some(choice) = self.prompter.read_choice()? else {
                return Ok(Answer::Cancelled);
            };

            let label = match choice.trim() {
                "1" => "Enter an author: ",
                "2" => "Enter a category: ",
                "3" => "Enter a language: ",
                "4" => "Enter an ISBN: ",
                "5" => "Enter a name: ",
                "6" => return self.gather_shelf(),
                CANCEL => return Ok(Answer::Cancelled),
                _ => {
                    self.prompter.say("No such option")?;
                    continue;
                }
            };

            if self.library.books().is_empty() {
                return Err(LibraryError::NothingMatches);
            }
            self.prompter.say(render_table(self.library.books()))?;

            let query = self.prompter.ask(label)?;
            return Ok(query.map(|q| Filter::from_criterion(choice.trim(), &q)));
        }
    }

    fn gather_shelf(&mut self) -> Result<Answer<Filter>> {
        loop {
            self.prompter.blank()?;
            self.prompter
                .say("Do you want taken or available books? Write -1 to exit.")?;
            self.prompter.say(SHELF_MENU)?;
            self.prompter.blank()?;

            let Some(choice) = self.prompter.read_choice()? else {
                return Ok(Answer::Cancelled);
            };

            match choice.trim() {
                "1" if self.library.loans().is_empty() => {
                    return Err(LibraryError::NothingMatches)
                }
                "1" => return Ok(Answer::Value(Filter::Loaned)),
                "2" if self.library.books().is_empty() => {
                    return Err(LibraryError::NothingMatches)
                }
                "2" => return Ok(Answer::Value(Filter::Available)),
                CANCEL => return Ok(Answer::Cancelled),
                _ => self.prompter.say("No such option")?,
            }
        }
    }

    fn gather_deletion(&mut self) -> Result<Answer<Book>> {
        self.prompter.say("Available books:")?;
        self.prompter.say(render_table(self.library.books()))?;
        self.prompter.say("Taken books")?;
        self.prompter.say(render_table(self.library.loans()))?;

        let Answer::Value(isbn) = self
            .prompter
            .ask("Which book you want to delete?\nEnter ISBN: ")?
        else {
            return Ok(Answer::Cancelled);
        };

        match self.library.state().find_anywhere(&isbn) {
            Some(book) => Ok(Answer::Value(book.clone())),
            None => Err(LibraryError::IsbnNotFound(isbn)),
        }
    }

    fn invalid_isbn(&mut self) -> Result<()> {
        self.prompter
            .say("Please enter a valid ISBN from a list.\nEnter -1 to go back.")?;
        self.prompter.blank()
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    fn render(&mut self, response: Response) -> Result<()> {
        let p = &mut self.prompter;
        match response {
            Response::Added => {
                p.blank()?;
                p.say("Book successfully added.")?;
                p.blank()
            }
            Response::Taken { applied: true } => {
                p.say("Book taken successfully. Enjoy!")?;
                p.blank()
            }
            Response::Returned { applied: true, late } => {
                p.say("Book was successfully returned.")?;
                p.blank()?;
                if late {
                    p.say("You returned this book after the date you promised. Please keep your promises.")?;
                    p.blank()?;
                }
                Ok(())
            }
            Response::Listing(books) => p.say(render_table(&books)),
            Response::Deleted { applied: true } => {
                p.blank()?;
                p.say("Deleted successfully.")?;
                p.blank()
            }
            Response::Taken { applied: false }
            | Response::Returned { applied: false, .. }
            | Response::Deleted { applied: false } => Ok(()),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The library being worked on
    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Get the prompter (and through it, the captured output)
    pub fn prompter(&self) -> &Prompter<R, W> {
        &self.prompter
    }

    /// End the session, handing back the library
    pub fn into_library(self) -> Library {
        self.library
    }
}
