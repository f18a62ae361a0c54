//! Dashboard event handling.
//!
//! Every interactive element maps to one handler in [`handler_for`]. A handler
//! sees the event (element, form state, clock) and a snapshot of the tables,
//! and returns the fragment to display plus at most one write to perform.
//! Handlers never touch the database; [`apply`] does.

use std::collections::BTreeMap;

use anyhow::Result;
use chrono::NaiveDateTime;
use tracing::warn;

use speedread_db::Database;
use speedread_metrics::{
    DEFAULT_MINUTES, DEFAULT_SAMPLE_LINES, DEFAULT_SAMPLE_PAGES, avg_words_per_page,
    time_per_line, words_per_line, words_per_minute,
};
use speedread_types::api::FormState;
use speedread_types::events::ElementId;
use speedread_types::models::{Book, NewBook, NewSession, Session};

use crate::chart;
use crate::input::{self, InvalidNumber};
use crate::views::{self, Fragment};

const INVALID_NUMBER: &str = "Please enter whole numbers.";
const NO_BOOK: &str = "Select a book first.";

/// The tables as they were when the event arrived.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub books: Vec<Book>,
    pub sessions: Vec<Session>,
}

impl Snapshot {
    pub fn load(db: &Database) -> Result<Self> {
        Ok(Self {
            books: db.load_books()?,
            sessions: db.load_sessions()?,
        })
    }

    pub fn book(&self, id: i64) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    /// Sessions grouped per book, books in id order, sessions in insertion
    /// order. Sessions whose book is gone are left out.
    pub fn histories(&self) -> Vec<(&Book, Vec<&Session>)> {
        let mut grouped: BTreeMap<i64, Vec<&Session>> = BTreeMap::new();
        for session in &self.sessions {
            grouped.entry(session.book_id).or_default().push(session);
        }

        grouped
            .into_iter()
            .filter_map(|(book_id, sessions)| match self.book(book_id) {
                Some(book) => Some((book, sessions)),
                None => {
                    warn!(
                        "{} session(s) reference missing book {}",
                        sessions.len(),
                        book_id
                    );
                    None
                }
            })
            .collect()
    }
}

pub struct UiEvent<'a> {
    pub element: ElementId,
    pub form: &'a FormState,
    pub now: NaiveDateTime,
}

/// A write requested by a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    AddBook(NewBook),
    RecordSession(NewSession),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub fragment: Fragment,
    pub effect: Option<Effect>,
}

impl Outcome {
    fn show(fragment: Fragment) -> Self {
        Self {
            fragment,
            effect: None,
        }
    }

    fn write(fragment: Fragment, effect: Effect) -> Self {
        Self {
            fragment,
            effect: Some(effect),
        }
    }
}

impl From<InvalidNumber> for Outcome {
    fn from(_: InvalidNumber) -> Self {
        Self::show(views::notice(INVALID_NUMBER))
    }
}

pub type Handler = fn(&UiEvent<'_>, &Snapshot) -> Outcome;

pub fn handler_for(element: ElementId) -> Handler {
    match element {
        ElementId::ShowAddBooks => show_add_books,
        ElementId::NumLinesThreshInput => words_prompt,
        ElementId::NumPagesThreshInput => lines_prompt,
        ElementId::SubmitBook => submit_book,
        ElementId::ShowEventForm => show_event_form,
        ElementId::BookSelectDropdown => selected_book_wpp,
        ElementId::RecordSubmit => record_submit,
        ElementId::ShowPractice => show_practice,
        ElementId::TargetWpmInput | ElementId::SelectBookPractice => target_pace,
        ElementId::ShowPerformance => show_performance,
    }
}

pub fn dispatch(event: &UiEvent<'_>, snapshot: &Snapshot) -> Outcome {
    handler_for(event.element)(event, snapshot)
}

/// Perform a handler's write.
pub fn apply(db: &Database, effect: Effect) -> Result<()> {
    match effect {
        Effect::AddBook(book) => db.add_book(book).map(drop),
        Effect::RecordSession(session) => db.record_session(session).map(drop),
    }
}

// -- Add book --

fn show_add_books(event: &UiEvent<'_>, _: &Snapshot) -> Outcome {
    if !event.form.is_on() {
        return Outcome::show(Fragment::empty());
    }
    Outcome::show(views::add_book_form(
        DEFAULT_SAMPLE_LINES.get(),
        DEFAULT_SAMPLE_PAGES.get(),
    ))
}

fn words_prompt(event: &UiEvent<'_>, _: &Snapshot) -> Outcome {
    let form = event.form;
    match input::divisor(form.sample_lines.as_deref()) {
        Ok(n) => Outcome::show(views::words_prompt(
            &n.to_string(),
            &input::text(form.words_in_lines.as_deref()),
        )),
        Err(e) => e.into(),
    }
}

fn lines_prompt(event: &UiEvent<'_>, _: &Snapshot) -> Outcome {
    let form = event.form;
    match input::divisor(form.sample_pages.as_deref()) {
        Ok(n) => Outcome::show(views::lines_prompt(
            &n.to_string(),
            &input::text(form.lines_in_pages.as_deref()),
        )),
        Err(e) => e.into(),
    }
}

fn submit_book(event: &UiEvent<'_>, _: &Snapshot) -> Outcome {
    let form = event.form;
    if input::clicks(form.n_clicks.as_deref()) == 0 {
        return Outcome::show(Fragment::empty());
    }

    let parsed = (|| {
        Ok::<_, InvalidNumber>((
            input::numerator(form.words_in_lines.as_deref())?,
            input::numerator(form.lines_in_pages.as_deref())?,
            input::divisor(form.sample_lines.as_deref())?,
            input::divisor(form.sample_pages.as_deref())?,
        ))
    })();
    let (words_in_lines, lines_in_pages, sample_lines, sample_pages) = match parsed {
        Ok(values) => values,
        Err(e) => return e.into(),
    };

    let book = NewBook {
        name: input::text(form.book_name.as_deref()),
        author: input::text(form.book_author.as_deref()),
        line_sample_size: sample_lines.get(),
        page_sample_size: sample_pages.get(),
        wpp: avg_words_per_page(words_in_lines, lines_in_pages, sample_lines, sample_pages),
        wpl: words_per_line(words_in_lines, sample_lines),
    };

    Outcome::write(views::book_submitted(), Effect::AddBook(book))
}

// -- Record --

fn show_event_form(event: &UiEvent<'_>, snapshot: &Snapshot) -> Outcome {
    if !event.form.is_on() {
        return Outcome::show(Fragment::empty());
    }
    Outcome::show(views::record_form(&snapshot.books, DEFAULT_MINUTES.get()))
}

fn selected_book_wpp(event: &UiEvent<'_>, snapshot: &Snapshot) -> Outcome {
    let wpp = input::book_id(event.form.record_book.as_deref())
        .map(|id| snapshot.book(id).map_or(0, |b| b.wpp));
    Outcome::show(views::words_per_page(wpp))
}

fn record_submit(event: &UiEvent<'_>, snapshot: &Snapshot) -> Outcome {
    let form = event.form;
    if input::clicks(form.n_clicks.as_deref()) == 0 {
        return Outcome::show(views::wpm_placeholder());
    }

    let Some(book) = input::book_id(form.record_book.as_deref()).and_then(|id| snapshot.book(id))
    else {
        return Outcome::show(views::notice(NO_BOOK));
    };

    let lines_read = match input::numerator(form.lines_read.as_deref()) {
        Ok(n) => n,
        Err(e) => return e.into(),
    };
    let minutes_spent = match input::divisor(form.minutes_spent.as_deref()) {
        Ok(n) => n,
        Err(e) => return e.into(),
    };

    let wpm = words_per_minute(lines_read, book.wpl, minutes_spent);
    Outcome::write(
        views::wpm_result(wpm),
        Effect::RecordSession(NewSession {
            date: event.now,
            wpm,
            book_id: book.id,
        }),
    )
}

// -- Practice --

fn show_practice(event: &UiEvent<'_>, snapshot: &Snapshot) -> Outcome {
    if !event.form.is_on() {
        return Outcome::show(Fragment::empty());
    }
    Outcome::show(views::practice_form(&snapshot.books))
}

fn target_pace(event: &UiEvent<'_>, snapshot: &Snapshot) -> Outcome {
    let form = event.form;
    let wpl = input::book_id(form.practice_book.as_deref())
        .and_then(|id| snapshot.book(id))
        .map_or(0, |b| b.wpl);

    match input::optional_divisor(form.target_wpm.as_deref()) {
        Ok(Some(target)) => Outcome::show(views::pace(time_per_line(target, wpl))),
        Ok(None) => Outcome::show(views::pace(0.0)),
        Err(e) => e.into(),
    }
}

// -- Performance --

fn show_performance(event: &UiEvent<'_>, snapshot: &Snapshot) -> Outcome {
    if !event.form.is_on() {
        return Outcome::show(Fragment::empty());
    }

    let histories = snapshot.histories();
    if histories.is_empty() {
        return Outcome::show(views::notice("No sessions recorded yet."));
    }

    let mut html = String::from("<div>");
    for (book, sessions) in histories {
        let points: Vec<_> = sessions.iter().map(|s| (s.date, s.wpm)).collect();
        let svg = chart::wpm_line_chart(&points).unwrap_or_else(|e| {
            warn!("Chart for book {} failed: {:#}", book.id, e);
            String::new()
        });
        html.push_str(views::book_history(book, &sessions, &svg).as_str());
    }
    html.push_str("</div>");

    Outcome::show(html.into())
}
