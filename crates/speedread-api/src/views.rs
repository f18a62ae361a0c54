//! HTML fragments swapped into the dashboard.
//!
//! Interactive elements carry `data-event` (`input`, `change`, `click`) and
//! `data-target` (the container the response replaces); the page script
//! does the rest.

use std::fmt;
use std::fmt::Write as _;

use speedread_types::events::ElementId;
use speedread_types::models::{Book, Session};

/// A rendered piece of HTML.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment(String);

impl Fragment {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Fragment {
    fn from(html: String) -> Self {
        Self(html)
    }
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn hooks(element: ElementId, event: &str) -> String {
    format!(
        r#"id="{}" data-event="{}" data-target="{}""#,
        element,
        event,
        element.target()
    )
}

pub fn notice(message: &str) -> Fragment {
    format!(r#"<p class="notice">{}</p>"#, escape(message)).into()
}

// -- Add book --

pub fn add_book_form(sample_lines: u32, sample_pages: u32) -> Fragment {
    format!(
        r#"<div class="centered">
  <label>Book name:</label> <input id="add-book-name"><br>
  <label>Book author:</label> <input id="add-book-author"><br>
  <p>Determine how many lines and pages you want to use to calculate the average<br>
    Number of lines<br>
    <input {lines}><br>
    Number of pages<br>
    <input {pages}><br>
  </p>
  <p id="num-words-p">{words_prompt}</p>
  <p id="num-lines-p">{lines_prompt}</p>
  <button {submit}>Submit</button><br>
  <p id="book-added"></p>
</div>"#,
        lines = format!(
            r#"{} value="{}""#,
            hooks(ElementId::NumLinesThreshInput, "input"),
            sample_lines
        ),
        pages = format!(
            r#"{} value="{}""#,
            hooks(ElementId::NumPagesThreshInput, "input"),
            sample_pages
        ),
        words_prompt = words_prompt(&sample_lines.to_string(), ""),
        lines_prompt = lines_prompt(&sample_pages.to_string(), ""),
        submit = hooks(ElementId::SubmitBook, "click"),
    )
    .into()
}

/// Prompt for the word count over the sampled lines. `current` keeps what
/// the reader already typed.
pub fn words_prompt(sample_lines: &str, current: &str) -> Fragment {
    format!(
        r#"Calculate the number of words in {} lines:<br><input id="num-words-per-line-input" value="{}">"#,
        escape(sample_lines),
        escape(current)
    )
    .into()
}

pub fn lines_prompt(sample_pages: &str, current: &str) -> Fragment {
    format!(
        r#"Calculate the number of lines in {} pages:<br><input id="num-lines-per-page-input" value="{}">"#,
        escape(sample_pages),
        escape(current)
    )
    .into()
}

pub fn book_submitted() -> Fragment {
    Fragment("Book submitted!".to_string())
}

// -- Record --

fn book_options(books: &[Book]) -> String {
    let mut html = String::from(r#"<option value="">Select...</option>"#);
    for book in books {
        let _ = write!(
            html,
            r#"<option value="{}">{}</option>"#,
            book.id,
            escape(&book.label())
        );
    }
    html
}

pub fn record_form(books: &[Book], minutes: u32) -> Fragment {
    format!(
        r#"<div class="centered">
  <ol>
    <li>Select a book: <select {dropdown}>{options}</select></li>
    <p>Your words-per-page count is: <label id="wpp-label"></label></p>
    <li id="event-form-test-tresh-li">Determine how long you want to test yourself for your reading speed (minutes)<br>
      <input id="num-minutes-test-thresh-input" value="{minutes}"></li>
    <li id="event-form-test-li">How many lines did you manage to read?<br>
      <input id="num-lines-test-input" value="0"></li>
    <button {submit}>Submit</button>
    <div id="wpm-div">{placeholder}</div>
    <p id="record-submitted"></p>
  </ol>
</div>"#,
        dropdown = hooks(ElementId::BookSelectDropdown, "change"),
        options = book_options(books),
        submit = hooks(ElementId::RecordSubmit, "click"),
        placeholder = wpm_placeholder(),
    )
    .into()
}

pub fn words_per_page(wpp: Option<u32>) -> Fragment {
    match wpp {
        Some(wpp) => format!(r#"<b class="centered">{}</b>"#, wpp).into(),
        None => Fragment(r#"<b class="centered"></b>"#.to_string()),
    }
}

pub fn wpm_placeholder() -> Fragment {
    Fragment("<b>Your words-per-minute score is...</b>".to_string())
}

pub fn wpm_result(wpm: u32) -> Fragment {
    format!(
        r#"<b>Your words-per-minute score is: <label id="wpm-label">{}</label></b>"#,
        wpm
    )
    .into()
}

// -- Practice --

pub fn practice_form(books: &[Book]) -> Fragment {
    format!(
        r#"<div class="centered">
  <p>Select a book: </p>
  <select {dropdown}>{options}</select>
  <p>What is your desired words-per-minute target?</p>
  <input {target}>
  <div id="target-wpm-div"></div>
</div>"#,
        dropdown = hooks(ElementId::SelectBookPractice, "change"),
        options = book_options(books),
        target = hooks(ElementId::TargetWpmInput, "input"),
    )
    .into()
}

pub fn pace(seconds_per_line: f64) -> Fragment {
    format!(
        "<p>You should read one line per: </p><b>{:.2} seconds</b><br>\
         <b>Remember to use a tracker and not read for comprehension.</b>",
        seconds_per_line
    )
    .into()
}

// -- Performance --

/// One book's section of the performance view. `chart` is trusted SVG.
pub fn book_history(book: &Book, sessions: &[&Session], chart: &str) -> Fragment {
    let mut rows = String::new();
    for s in sessions {
        let _ = write!(
            rows,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            s.id,
            s.date.format("%Y-%m-%d %H:%M:%S"),
            s.wpm,
            book.wpp,
            book.wpl
        );
    }

    format!(
        r#"<div id="results-book-{id}" class="centered">
  <h3>{label}</h3>
  <figure class="chart">{chart}</figure>
  <table class="history-table">
    <thead><tr><th>id</th><th>date</th><th>wpm</th><th>wpp</th><th>wpl</th></tr></thead>
    <tbody>{rows}</tbody>
  </table>
</div>"#,
        id = book.id,
        label = escape(&book.label()),
    )
    .into()
}
