use serde::{Deserialize, Serialize};

// -- Dashboard events --

/// Current values of every dashboard input, posted with each UI event.
///
/// Field names are the DOM ids of the inputs. Everything arrives as text;
/// blank and missing values are resolved by the handlers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FormState {
    /// Toggle state for `show-*` switches
    pub on: Option<String>,
    /// How many times the triggering button has been clicked
    pub n_clicks: Option<String>,

    // -- add book --
    #[serde(rename = "add-book-name")]
    pub book_name: Option<String>,
    #[serde(rename = "add-book-author")]
    pub book_author: Option<String>,
    #[serde(rename = "num-lines-thresh-input")]
    pub sample_lines: Option<String>,
    #[serde(rename = "num-pages-thresh-input")]
    pub sample_pages: Option<String>,
    #[serde(rename = "num-words-per-line-input")]
    pub words_in_lines: Option<String>,
    #[serde(rename = "num-lines-per-page-input")]
    pub lines_in_pages: Option<String>,

    // -- record --
    #[serde(rename = "book-select-dropdown")]
    pub record_book: Option<String>,
    #[serde(rename = "num-minutes-test-thresh-input")]
    pub minutes_spent: Option<String>,
    #[serde(rename = "num-lines-test-input")]
    pub lines_read: Option<String>,

    // -- practice --
    #[serde(rename = "target-wpm-input")]
    pub target_wpm: Option<String>,
    #[serde(rename = "select-book-practice")]
    pub practice_book: Option<String>,
}

impl FormState {
    /// Whether a `show-*` switch is on. Checkbox values arrive as `on` or `true`.
    pub fn is_on(&self) -> bool {
        matches!(
            self.on.as_deref().map(str::trim),
            Some("on") | Some("true") | Some("1")
        )
    }
}

// -- JSON API --

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub books: usize,
    pub sessions: usize,
}
