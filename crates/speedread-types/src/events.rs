use serde::{Deserialize, Serialize};

/// Dashboard elements that fire events.
///
/// The kebab-case form is the DOM id and the `/ui/{element}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementId {
    /// Toggle for the add-book section
    ShowAddBooks,
    /// Number of lines the reader samples words from
    NumLinesThreshInput,
    /// Number of pages the reader samples lines from
    NumPagesThreshInput,
    /// Add-book submit button
    SubmitBook,

    /// Toggle for the record section
    ShowEventForm,
    /// Book picker in the record section
    BookSelectDropdown,
    /// Record submit button
    RecordSubmit,

    /// Toggle for the practice section
    ShowPractice,
    /// Target words-per-minute input
    TargetWpmInput,
    /// Book picker in the practice section
    SelectBookPractice,

    /// Toggle for the performance section
    ShowPerformance,
}

impl ElementId {
    pub const ALL: [ElementId; 11] = [
        Self::ShowAddBooks,
        Self::NumLinesThreshInput,
        Self::NumPagesThreshInput,
        Self::SubmitBook,
        Self::ShowEventForm,
        Self::BookSelectDropdown,
        Self::RecordSubmit,
        Self::ShowPractice,
        Self::TargetWpmInput,
        Self::SelectBookPractice,
        Self::ShowPerformance,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ShowAddBooks => "show-add-books",
            Self::NumLinesThreshInput => "num-lines-thresh-input",
            Self::NumPagesThreshInput => "num-pages-thresh-input",
            Self::SubmitBook => "submit-book",
            Self::ShowEventForm => "show-event-form",
            Self::BookSelectDropdown => "book-select-dropdown",
            Self::RecordSubmit => "record-submit",
            Self::ShowPractice => "show-practice",
            Self::TargetWpmInput => "target-wpm-input",
            Self::SelectBookPractice => "select-book-practice",
            Self::ShowPerformance => "show-performance",
        }
    }

    /// Id of the container the element's fragment is rendered into.
    pub fn target(self) -> &'static str {
        match self {
            Self::ShowAddBooks => "add-books-container",
            Self::NumLinesThreshInput => "num-words-p",
            Self::NumPagesThreshInput => "num-lines-p",
            Self::SubmitBook => "book-added",
            Self::ShowEventForm => "event-form-container",
            Self::BookSelectDropdown => "wpp-label",
            Self::RecordSubmit => "wpm-div",
            Self::ShowPractice => "practice-container",
            Self::TargetWpmInput | Self::SelectBookPractice => "target-wpm-div",
            Self::ShowPerformance => "performance-container",
        }
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ElementId {
    type Err = UnknownElement;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownElement(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dashboard element: {0}")]
pub struct UnknownElement(pub String);
