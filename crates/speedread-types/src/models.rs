use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A book the reader has sampled. Rates are derived once, at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub name: String,
    pub author: String,
    pub line_sample_size: u32,
    pub page_sample_size: u32,
    pub wpp: u32,
    pub wpl: u32,
}

impl Book {
    /// Label shown in book pickers and history headings.
    pub fn label(&self) -> String {
        format!("{} by {}", self.name, self.author)
    }
}

/// One timed reading test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    pub date: NaiveDateTime,
    pub wpm: u32,
    pub book_id: i64,
}

/// A book before it has been assigned an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub name: String,
    pub author: String,
    pub line_sample_size: u32,
    pub page_sample_size: u32,
    pub wpp: u32,
    pub wpl: u32,
}

impl NewBook {
    pub fn with_id(self, id: i64) -> Book {
        Book {
            id,
            name: self.name,
            author: self.author,
            line_sample_size: self.line_sample_size,
            page_sample_size: self.page_sample_size,
            wpp: self.wpp,
            wpl: self.wpl,
        }
    }
}

/// A session before it has been assigned an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    pub date: NaiveDateTime,
    pub wpm: u32,
    pub book_id: i64,
}

impl NewSession {
    pub fn with_id(self, id: i64) -> Session {
        Session {
            id,
            date: self.date,
            wpm: self.wpm,
            book_id: self.book_id,
        }
    }
}
