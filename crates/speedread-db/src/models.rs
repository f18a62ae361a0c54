//! Database row types — these map directly to SQLite rows.
//! Distinct from speedread-types models to keep the DB layer independent.

use chrono::NaiveDateTime;
use rusqlite::Row;
use speedread_types::models::{Book, Session};
use tracing::warn;

/// Timestamp layout of `main.date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Tables whose rows carry a `max(id) + 1` primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Books,
    Sessions,
}

impl Table {
    pub fn name(self) -> &'static str {
        match self {
            Self::Books => "books",
            Self::Sessions => "main",
        }
    }
}

/// A row type that can be loaded with [`crate::Database::load_table`].
pub trait TableRow: Sized {
    const TABLE: Table;
    const COLUMNS: &'static str;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRow {
    pub id: i64,
    pub name: String,
    pub author: String,
    pub line_sample_size: u32,
    pub page_sample_size: u32,
    pub wpp: u32,
    pub wpl: u32,
}

impl TableRow for BookRow {
    const TABLE: Table = Table::Books;
    const COLUMNS: &'static str = "id, name, author, line_sample_size, page_sample_size, wpp, wpl";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            author: row.get(2)?,
            line_sample_size: row.get(3)?,
            page_sample_size: row.get(4)?,
            wpp: row.get(5)?,
            wpl: row.get(6)?,
        })
    }
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book {
            id: row.id,
            name: row.name,
            author: row.author,
            line_sample_size: row.line_sample_size,
            page_sample_size: row.page_sample_size,
            wpp: row.wpp,
            wpl: row.wpl,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRow {
    pub id: i64,
    pub date: String,
    pub wpm: u32,
    pub book_id: i64,
}

impl TableRow for SessionRow {
    const TABLE: Table = Table::Sessions;
    const COLUMNS: &'static str = "id, date, wpm, book_id";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            date: row.get(1)?,
            wpm: row.get(2)?,
            book_id: row.get(3)?,
        })
    }
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        // Rows written by hand may lack the fractional seconds; %.f accepts both.
        let date = NaiveDateTime::parse_from_str(&row.date, "%Y-%m-%d %H:%M:%S%.f")
            .unwrap_or_else(|e| {
                warn!("Corrupt date '{}' on session {}: {}", row.date, row.id, e);
                NaiveDateTime::default()
            });

        Session {
            id: row.id,
            date,
            wpm: row.wpm,
            book_id: row.book_id,
        }
    }
}

pub struct CredentialRow {
    pub username: String,
    pub password: String,
    pub nonce: String,
}
