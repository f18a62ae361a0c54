use crate::Database;
use crate::models::{BookRow, CredentialRow, DATE_FORMAT, SessionRow, Table, TableRow};
use anyhow::{Result, bail};
use rusqlite::{Connection, OptionalExtension};
use speedread_types::models::{Book, NewBook, NewSession, Session};
use tracing::info;

impl Database {
    // -- Tables --

    /// Every row of `T`'s table, in insertion order.
    pub fn load_table<T: TableRow>(&self) -> Result<Vec<T>> {
        self.with_conn(query_table::<T>)
    }

    pub fn load_books(&self) -> Result<Vec<Book>> {
        let rows = self.load_table::<BookRow>()?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    pub fn load_sessions(&self) -> Result<Vec<Session>> {
        let rows = self.load_table::<SessionRow>()?;
        Ok(rows.into_iter().map(Session::from).collect())
    }

    /// `max(id) + 1`, or 0 for an empty table.
    pub fn next_id(&self, table: Table) -> Result<i64> {
        self.with_conn(|conn| query_next_id(conn, table))
    }

    pub fn count(&self, table: Table) -> Result<usize> {
        self.with_conn(|conn| {
            let n: i64 = conn.query_row(
                &format!("SELECT COUNT(*) FROM {}", table.name()),
                [],
                |r| r.get(0),
            )?;
            Ok(usize::try_from(n)?)
        })
    }

    // -- Books --

    pub fn insert_book(&self, book: &Book) -> Result<()> {
        self.with_conn_mut(|conn| insert_book_row(conn, book))
    }

    /// Assign the next book id and append the row in one transaction.
    pub fn add_book(&self, new: NewBook) -> Result<Book> {
        let book = self.with_conn_mut(|conn| {
            let book = new.with_id(query_next_id(conn, Table::Books)?);
            insert_book_row(conn, &book)?;
            Ok(book)
        })?;

        info!("Added book {} ({})", book.id, book.label());
        Ok(book)
    }

    pub fn get_book(&self, id: i64) -> Result<Option<Book>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    &format!("SELECT {} FROM books WHERE id = ?1", BookRow::COLUMNS),
                    [id],
                    BookRow::from_row,
                )
                .optional()?;
            Ok(row.map(Book::from))
        })
    }

    // -- Sessions --

    pub fn insert_session(&self, session: &Session) -> Result<()> {
        self.with_conn_mut(|conn| insert_session_row(conn, session))
    }

    /// Assign the next session id and append the row in one transaction.
    /// Fails if `book_id` names no book.
    pub fn record_session(&self, new: NewSession) -> Result<Session> {
        let session = self.with_conn_mut(|conn| {
            let exists: Option<i64> = conn
                .query_row("SELECT id FROM books WHERE id = ?1", [new.book_id], |r| {
                    r.get(0)
                })
                .optional()?;
            if exists.is_none() {
                bail!("Unknown book id: {}", new.book_id);
            }

            let session = new.with_id(query_next_id(conn, Table::Sessions)?);
            insert_session_row(conn, &session)?;
            Ok(session)
        })?;

        info!(
            "Recorded session {} for book {}: {} wpm",
            session.id, session.book_id, session.wpm
        );
        Ok(session)
    }

    // -- Credentials --

    /// Store a sealed password, replacing any previous one for `username`.
    pub fn upsert_credential(&self, username: &str, password: &str, nonce: &str) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO auth (username, password, nonce) VALUES (?1, ?2, ?3)
                 ON CONFLICT(username) DO UPDATE SET password = excluded.password, nonce = excluded.nonce",
                (username, password, nonce),
            )?;
            Ok(())
        })
    }

    pub fn get_credential(&self, username: &str) -> Result<Option<CredentialRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT username, password, nonce FROM auth WHERE username = ?1",
                    [username],
                    |row| {
                        Ok(CredentialRow {
                            username: row.get(0)?,
                            password: row.get(1)?,
                            nonce: row.get(2)?,
                        })
                    },
                )
                .optional()?;
            Ok(row)
        })
    }
}

fn query_table<T: TableRow>(conn: &Connection) -> Result<Vec<T>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM {} ORDER BY rowid",
        T::COLUMNS,
        T::TABLE.name()
    ))?;

    let rows = stmt
        .query_map([], T::from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn query_next_id(conn: &Connection, table: Table) -> Result<i64> {
    let id = conn.query_row(
        &format!("SELECT COALESCE(MAX(id) + 1, 0) FROM {}", table.name()),
        [],
        |r| r.get(0),
    )?;
    Ok(id)
}

fn insert_book_row(conn: &Connection, book: &Book) -> Result<()> {
    conn.execute(
        "INSERT INTO books (id, name, author, line_sample_size, page_sample_size, wpp, wpl)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        rusqlite::params![
            book.id,
            book.name,
            book.author,
            book.line_sample_size,
            book.page_sample_size,
            book.wpp,
            book.wpl,
        ],
    )?;
    Ok(())
}

fn insert_session_row(conn: &Connection, session: &Session) -> Result<()> {
    conn.execute(
        "INSERT INTO main (id, date, wpm, book_id) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![
            session.id,
            session.date.format(DATE_FORMAT).to_string(),
            session.wpm,
            session.book_id,
        ],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn open_db() -> (TempDir, Database) {
        let dir = tempfile::tempdir().expect("temp dir");
        let db = Database::open(&dir.path().join("app.db")).expect("open db");
        (dir, db)
    }

    fn new_book(name: &str) -> NewBook {
        NewBook {
            name: name.to_string(),
            author: "Frank Herbert".to_string(),
            line_sample_size: 5,
            page_sample_size: 5,
            wpp: 380,
            wpl: 10,
        }
    }

    fn at(h: u32, m: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 5, 1)
            .unwrap()
            .and_hms_micro_opt(h, m, 0, 123_456)
            .unwrap()
    }

    #[test]
    fn next_id_starts_at_zero() {
        let (_dir, db) = open_db();
        assert_eq!(db.next_id(Table::Books).unwrap(), 0);
        assert_eq!(db.next_id(Table::Sessions).unwrap(), 0);
    }

    #[test]
    fn add_book_appends_one_row_with_next_id() {
        let (_dir, db) = open_db();

        let first = db.add_book(new_book("Dune")).unwrap();
        assert_eq!(first.id, 0);

        let before = db.load_books().unwrap();
        let prior_max = before.iter().map(|b| b.id).max().unwrap();

        let second = db.add_book(new_book("Dune Messiah")).unwrap();
        let after = db.load_books().unwrap();

        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(second.id, prior_max + 1);
        assert_eq!(after.last(), Some(&second));
    }

    #[test]
    fn ids_follow_max_not_count() {
        let (_dir, db) = open_db();
        db.insert_book(&new_book("Gap").with_id(7)).unwrap();
        assert_eq!(db.next_id(Table::Books).unwrap(), 8);
        assert_eq!(db.add_book(new_book("After gap")).unwrap().id, 8);
    }

    #[test]
    fn inserted_session_keeps_its_id_and_date() {
        let (_dir, db) = open_db();
        db.add_book(new_book("Dune")).unwrap();

        let session = Session {
            id: 5,
            date: at(21, 45),
            wpm: 312,
            book_id: 0,
        };
        db.insert_session(&session).unwrap();

        let loaded = db.load_sessions().unwrap();
        assert_eq!(loaded, [session.clone()]);
        assert_eq!(
            loaded[0].date.format(DATE_FORMAT).to_string(),
            "2021-05-01 21:45:00.123456"
        );
        assert_eq!(db.next_id(Table::Sessions).unwrap(), session.id + 1);
    }

    #[test]
    fn book_and_session_ids_are_independent() {
        let (_dir, db) = open_db();
        db.add_book(new_book("A")).unwrap();
        db.add_book(new_book("B")).unwrap();

        let session = db
            .record_session(NewSession {
                date: at(9, 0),
                wpm: 240,
                book_id: 1,
            })
            .unwrap();
        assert_eq!(session.id, 0);
    }

    #[test]
    fn quotes_are_stored_verbatim() {
        let (_dir, db) = open_db();
        let mut book = new_book("Ender's Game'); DROP TABLE books; --");
        book.author = "O'Brien \"Jr\"".to_string();

        let stored = db.add_book(book.clone()).unwrap();
        let loaded = db.get_book(stored.id).unwrap().expect("book");

        assert_eq!(loaded.name, book.name);
        assert_eq!(loaded.author, book.author);
        assert_eq!(db.load_books().unwrap().len(), 1);
    }

    #[test]
    fn sessions_load_in_insertion_order() {
        let (_dir, db) = open_db();
        db.add_book(new_book("Dune")).unwrap();

        for (i, wpm) in [300, 180, 420].into_iter().enumerate() {
            db.record_session(NewSession {
                date: at(10, i as u32),
                wpm,
                book_id: 0,
            })
            .unwrap();
        }

        let sessions = db.load_sessions().unwrap();
        let wpms: Vec<u32> = sessions.iter().map(|s| s.wpm).collect();
        let ids: Vec<i64> = sessions.iter().map(|s| s.id).collect();
        assert_eq!(wpms, [300, 180, 420]);
        assert_eq!(ids, [0, 1, 2]);
        assert_eq!(sessions[1].date, at(10, 1));
    }

    #[test]
    fn session_for_unknown_book_is_refused() {
        let (_dir, db) = open_db();
        let err = db
            .record_session(NewSession {
                date: at(9, 0),
                wpm: 100,
                book_id: 42,
            })
            .unwrap_err();

        assert!(err.to_string().contains("Unknown book id: 42"));
        assert!(db.load_sessions().unwrap().is_empty());
    }

    #[test]
    fn reads_see_writes_from_other_handles() {
        let (dir, db) = open_db();
        let other = Database::open(&dir.path().join("app.db")).unwrap();

        other.add_book(new_book("Dune")).unwrap();
        assert_eq!(db.load_books().unwrap().len(), 1);
        assert_eq!(db.count(Table::Books).unwrap(), 1);
    }

    #[test]
    fn credential_upsert_replaces_password() {
        let (_dir, db) = open_db();
        assert!(db.get_credential("ada").unwrap().is_none());

        db.upsert_credential("ada", "c1", "n1").unwrap();
        db.upsert_credential("ada", "c2", "n2").unwrap();

        let cred = db.get_credential("ada").unwrap().expect("credential");
        assert_eq!(cred.username, "ada");
        assert_eq!(cred.password, "c2");
        assert_eq!(cred.nonce, "n2");
    }
}
