use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |r| r.get(0),
    )?;

    if version < 1 {
        info!("Running migration v1 (books, main, auth)");
        // IF NOT EXISTS: files written before schema_version existed already
        // carry these tables.
        conn.execute_batch(
            "
            BEGIN;

            CREATE TABLE IF NOT EXISTS books (
                id                  INTEGER PRIMARY KEY,
                name                TEXT NOT NULL,
                author              TEXT NOT NULL,
                line_sample_size    INTEGER NOT NULL,
                page_sample_size    INTEGER NOT NULL,
                wpp                 INTEGER NOT NULL,
                wpl                 INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS main (
                id          INTEGER PRIMARY KEY,
                date        TEXT NOT NULL,
                wpm         INTEGER NOT NULL,
                book_id     INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_main_book
                ON main(book_id, date);

            CREATE TABLE IF NOT EXISTS auth (
                username    TEXT PRIMARY KEY,
                password    TEXT NOT NULL,
                nonce       TEXT NOT NULL
            );

            INSERT INTO schema_version (version) VALUES (1);

            COMMIT;
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap();
        stmt.query_map([], |r| r.get(0))
            .unwrap()
            .collect::<std::result::Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn creates_all_tables() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();
        assert_eq!(tables(&conn), ["auth", "books", "main", "schema_version"]);
    }

    #[test]
    fn rerun_is_a_no_op() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();
        conn.execute(
            "INSERT INTO books VALUES (0, 'Dune', 'Herbert', 5, 5, 100, 10)",
            [],
        )
        .unwrap();
        run(&conn).unwrap();

        let books: i64 = conn
            .query_row("SELECT COUNT(*) FROM books", [], |r| r.get(0))
            .unwrap();
        let versions: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_version", [], |r| r.get(0))
            .unwrap();
        assert_eq!(books, 1);
        assert_eq!(versions, 1);
    }
}
