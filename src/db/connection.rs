use rusqlite::{Connection, OpenFlags};
use std::cell::RefCell;
use std::fs;

use crate::errors::AppError;

// Thread-local connection slot.
thread_local! {
    static DB_CONN: RefCell<Option<Connection>> = RefCell::new(None);
}

#[derive(Clone)]
pub struct Database {
    path: String,
}

impl Database {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Provides a mutable connection to the closure.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Connection) -> Result<T, AppError>,
    {
        let inner_result = DB_CONN
            .try_with(|cell| {
                let mut slot = cell.borrow_mut();
                if slot.is_none() {
                    let conn = Connection::open(&self.path)
                        .map_err(|e| AppError::Connection(format!("Open DB failed: {e}")))?;
                    *slot = Some(conn);
                }
                let conn = slot.as_mut().unwrap();
                f(conn)
            })
            .map_err(|e| AppError::Db(format!("Connection slot unavailable: {e}")))?;
        inner_result
    }
}

/// Connect to the GPR registry, trying the primary target first and the
/// secondary (disaster-recovery) target if the primary is unreachable.
/// The registry must already exist; a missing file is a connection failure,
/// not an invitation to create an empty database.
pub fn connect_with_fallback(primary: &str, secondary: &str) -> Result<Database, AppError> {
    let mut last_err = String::new();

    for (label, path) in [("primary", primary), ("secondary", secondary)] {
        eprintln!("Trying {label} registry target: {path}");
        match Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_WRITE) {
            Ok(conn) => {
                // Probe the connection before committing to it.
                match conn.query_row("select 1", [], |row| row.get::<_, i64>(0)) {
                    Ok(_) => {
                        eprintln!("Connected to {label} registry target");
                        return Ok(Database::new(path));
                    }
                    Err(e) => last_err = e.to_string(),
                }
            }
            Err(e) => last_err = e.to_string(),
        }
        eprintln!("⚠️ {label} registry target failed: {last_err}");
    }

    Err(AppError::Connection(last_err))
}

/// Initialize a registry database from a SQL schema file. Production runs
/// connect to an existing registry; this exists for test fixtures and for
/// standing up a scratch registry.
pub fn init_db(db: &Database, schema_path: &str) -> Result<(), AppError> {
    let schema_sql = fs::read_to_string(schema_path)
        .map_err(|e| AppError::Io(format!("Failed to read schema file: {e}")))?;

    db.with_conn(|conn| {
        conn.execute_batch(&schema_sql)
            .map_err(|e| AppError::Db(format!("Failed to apply schema: {e}")))?;
        Ok(())
    })
}
