use std::collections::HashMap;

use rusqlite::Connection;

use crate::domain::validate::Vocab;
use crate::errors::AppError;

/// Loads the reference vocabularies once for the run. The vocabulary tables
/// are read-only while an update run is in flight, so a run-scoped snapshot
/// observes the same values a per-row query would.
pub fn load_vocab(conn: &Connection) -> Result<Vocab, AppError> {
    Ok(Vocab {
        road_types: load_names(conn, "select name from road_type")?,
        unit_types: load_names(conn, "select name from unit_type")?,
        level_types: load_names(conn, "select name from level_type")?,
        suburbs: load_suburbs(conn)?,
    })
}

fn load_names(conn: &Connection, sql: &str) -> Result<Vec<String>, AppError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut names = Vec::new();
    for row in rows {
        names.push(row?);
    }
    Ok(names)
}

/// Suburb lookup keyed by upper-cased name plus exact postcode.
fn load_suburbs(conn: &Connection) -> Result<HashMap<(String, i64), i64>, AppError> {
    let mut stmt =
        conn.prepare("select upper(name), coalesce(postcode, 0), suburb_id from suburb")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            (row.get::<_, String>(0)?, row.get::<_, i64>(1)?),
            row.get::<_, i64>(2)?,
        ))
    })?;

    let mut suburbs = HashMap::new();
    for row in rows {
        let (key, suburb_id) = row?;
        suburbs.insert(key, suburb_id);
    }
    Ok(suburbs)
}
