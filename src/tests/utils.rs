use rusqlite::params;

use crate::db::connection::{init_db, Database};

/// Initialize a fresh registry database for one test, using the production
/// schema. Files are namespaced per test so parallel tests stay isolated.
pub fn init_test_db(name: &str) -> Database {
    let path = std::env::temp_dir().join(format!(
        "gpr_test_{name}_{}.sqlite3",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    let db = Database::new(path.to_string_lossy().into_owned());
    init_db(&db, "sql/schema.sql")
        .unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
    db
}

pub fn seed_vocab(db: &Database) {
    db.with_conn(|conn| {
        conn.execute_batch(
            r#"
            INSERT INTO road_type (name) VALUES ('Street'), ('Road'), ('Avenue');
            INSERT INTO unit_type (name) VALUES ('Unit'), ('Shop');
            INSERT INTO level_type (name) VALUES ('Level');
            INSERT INTO suburb (suburb_id, name, postcode)
                VALUES (42, 'Parramatta', 2150), (7, 'Newcastle', 2300);
            "#,
        )?;
        Ok(())
    })
    .expect("vocab seed failed");
}

/// Inserts a property with an incomplete address and one lot per key.
/// Keys use the `planType/lotNo/sectionNo/planNo` format.
pub fn seed_candidate(db: &Database, property_id: i64, address_id: i64, lot_keys: &[&str]) {
    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO address (address_id, version_no) VALUES (?1, 1)",
            params![address_id],
        )?;
        conn.execute(
            "INSERT INTO property (property_id, property_no, address_id, create_date)
             VALUES (?1, ?2, ?3, datetime('now'))",
            params![property_id, property_id * 10, address_id],
        )?;

        for (i, key) in lot_keys.iter().enumerate() {
            let parts: Vec<&str> = key.split('/').collect();
            assert_eq!(parts.len(), 4, "lot key must be planType/lotNo/sectionNo/planNo");
            let lot_id = property_id * 100 + i as i64;
            conn.execute(
                "INSERT INTO lot (lot_id, plan_type, lot_no, section_no, plan_no)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![lot_id, parts[0], parts[1], parts[2], parts[3]],
            )?;
            conn.execute(
                "INSERT INTO property_lot (property_id, lot_id) VALUES (?1, ?2)",
                params![property_id, lot_id],
            )?;
        }
        Ok(())
    })
    .expect("candidate seed failed");
}
