use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::validate::ValidationVerdict;
use crate::errors::AppError;

/// Reads the current version counter for an address row.
pub fn current_version(conn: &Connection, address_id: i64) -> Result<i64, AppError> {
    conn.query_row(
        "select version_no from address where address_id = ?1",
        params![address_id],
        |row| row.get(0),
    )
    .optional()?
    .ok_or_else(|| AppError::Db(format!("Address {address_id} not found")))
}

/// Writes all normalized structured fields back to an address row, bumping
/// the version counter and stamping the update actor and timestamp. The
/// version counter is advisory change tracking, not concurrency control.
///
/// Callers run a whole batch of these inside one transaction and commit
/// once at the end of the run.
pub fn apply_update(
    conn: &Connection,
    address_id: i64,
    verdict: &ValidationVerdict,
    actor: &str,
) -> Result<(), AppError> {
    let version_no = current_version(conn, address_id)? + 1;
    let fields = &verdict.fields;

    conn.execute(
        r#"
        UPDATE address SET
            house_no_1_prefix = ?1, house_no_1 = ?2, house_no_1_suffix = ?3,
            house_no_2_prefix = ?4, house_no_2 = ?5, house_no_2_suffix = ?6,
            road_1_name = ?7, road_1_suffix = ?8, road_1_type = ?9,
            unit_type = ?10, unit_no_prefix = ?11, unit_no = ?12, unit_no_suffix = ?13,
            level_type = ?14, level_no_prefix = ?15, level_no = ?16, level_no_suffix = ?17,
            building_name = ?18, location_descriptor = ?19,
            road_2_name = ?20, road_2_type = ?21, road_2_suffix = ?22,
            suburb_id = ?23, address_type_id = ?24, version_no = ?25,
            update_user = ?26, update_date = ?27
        WHERE address_id = ?28
        "#,
        params![
            fields.house_no_1_prefix,
            fields.house_no_1,
            fields.house_no_1_suffix,
            fields.house_no_2_prefix,
            fields.house_no_2,
            fields.house_no_2_suffix,
            fields.road_1_name,
            fields.road_1_suffix,
            fields.road_1_type,
            fields.unit_type,
            fields.unit_no_prefix,
            fields.unit_no,
            fields.unit_no_suffix,
            fields.level_type,
            fields.level_no_prefix,
            fields.level_no,
            fields.level_no_suffix,
            fields.building_name,
            fields.location_descriptor,
            fields.road_2_name,
            fields.road_2_type,
            fields.road_2_suffix,
            verdict.suburb_id,
            verdict.address_type_id,
            version_no,
            actor,
            Utc::now().naive_utc(),
            address_id,
        ],
    )?;
    Ok(())
}
