use rusqlite::Connection;

use crate::domain::models::{CandidateRecord, PropertyStatus};
use crate::errors::AppError;

/// Selects the working set of addresses needing repair: properties created
/// or changed in the last 90 days whose address carries no house number, no
/// lot number, no road name and no location descriptor. One row per live
/// lot attached to the property, keyed by the composite
/// `planType/lotNo/sectionNo/planNo` lot string.
///
/// The production registry drives this off responsibility-change events as
/// well; the recent-creation window here captures the same population for
/// the purposes of this tool.
pub fn load_candidates(conn: &Connection) -> Result<Vec<CandidateRecord>, AppError> {
    let mut stmt = conn.prepare(
        r#"
        SELECT DISTINCT
            p.property_id,
            p.property_no,
            COALESCE(a.name, 'Private Party') AS responsible_party,
            CASE WHEN p.end_date IS NULL THEN 'CURRENT' ELSE 'EXPIRED' END AS property_status,
            ad.address_id,
            TRIM(
                COALESCE(ad.building_name || ', ', '')
                || COALESCE(ad.level_type || ' ' || ad.level_no || ', ', '')
                || COALESCE(ad.unit_type || ' ' || ad.unit_no || '/', '')
                || COALESCE(ad.house_no_1 || ' ', '')
                || COALESCE(ad.road_1_name || ' ', '')
                || COALESCE(ad.road_1_type, '')
                || COALESCE(', ' || ad.location_descriptor, '')
            ) AS address_text,
            COALESCE(TRIM(s.name) || ' ' || s.postcode, '') AS suburb_and_postcode,
            COALESCE(l.plan_type, '') || '/' || COALESCE(l.lot_no, '') || '/'
                || COALESCE(l.section_no, '') || '/' || COALESCE(l.plan_no, '') AS ptlotsecpn
        FROM property p
        JOIN address ad ON ad.address_id = p.address_id
        LEFT JOIN suburb s ON s.suburb_id = ad.suburb_id
        LEFT JOIN agency a ON a.agency_id = p.agency_id
        JOIN property_lot pl ON pl.property_id = p.property_id
        JOIN lot l ON l.lot_id = pl.lot_id
        WHERE ad.house_no_1 IS NULL
          AND ad.lot_no IS NULL
          AND ad.road_1_name IS NULL
          AND ad.location_descriptor IS NULL
          AND pl.end_date IS NULL
          AND l.end_date IS NULL
          AND p.create_date > datetime('now', '-90 day')
        ORDER BY p.property_id
        "#,
    )?;

    let rows = stmt.query_map([], |row| {
        let status: String = row.get("property_status")?;
        Ok(CandidateRecord {
            property_id: row.get("property_id")?,
            property_no: row.get("property_no")?,
            responsible_party: row.get("responsible_party")?,
            property_status: PropertyStatus::from_registry(&status),
            address_id: row.get("address_id")?,
            address_text: row.get("address_text")?,
            suburb_and_postcode: row.get("suburb_and_postcode")?,
            lot_key: row.get("ptlotsecpn")?,
        })
    })?;

    let mut candidates = Vec::new();
    for row in rows {
        candidates.push(row?);
    }
    Ok(candidates)
}
