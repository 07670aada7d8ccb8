// src/domain/models.rs

use crate::resolver::{AddressAttributes, LotAttributes};

// Exception reasons, exactly as they appear in the report.
pub const REASON_NOT_ONE_TO_ONE: &str = "Not a 1-to-1 match";
pub const REASON_SUBURB_UNMATCHED: &str = "GURAS Suburb not matched to GPR Suburb";
pub const REASON_INVALID_FIELD: &str = "Invalid Unit type, Level type or Road type";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyStatus {
    Current,
    Expired,
}

impl PropertyStatus {
    pub fn from_registry(value: &str) -> Self {
        match value {
            "EXPIRED" => PropertyStatus::Expired,
            _ => PropertyStatus::Current,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyStatus::Current => "CURRENT",
            PropertyStatus::Expired => "EXPIRED",
        }
    }
}

/// One registry row needing address repair, one per live lot on the
/// property. Read-only for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidateRecord {
    pub property_id: i64,
    pub property_no: i64,
    pub responsible_party: String,
    pub property_status: PropertyStatus,
    pub address_id: i64,
    pub address_text: String,
    pub suburb_and_postcode: String,
    /// Composite cadastral key: planType/lotNo/sectionNo/planNo.
    pub lot_key: String,
}

/// Derivation rule for the synthetic join key shared by both lookup stages:
/// the special-property id wins over the plain property id; absent both,
/// zero.
pub fn unique_identity(prop_id: Option<i64>, sp_prop_id: Option<i64>) -> i64 {
    sp_prop_id.or(prop_id).unwrap_or(0)
}

/// Stage-1 resolver output: a lot resolved to an external property id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotIdentifierMatch {
    pub lot_key: String,
    pub prop_id: i64,
    pub sp_prop_id: Option<i64>,
    pub unique_id: i64,
}

impl LotIdentifierMatch {
    /// Rows without a property id never make it into the result set.
    pub fn from_attributes(attrs: &LotAttributes) -> Option<Self> {
        let lot_key = attrs.ptlotsecpn.clone()?;
        let prop_id = attrs.propid?;
        Some(Self {
            lot_key,
            prop_id,
            sp_prop_id: attrs.sppropid,
            unique_id: unique_identity(Some(prop_id), attrs.sppropid),
        })
    }
}

/// Stage-2 resolver output: the principal GURAS address for a property id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ResolvedAddress {
    pub unique_id: i64,
    pub prop_id: Option<i64>,
    pub sp_prop_id: Option<i64>,

    pub house_no_1_prefix: Option<String>,
    pub house_no_1: Option<i64>,
    pub house_no_1_suffix: Option<String>,
    pub house_no_2_prefix: Option<String>,
    pub house_no_2: Option<i64>,
    pub house_no_2_suffix: Option<String>,

    pub road_1_name: Option<String>,
    pub road_1_type: Option<String>,
    pub road_1_suffix: Option<String>,
    pub road_2_name: Option<String>,
    pub road_2_type: Option<String>,
    pub road_2_suffix: Option<String>,

    pub unit_type: Option<String>,
    pub unit_no_prefix: Option<String>,
    pub unit_no: Option<i64>,
    pub unit_no_suffix: Option<String>,

    pub level_type: Option<String>,
    pub level_no_prefix: Option<String>,
    pub level_no: Option<String>,
    pub level_no_suffix: Option<String>,

    pub building_name: Option<String>,
    pub location_descriptor: Option<String>,

    pub suburb_name: Option<String>,
    pub postcode: Option<i64>,
}

impl ResolvedAddress {
    pub fn from_attributes(attrs: &AddressAttributes) -> Self {
        Self {
            unique_id: unique_identity(attrs.propid, attrs.sppropid),
            prop_id: attrs.propid,
            sp_prop_id: attrs.sppropid,
            house_no_1_prefix: attrs.housenumberfirstprefix.clone(),
            house_no_1: attrs.housenumberfirst,
            house_no_1_suffix: attrs.housenumberfirstsuffix.clone(),
            house_no_2_prefix: attrs.housenumbersecondprefix.clone(),
            house_no_2: attrs.housenumbersecond,
            house_no_2_suffix: attrs.housenumbersecondsuffix.clone(),
            road_1_name: attrs.roadname.clone(),
            road_1_type: attrs.roadtype.clone(),
            road_1_suffix: attrs.roadsuffix.clone(),
            road_2_name: attrs.secondroadname.clone(),
            road_2_type: attrs.secondroadtype.clone(),
            road_2_suffix: attrs.secondroadsuffix.clone(),
            unit_type: attrs.unittype.clone(),
            unit_no_prefix: attrs.unitnumberprefix.clone(),
            unit_no: attrs.unitnumber,
            unit_no_suffix: attrs.unitnumbersuffix.clone(),
            level_type: attrs.leveltype.clone(),
            level_no_prefix: attrs.levelnumberprefix.clone(),
            level_no: attrs.levelnumber.clone(),
            level_no_suffix: attrs.levelnumbersuffix.clone(),
            building_name: attrs.buildingname.clone(),
            location_descriptor: attrs.locationdescription.clone(),
            suburb_name: attrs.suburbname.clone(),
            postcode: attrs.postcode,
        }
    }
}

/// A candidate joined to its resolved GURAS address through
/// (lot_key, unique_id). The two occurrence counts are filled in by the
/// cardinality classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedMatch {
    pub candidate: CandidateRecord,
    pub address: ResolvedAddress,
    /// Merged rows sharing this row's property id.
    pub matches_per_property: usize,
    /// Merged rows sharing this row's external unique id.
    pub matches_per_identity: usize,
}
